//! Video source access via the system `ffmpeg`/`ffprobe` binaries.
//!
//! The video source is opaque to the rest of the pipeline: only its total
//! frame count and per-index frame extraction are observable. Decoding is
//! delegated to the system binaries rather than a native FFmpeg binding,
//! which keeps the build free of FFmpeg dev header/lib requirements.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::error::LogoError;

/// Name of the decoder binary looked up on PATH.
const FFMPEG: &str = "ffmpeg";

/// Name of the prober binary looked up on PATH.
const FFPROBE: &str = "ffprobe";

/// Returns true when the given tool responds to `-version` on PATH.
pub fn is_tool_on_path(tool: &str) -> bool {
	Command::new(tool)
		.arg("-version")
		.stdout(Stdio::null())
		.stderr(Stdio::null())
		.status()
		.map(|s| s.success())
		.unwrap_or(false)
}

/// An opened video file, ready to be probed and sampled.
#[derive(Debug, Clone)]
pub struct VideoSource {
	path: PathBuf,
}

impl VideoSource {
	/// Opens a video file.
	///
	/// # Arguments
	///
	/// * `path` - Path to the video file
	///
	/// # Errors
	///
	/// Returns an error if the file does not exist, or if `ffmpeg`/`ffprobe`
	/// are missing from PATH.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, LogoError> {
		let path = path.into();

		if !path.is_file() {
			return Err(LogoError::IOError(std::io::Error::new(
				std::io::ErrorKind::NotFound,
				format!("video file '{}' not found", path.display()),
			)));
		}

		for tool in [FFMPEG, FFPROBE] {
			if !is_tool_on_path(tool) {
				return Err(LogoError::ToolNotFound {
					tool,
				});
			}
		}

		Ok(Self {
			path,
		})
	}

	/// Returns the path of the video file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Counts the frames of the first video stream.
	///
	/// Runs `ffprobe -count_frames`, which decodes the whole stream; exact
	/// but not instant on long inputs.
	///
	/// # Errors
	///
	/// Returns an error if ffprobe fails or reports something that is not a
	/// frame count.
	pub fn frame_count(&self) -> Result<u64, LogoError> {
		let output = Command::new(FFPROBE)
			.args([
				"-v",
				"error",
				"-select_streams",
				"v:0",
				"-count_frames",
				"-show_entries",
				"stream=nb_read_frames",
				"-of",
				"default=noprint_wrappers=1:nokey=1",
			])
			.arg(&self.path)
			.stdin(Stdio::null())
			.output()?;

		if !output.status.success() {
			return Err(LogoError::ToolFailed {
				tool: FFPROBE,
				status: output.status,
				stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
			});
		}

		let stdout = String::from_utf8_lossy(&output.stdout);
		let reported = stdout.trim();

		reported.parse::<u64>().map_err(|_| LogoError::BadFrameCount {
			path: self.path.clone(),
			detail: format!("ffprobe reported '{reported}'"),
		})
	}

	/// Extracts the frames at the given indices to numbered PNG files.
	///
	/// A single ffmpeg invocation with a `select` filter decodes exactly the
	/// requested indices; output files are named `frame_0000.png`,
	/// `frame_0001.png`, ... in index order.
	///
	/// # Arguments
	///
	/// * `indices` - Frame indices to extract, strictly increasing
	/// * `out_dir` - Directory the PNG files are written into
	///
	/// # Returns
	///
	/// The written file paths, one per requested index, in request order.
	///
	/// # Errors
	///
	/// Returns an error if ffmpeg fails or writes fewer files than requested.
	pub fn extract_frames(
		&self,
		indices: &[u64],
		out_dir: &Path,
	) -> Result<Vec<PathBuf>, LogoError> {
		if indices.is_empty() {
			return Ok(Vec::new());
		}

		std::fs::create_dir_all(out_dir)?;

		// Commas separate filter arguments, so the ones inside eq() need
		// a backslash escape at the filtergraph level.
		let select_expr = indices
			.iter()
			.map(|i| format!("eq(n\\,{i})"))
			.collect::<Vec<_>>()
			.join("+");

		let pattern = out_dir.join("frame_%04d.png");

		debug!("ffmpeg select filter: {select_expr}");

		let output = Command::new(FFMPEG)
			.args(["-loglevel", "error", "-y", "-i"])
			.arg(&self.path)
			.args([
				"-vf",
				&format!("select={select_expr}"),
				"-vsync",
				"0",
				"-start_number",
				"0",
			])
			.arg(&pattern)
			.stdin(Stdio::null())
			.stdout(Stdio::null())
			.output()?;

		if !output.status.success() {
			return Err(LogoError::ToolFailed {
				tool: FFMPEG,
				status: output.status,
				stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
			});
		}

		// Collect the paths ffmpeg should have written, in index order
		let mut frames = Vec::with_capacity(indices.len());
		for seq in 0..indices.len() {
			let path = out_dir.join(format!("frame_{seq:04}.png"));
			if path.is_file() {
				frames.push(path);
			}
		}

		if frames.len() != indices.len() {
			return Err(LogoError::SampleCountMismatch {
				expected: indices.len(),
				actual: frames.len(),
			});
		}

		info!(
			"extracted {} frames from '{}' to '{}'",
			frames.len(),
			self.path.display(),
			out_dir.display()
		);

		Ok(frames)
	}
}
