//! Error types for the conversion pipeline.

use std::path::PathBuf;
use std::process::ExitStatus;

use spf_types::prelude::SpfFileError;
use thiserror::Error;

/// Errors that can occur while converting a video into an SPF/PAL pair
#[derive(Debug, Error)]
pub enum LogoError {
	/// Required external tool is missing from PATH
	#[error("{tool} is required, but was not found on PATH")]
	ToolNotFound {
		/// Name of the missing binary
		tool: &'static str,
	},

	/// External tool ran but reported failure
	#[error("{tool} exited with {status}: {stderr}")]
	ToolFailed {
		/// Name of the binary
		tool: &'static str,
		/// Exit status reported by the OS
		status: ExitStatus,
		/// Captured stderr output
		stderr: String,
	},

	/// Frame count could not be determined from the video
	#[error("could not read frame count of '{path}': {detail}")]
	BadFrameCount {
		/// Video path
		path: PathBuf,
		/// What ffprobe reported
		detail: String,
	},

	/// The video stream holds no frames at all
	#[error("video '{0}' contains no frames")]
	EmptyVideo(PathBuf),

	/// Extraction produced fewer frame files than requested
	#[error("expected {expected} sampled frames, extraction produced {actual}")]
	SampleCountMismatch {
		/// Frames requested
		expected: usize,
		/// Frame files found on disk
		actual: usize,
	},

	/// Every frame was lost before packing
	#[error("no frames survived the pipeline, nothing to pack")]
	NoFrames,

	/// A frame does not match the dimensions of the rest of the set
	#[error("frame {index} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
	FrameSizeMismatch {
		/// Frame index (0-based)
		index: usize,
		/// Expected width
		expected_width: u32,
		/// Expected height
		expected_height: u32,
		/// Actual width
		actual_width: u32,
		/// Actual height
		actual_height: u32,
	},

	/// Palette quantization failed
	#[error("palette quantization failed: {0}")]
	Quantize(String),

	/// Image decode/encode error
	#[error(transparent)]
	Image(#[from] image::ImageError),

	/// SPF/PAL file format error
	#[error(transparent)]
	Spf(#[from] SpfFileError),

	/// Manifest serialization error
	#[error(transparent)]
	Json(#[from] serde_json::Error),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}
