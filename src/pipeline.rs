//! End-to-end conversion pipeline.
//!
//! Drives the five stages in order (sample, mask, composite, load, pack)
//! with no concurrency and no recovery beyond log-and-abort. Intermediate
//! frames live in a scratch directory under the output directory and are
//! removed on success unless the caller asks to keep them.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::LogoError;
use crate::video::VideoSource;
use crate::{compositor, loader, mask, packer, sampler};

/// Default SPF output filename (the name the game client expects).
pub const DEFAULT_SPF_NAME: &str = "LOGO.SPF";

/// Default PAL output filename.
pub const DEFAULT_PAL_NAME: &str = "LOGO.PAL";

/// Filename of the JSON manifest written next to the outputs.
pub const MANIFEST_NAME: &str = "logo_manifest.json";

/// Options for a single conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
	/// Input video file
	pub video: PathBuf,

	/// Reference logo image; only its dimensions are used
	pub logo: PathBuf,

	/// Output directory for the SPF/PAL pair and the manifest
	pub out_dir: PathBuf,

	/// Cap on the number of sampled frames
	pub max_frames: usize,

	/// Keep the scratch directory with intermediate frames
	pub keep_temp: bool,

	/// SPF output filename
	pub spf_name: String,

	/// PAL output filename
	pub pal_name: String,
}

impl ConvertOptions {
	/// Creates options with the default cap and output filenames.
	pub fn new(
		video: impl Into<PathBuf>,
		logo: impl Into<PathBuf>,
		out_dir: impl Into<PathBuf>,
	) -> Self {
		Self {
			video: video.into(),
			logo: logo.into(),
			out_dir: out_dir.into(),
			max_frames: sampler::DEFAULT_MAX_FRAMES,
			keep_temp: false,
			spf_name: DEFAULT_SPF_NAME.to_string(),
			pal_name: DEFAULT_PAL_NAME.to_string(),
		}
	}
}

/// Summary of a completed conversion, also serialized as the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
	/// Source video path
	pub source: PathBuf,

	/// Number of frames packed into the SPF
	pub frame_count: usize,

	/// Frame width in pixels
	pub width: u32,

	/// Frame height in pixels
	pub height: u32,

	/// Written SPF file
	pub spf: PathBuf,

	/// Written PAL file
	pub pal: PathBuf,
}

/// Runs the full conversion pipeline.
///
/// # Arguments
///
/// * `opts` - Conversion options
///
/// # Errors
///
/// Aborts on the first stage failure; partial scratch output may remain in
/// the output directory's `work/` subdirectory.
pub fn run(opts: &ConvertOptions) -> Result<Manifest, LogoError> {
	std::fs::create_dir_all(&opts.out_dir)?;
	let work_dir = opts.out_dir.join("work");

	// Stage 1: sample frames from the video
	info!("stage 1/5: sampling '{}'", opts.video.display());
	let video = VideoSource::open(&opts.video)?;
	let sampled = sampler::sample_video(&video, opts.max_frames, &work_dir.join("frames"))?;

	// Stage 2: build the elliptical mask from the reference logo
	info!("stage 2/5: building mask from '{}'", opts.logo.display());
	let mask = mask::mask_from_logo(&opts.logo)?;

	// Stage 3: clip every sampled frame against the mask
	info!("stage 3/5: compositing {} frames", sampled.len());
	let composited = compositor::composite_frames(&sampled, &mask, &work_dir.join("masked"))?;

	// Stage 4: load the composited set back from disk
	info!("stage 4/5: loading composited frames");
	let frames = loader::load_frames(&composited);
	if frames.is_empty() {
		return Err(LogoError::NoFrames);
	}

	// Stage 5: quantize and pack
	info!("stage 5/5: packing {} frames", frames.len());
	let (spf, palette) = packer::pack_frames(&frames)?;

	let spf_path = opts.out_dir.join(&opts.spf_name);
	let pal_path = opts.out_dir.join(&opts.pal_name);
	spf.save(&spf_path)?;
	palette.save(&pal_path)?;

	let manifest = Manifest {
		source: opts.video.clone(),
		frame_count: frames.len(),
		width: mask.width(),
		height: mask.height(),
		spf: spf_path,
		pal: pal_path,
	};

	let manifest_path = opts.out_dir.join(MANIFEST_NAME);
	std::fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;

	cleanup_work_dir(&work_dir, opts.keep_temp);

	info!(
		"wrote '{}' and '{}' ({} frames, {}x{})",
		manifest.spf.display(),
		manifest.pal.display(),
		manifest.frame_count,
		manifest.width,
		manifest.height
	);

	Ok(manifest)
}

/// Removes the scratch directory unless the caller wants to inspect it.
fn cleanup_work_dir(work_dir: &Path, keep_temp: bool) {
	if keep_temp {
		info!("keeping intermediate frames in '{}'", work_dir.display());
		return;
	}

	if let Err(e) = std::fs::remove_dir_all(work_dir) {
		warn!("could not remove scratch directory '{}': {e}", work_dir.display());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_options() {
		let opts = ConvertOptions::new("in.avi", "logo.png", "out");

		assert_eq!(opts.max_frames, sampler::DEFAULT_MAX_FRAMES);
		assert_eq!(opts.spf_name, DEFAULT_SPF_NAME);
		assert_eq!(opts.pal_name, DEFAULT_PAL_NAME);
		assert!(!opts.keep_temp);
	}

	#[test]
	fn test_manifest_roundtrip() {
		let manifest = Manifest {
			source: PathBuf::from("clip.avi"),
			frame_count: 12,
			width: 128,
			height: 128,
			spf: PathBuf::from("out/LOGO.SPF"),
			pal: PathBuf::from("out/LOGO.PAL"),
		};

		let json = serde_json::to_string(&manifest).unwrap();
		let loaded: Manifest = serde_json::from_str(&json).unwrap();

		assert_eq!(loaded.frame_count, 12);
		assert_eq!(loaded.spf, manifest.spf);
	}
}
