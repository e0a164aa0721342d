//! Frame sampling: uniform selection of a bounded subset of video frames.

use std::path::{Path, PathBuf};

use log::info;

use crate::error::LogoError;
use crate::video::VideoSource;

/// Default cap on the number of frames sampled from a video.
pub const DEFAULT_MAX_FRAMES: usize = 64;

/// Selects an evenly spaced subset of `0..total`, at most `max` indices.
///
/// When the video has no more frames than the cap, every frame is taken.
/// Otherwise sample `i` maps to frame `i * total / max`, which keeps the
/// selection deterministic, strictly increasing and anchored at frame 0.
///
/// # Arguments
///
/// * `total` - Total number of frames in the video
/// * `max` - Maximum number of indices to select
pub fn sample_indices(total: u64, max: usize) -> Vec<u64> {
	if total == 0 || max == 0 {
		return Vec::new();
	}

	if total <= max as u64 {
		return (0..total).collect();
	}

	(0..max as u64).map(|i| i * total / max as u64).collect()
}

/// Samples a video and writes the selected frames to disk as PNG files.
///
/// This is stage 1 of the pipeline: probe the total frame count, pick the
/// uniform subset, and have the decoder dump exactly those frames into
/// `out_dir` named by sample index.
///
/// # Arguments
///
/// * `video` - Opened video source
/// * `max_frames` - Cap on the number of sampled frames
/// * `out_dir` - Directory the frame files are written into
///
/// # Returns
///
/// The written frame paths, in sampling order.
///
/// # Errors
///
/// Returns an error if the video holds no frames, or if probing/extraction
/// fails.
pub fn sample_video(
	video: &VideoSource,
	max_frames: usize,
	out_dir: &Path,
) -> Result<Vec<PathBuf>, LogoError> {
	let total = video.frame_count()?;
	if total == 0 {
		return Err(LogoError::EmptyVideo(video.path().to_path_buf()));
	}

	let indices = sample_indices(total, max_frames);
	info!("sampling {} of {} frames from '{}'", indices.len(), total, video.path().display());

	video.extract_frames(&indices, out_dir)
}
