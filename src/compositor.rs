//! Frame compositing: resize and clip sampled frames against the mask.
//!
//! Each sampled frame is decoded, resized to the mask's dimensions and then
//! combined with the mask using the destination-in rule: the frame's pixels
//! survive only where the mask is opaque, scaled by the mask's alpha.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::{debug, info};

use crate::error::LogoError;

/// Applies the destination-in compositing rule.
///
/// `out.rgb = frame.rgb`, `out.a = frame.a * mask.a / 255`, per pixel over
/// straight-alpha RGBA. Both images must share dimensions.
pub fn destination_in(frame: &RgbaImage, mask: &RgbaImage) -> RgbaImage {
	debug_assert_eq!(frame.dimensions(), mask.dimensions());

	RgbaImage::from_fn(frame.width(), frame.height(), |x, y| {
		let Rgba([r, g, b, a]) = *frame.get_pixel(x, y);
		let mask_a = mask.get_pixel(x, y).0[3];

		let out_a = (a as u16 * mask_a as u16 / 255) as u8;
		Rgba([r, g, b, out_a])
	})
}

/// Composites sampled frame files against the mask, writing the results
/// back to disk.
///
/// This is stage 3 of the pipeline: for each sampled frame, decode, resize
/// to the mask's dimensions (Lanczos3), apply destination-in, and write the
/// result as `masked_<seq>.png`. Output order equals input order.
///
/// # Arguments
///
/// * `frame_paths` - Sampled frame files, in sampling order
/// * `mask` - Transparency mask built by [`crate::mask`]
/// * `out_dir` - Directory the composited files are written into
///
/// # Returns
///
/// The written file paths, in sampling order.
///
/// # Errors
///
/// Returns an error if a frame cannot be decoded or a result cannot be
/// written; the run aborts on the first failure.
pub fn composite_frames(
	frame_paths: &[PathBuf],
	mask: &RgbaImage,
	out_dir: &Path,
) -> Result<Vec<PathBuf>, LogoError> {
	std::fs::create_dir_all(out_dir)?;

	let (width, height) = mask.dimensions();
	let mut composited = Vec::with_capacity(frame_paths.len());

	for (seq, path) in frame_paths.iter().enumerate() {
		let frame = image::open(path)?.into_rgba8();
		let resized = imageops::resize(&frame, width, height, FilterType::Lanczos3);
		let clipped = destination_in(&resized, mask);

		let out_path = out_dir.join(format!("masked_{seq:04}.png"));
		clipped.save(&out_path)?;
		debug!("composited frame {seq}: '{}'", out_path.display());

		composited.push(out_path);
	}

	info!("composited {} frames at {}x{}", composited.len(), width, height);

	Ok(composited)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
		RgbaImage::from_pixel(width, height, Rgba(rgba))
	}

	#[test]
	fn test_opaque_mask_keeps_frame() {
		let frame = solid(4, 4, [10, 20, 30, 255]);
		let mask = solid(4, 4, [255, 255, 255, 255]);

		let out = destination_in(&frame, &mask);
		assert!(out.pixels().all(|p| p.0 == [10, 20, 30, 255]));
	}

	#[test]
	fn test_transparent_mask_clears_alpha() {
		let frame = solid(4, 4, [10, 20, 30, 255]);
		let mask = solid(4, 4, [255, 255, 255, 0]);

		let out = destination_in(&frame, &mask);
		// Color channels are untouched, only alpha is cleared
		assert!(out.pixels().all(|p| p.0 == [10, 20, 30, 0]));
	}

	#[test]
	fn test_partial_mask_scales_alpha() {
		let frame = solid(2, 2, [100, 100, 100, 200]);
		let mask = solid(2, 2, [255, 255, 255, 128]);

		let out = destination_in(&frame, &mask);
		let expected = (200u16 * 128 / 255) as u8;
		assert!(out.pixels().all(|p| p.0 == [100, 100, 100, expected]));
	}

	#[test]
	fn test_per_pixel_masking() {
		let frame = solid(2, 1, [1, 2, 3, 255]);
		let mut mask = solid(2, 1, [255, 255, 255, 255]);
		mask.put_pixel(1, 0, Rgba([255, 255, 255, 0]));

		let out = destination_in(&frame, &mask);
		assert_eq!(out.get_pixel(0, 0).0, [1, 2, 3, 255]);
		assert_eq!(out.get_pixel(1, 0).0, [1, 2, 3, 0]);
	}
}
