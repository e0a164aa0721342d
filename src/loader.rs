//! Re-reads composited frames from disk into memory for packing.
//!
//! Load order equals the order of the given paths, which the earlier stages
//! keep equal to sampling order. A frame that fails to decode is logged and
//! skipped rather than aborting the run.

use std::path::PathBuf;

use image::RgbaImage;
use log::{info, warn};

/// Loads the composited frames, in order, skipping any that fail to decode.
///
/// # Arguments
///
/// * `paths` - Composited frame files, in sampling order
pub fn load_frames(paths: &[PathBuf]) -> Vec<RgbaImage> {
	let mut frames = Vec::with_capacity(paths.len());

	for path in paths {
		match image::open(path) {
			Ok(img) => frames.push(img.into_rgba8()),
			Err(e) => {
				warn!("skipping frame '{}': {e}", path.display());
			}
		}
	}

	info!("loaded {} of {} composited frames", frames.len(), paths.len());

	frames
}

#[cfg(test)]
mod tests {
	use super::*;
	use image::Rgba;

	#[test]
	fn test_missing_files_are_skipped() {
		let dir = std::env::temp_dir().join("spflogo_loader_test");
		std::fs::create_dir_all(&dir).unwrap();

		let good = dir.join("good.png");
		RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])).save(&good).unwrap();

		let paths = vec![good.clone(), dir.join("does_not_exist.png")];
		let frames = load_frames(&paths);

		assert_eq!(frames.len(), 1);
		assert_eq!(frames[0].dimensions(), (2, 2));

		let _ = std::fs::remove_dir_all(&dir);
	}

	#[test]
	fn test_order_is_preserved() {
		let dir = std::env::temp_dir().join("spflogo_loader_order_test");
		std::fs::create_dir_all(&dir).unwrap();

		let mut paths = Vec::new();
		for i in 0..3u8 {
			let path = dir.join(format!("f{i}.png"));
			RgbaImage::from_pixel(1, 1, Rgba([i, 0, 0, 255])).save(&path).unwrap();
			paths.push(path);
		}

		let frames = load_frames(&paths);
		assert_eq!(frames.len(), 3);
		for (i, frame) in frames.iter().enumerate() {
			assert_eq!(frame.get_pixel(0, 0).0[0], i as u8);
		}

		let _ = std::fs::remove_dir_all(&dir);
	}
}
