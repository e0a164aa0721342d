//! Transparency mask construction.
//!
//! The mask is a filled ellipse inscribed in the reference logo's bounding
//! rectangle: opaque white inside, fully transparent outside. It is computed
//! once per run and every sampled frame is clipped against it.

use std::path::Path;

use image::{Rgba, RgbaImage};
use log::info;

use crate::error::LogoError;

/// Builds the elliptical mask sized after a reference logo image.
///
/// Only the logo's dimensions matter; its pixels are never read.
///
/// # Arguments
///
/// * `logo_path` - Path to the reference logo image
///
/// # Errors
///
/// Returns an error if the image header cannot be decoded.
pub fn mask_from_logo(logo_path: &Path) -> Result<RgbaImage, LogoError> {
	let (width, height) = image::image_dimensions(logo_path)?;
	info!("mask dimensions from '{}': {}x{}", logo_path.display(), width, height);

	Ok(ellipse_mask(width, height))
}

/// Rasterizes a filled ellipse inscribed in a `width` x `height` rectangle.
///
/// A pixel is opaque white when its center lies inside the ellipse with
/// radii `width / 2` and `height / 2`, fully transparent otherwise.
pub fn ellipse_mask(width: u32, height: u32) -> RgbaImage {
	let rx = width as f64 / 2.0;
	let ry = height as f64 / 2.0;

	RgbaImage::from_fn(width, height, |x, y| {
		// Normalized offset of the pixel center from the ellipse center
		let dx = (x as f64 + 0.5) / rx - 1.0;
		let dy = (y as f64 + 0.5) / ry - 1.0;

		if dx * dx + dy * dy <= 1.0 {
			Rgba([255, 255, 255, 255])
		} else {
			Rgba([255, 255, 255, 0])
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn alpha(mask: &RgbaImage, x: u32, y: u32) -> u8 {
		mask.get_pixel(x, y).0[3]
	}

	#[test]
	fn test_center_opaque_corners_transparent() {
		let mask = ellipse_mask(64, 48);

		assert_eq!(alpha(&mask, 32, 24), 255);
		assert_eq!(alpha(&mask, 0, 0), 0);
		assert_eq!(alpha(&mask, 63, 0), 0);
		assert_eq!(alpha(&mask, 0, 47), 0);
		assert_eq!(alpha(&mask, 63, 47), 0);
	}

	#[test]
	fn test_axis_extremes_inside() {
		let mask = ellipse_mask(64, 64);

		// Pixel centers on the axes at the rim are inside the ellipse
		assert_eq!(alpha(&mask, 0, 32), 255);
		assert_eq!(alpha(&mask, 63, 32), 255);
		assert_eq!(alpha(&mask, 32, 0), 255);
		assert_eq!(alpha(&mask, 32, 63), 255);
	}

	#[test]
	fn test_symmetry() {
		let mask = ellipse_mask(50, 30);

		for y in 0..30 {
			for x in 0..50 {
				assert_eq!(alpha(&mask, x, y), alpha(&mask, 49 - x, y));
				assert_eq!(alpha(&mask, x, y), alpha(&mask, x, 29 - y));
			}
		}
	}

	#[test]
	fn test_single_pixel_is_opaque() {
		let mask = ellipse_mask(1, 1);
		assert_eq!(alpha(&mask, 0, 0), 255);
	}

	#[test]
	fn test_mask_is_binary() {
		let mask = ellipse_mask(33, 17);
		assert!(mask.pixels().all(|p| p.0[3] == 0 || p.0[3] == 255));
	}
}
