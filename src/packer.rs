//! Sprite packing: shared-palette quantization and SPF/PAL construction.
//!
//! The whole composited frame set is quantized in one pass so that every
//! frame indexes the same derived palette. Index 0 is reserved as the
//! transparency key; visible colors occupy indices 1..=255.

use std::collections::HashMap;

use image::{RgbImage, RgbaImage};
use log::info;
use quantette::{ColorSpace, ImagePipeline, QuantizeMethod};
use spf_types::prelude::*;

use crate::error::LogoError;

/// Pixels with alpha below this are treated as fully transparent.
pub const ALPHA_THRESHOLD: u8 = 8;

type QuantPalette = Vec<quantette::palette::rgb::Rgb<quantette::palette::encoding::Srgb, u8>>;

/// Packs an ordered frame set into an SPF container and its derived palette.
///
/// This is stage 5 of the pipeline. All frames must share dimensions (the
/// compositor guarantees this by resizing against one mask). Frame order in
/// the container equals the order of `frames`.
///
/// # Arguments
///
/// * `frames` - Composited RGBA frames, in sampling order
///
/// # Errors
///
/// Returns an error if the set is empty, dimensions disagree, or
/// quantization fails.
pub fn pack_frames(frames: &[RgbaImage]) -> Result<(SpfFile, Palette), LogoError> {
	let Some(first) = frames.first() else {
		return Err(LogoError::NoFrames);
	};

	let (width, height) = first.dimensions();
	for (index, frame) in frames.iter().enumerate() {
		if frame.dimensions() != (width, height) {
			return Err(LogoError::FrameSizeMismatch {
				index,
				expected_width: width,
				expected_height: height,
				actual_width: frame.width(),
				actual_height: frame.height(),
			});
		}
	}

	// Gather the straight RGB of every pixel, remembering which ones are
	// opaque. Only opaque pixels feed the quantizer; keyed-out pixels must
	// never claim a palette slot.
	let pixel_count = (width as usize) * (height as usize);
	let mut opaque = Vec::with_capacity(pixel_count * frames.len());
	let mut colors = Vec::with_capacity(pixel_count * frames.len());
	let mut quant_buf = Vec::new();

	for frame in frames {
		for pixel in frame.pixels() {
			let [r, g, b, a] = pixel.0;
			if a < ALPHA_THRESHOLD {
				opaque.push(false);
				colors.push([0, 0, 0]);
			} else {
				opaque.push(true);
				colors.push([r, g, b]);
				quant_buf.extend_from_slice(&[r, g, b]);
			}
		}
	}

	let quant_palette = derive_palette(quant_buf)?;

	info!(
		"quantized {} frames ({}x{}) to {} colors",
		frames.len(),
		width,
		height,
		quant_palette.len()
	);

	// Derived palette: key at 0, quantized colors from 1 upward. The map
	// doubles as a memo for nearest-color lookups below.
	let mut palette = Palette::new();
	let mut index_of: HashMap<[u8; 3], u8> = HashMap::with_capacity(quant_palette.len());
	for (i, color) in quant_palette.iter().enumerate() {
		let index = (i + 1) as u8;
		palette.set(index, Color::rgb(color.red, color.green, color.blue));
		index_of.entry([color.red, color.green, color.blue]).or_insert(index);
	}

	// Index-map each pixel against the shared palette
	let mut spf = SpfFile::new();

	for frame_no in 0..frames.len() {
		let base = frame_no * pixel_count;
		let mut pixels = Vec::with_capacity(pixel_count);

		for i in 0..pixel_count {
			if !opaque[base + i] {
				pixels.push(TRANSPARENT_INDEX);
				continue;
			}

			let rgb = colors[base + i];
			let index = match index_of.get(&rgb) {
				Some(&index) => index,
				None => {
					let index = nearest_index(&quant_palette, rgb);
					index_of.insert(rgb, index);
					index
				}
			};
			pixels.push(index);
		}

		let entry = SpfFrameEntry::new(0, width, height, width / 2, height / 2);
		spf.add_frame(SpfFrame::new(entry, pixels))?;
	}

	Ok((spf, palette))
}

/// Derives the shared palette from the opaque pixels' straight RGB values.
///
/// The values are laid out as a single-column image so one quantization
/// pass sees every opaque pixel of every frame at once. A fully
/// transparent frame set yields an empty palette.
fn derive_palette(quant_buf: Vec<u8>) -> Result<QuantPalette, LogoError> {
	if quant_buf.is_empty() {
		return Ok(QuantPalette::new());
	}

	let rows = (quant_buf.len() / 3) as u32;
	let strip = RgbImage::from_vec(1, rows, quant_buf)
		.ok_or_else(|| LogoError::Quantize("opaque pixel buffer has wrong size".to_string()))?;

	let pipeline = ImagePipeline::try_from(&strip)
		.map_err(|e| LogoError::Quantize(e.to_string()))?
		// 255 visible colors, slot 0 stays the transparency key
		.palette_size(255)
		.colorspace(ColorSpace::Oklab)
		.quantize_method(QuantizeMethod::kmeans());

	Ok(pipeline.palette_par())
}

/// Finds the palette index whose color is closest to `rgb` (1-based slots).
fn nearest_index(quant_palette: &QuantPalette, rgb: [u8; 3]) -> u8 {
	let mut best = 1usize;
	let mut best_dist = u32::MAX;

	for (i, color) in quant_palette.iter().enumerate() {
		let dr = color.red as i32 - rgb[0] as i32;
		let dg = color.green as i32 - rgb[1] as i32;
		let db = color.blue as i32 - rgb[2] as i32;
		let dist = (dr * dr + dg * dg + db * db) as u32;

		if dist < best_dist {
			best_dist = dist;
			best = i + 1;
		}
	}

	best as u8
}

#[cfg(test)]
mod tests {
	use super::*;
	use image::Rgba;

	fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
		RgbaImage::from_pixel(width, height, Rgba(rgba))
	}

	#[test]
	fn test_pack_empty_set_fails() {
		let err = pack_frames(&[]).unwrap_err();
		assert!(matches!(err, LogoError::NoFrames));
	}

	#[test]
	fn test_pack_rejects_mixed_dimensions() {
		let frames = vec![solid(4, 4, [255, 0, 0, 255]), solid(2, 2, [255, 0, 0, 255])];
		let err = pack_frames(&frames).unwrap_err();
		assert!(matches!(err, LogoError::FrameSizeMismatch { index: 1, .. }));
	}

	#[test]
	fn test_transparent_pixels_get_the_key_index() {
		let mut frame = solid(4, 4, [0, 200, 0, 255]);
		frame.put_pixel(0, 0, Rgba([0, 200, 0, 0]));
		frame.put_pixel(3, 3, Rgba([0, 200, 0, 0]));

		let (spf, _) = pack_frames(&[frame]).unwrap();
		let packed = spf.get_frame(0).unwrap();

		assert_eq!(packed.pixels()[0], TRANSPARENT_INDEX);
		assert_eq!(packed.pixels()[15], TRANSPARENT_INDEX);
		assert!(packed.pixels()[1..15].iter().all(|&p| p != TRANSPARENT_INDEX));
	}

	#[test]
	fn test_shared_palette_roughly_matches_source_colors() {
		let frames = vec![solid(4, 4, [250, 10, 10, 255]), solid(4, 4, [10, 10, 250, 255])];

		let (spf, palette) = pack_frames(&frames).unwrap();
		assert_eq!(spf.frame_count(), 2);

		let red_index = spf.get_frame(0).unwrap().pixels()[0];
		let blue_index = spf.get_frame(1).unwrap().pixels()[0];

		let red = palette.get(red_index);
		let blue = palette.get(blue_index);

		assert!(red.r > 200 && red.b < 80, "expected reddish, got {red}");
		assert!(blue.b > 200 && blue.r < 80, "expected bluish, got {blue}");
	}

	#[test]
	fn test_transparent_pixels_never_claim_a_palette_slot() {
		// Left half pure red, right half fully transparent
		let mut frame = solid(8, 8, [255, 0, 0, 255]);
		for y in 0..8 {
			for x in 4..8 {
				frame.put_pixel(x, y, Rgba([0, 0, 0, 0]));
			}
		}

		let (_, palette) = pack_frames(&[frame]).unwrap();

		// No opaque pixel is dark, so no visible entry may be near-black
		for (index, color) in palette.iter_indexed() {
			if index == TRANSPARENT_INDEX || color.a == 0 {
				continue;
			}
			let brightness = color.r as u16 + color.g as u16 + color.b as u16;
			assert!(brightness > 100, "entry {index} is near-black: {color}");
		}
	}

	#[test]
	fn test_semi_transparent_pixels_keep_straight_rgb() {
		let frame = solid(4, 4, [200, 200, 200, 128]);

		let (spf, palette) = pack_frames(&[frame]).unwrap();
		let index = spf.get_frame(0).unwrap().pixels()[0];
		assert_ne!(index, TRANSPARENT_INDEX);

		// Above the alpha threshold the color quantizes as-is, not darkened
		let color = palette.get(index);
		assert!(
			color.r > 180 && color.g > 180 && color.b > 180,
			"expected near (200, 200, 200), got {color}"
		);
	}

	#[test]
	fn test_fully_transparent_set_packs_to_key_only() {
		let frames = vec![solid(4, 4, [0, 0, 0, 0]); 2];

		let (spf, palette) = pack_frames(&frames).unwrap();
		assert_eq!(spf.frame_count(), 2);

		for frame in spf.iter() {
			assert!(frame.pixels().iter().all(|&p| p == TRANSPARENT_INDEX));
		}
		assert!(palette.iter().all(|c| c.a == 0));
	}

	#[test]
	fn test_frame_order_and_hotspot() {
		let frames = vec![solid(6, 4, [200, 0, 0, 255]); 3];

		let (spf, _) = pack_frames(&frames).unwrap();
		assert_eq!(spf.frame_count(), 3);

		for frame in spf.iter() {
			assert_eq!(frame.width(), 6);
			assert_eq!(frame.height(), 4);
			assert_eq!(frame.hotspot_x(), 3);
			assert_eq!(frame.hotspot_y(), 2);
		}
	}

	#[test]
	fn test_nearest_index_fallback() {
		let quant_palette: QuantPalette = vec![
			quantette::palette::rgb::Rgb::new(255, 0, 0),
			quantette::palette::rgb::Rgb::new(0, 0, 255),
		];

		assert_eq!(nearest_index(&quant_palette, [250, 5, 5]), 1);
		assert_eq!(nearest_index(&quant_palette, [5, 5, 250]), 2);
	}
}
