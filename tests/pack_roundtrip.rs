//! End-to-end test of the mask/composite/pack stages, ffmpeg-free.
//!
//! Builds synthetic frames in memory, clips them with the elliptical mask,
//! packs them into an SPF/PAL pair on disk and reads both back.

use anyhow::Result;
use image::{Rgba, RgbaImage};
use spf_types::prelude::*;
use spflogo::{compositor, mask, packer};

/// Solid-color frame with a distinct red channel per index.
fn synthetic_frame(width: u32, height: u32, seq: u8) -> RgbaImage {
	RgbaImage::from_pixel(width, height, Rgba([50 + seq * 10, 80, 120, 255]))
}

#[test_log::test]
fn masked_frames_pack_and_reload() -> Result<()> {
	let (width, height) = (32u32, 24u32);
	let ellipse = mask::ellipse_mask(width, height);

	// Composite an ordered set of frames against the mask
	let frames: Vec<RgbaImage> = (0..5u8)
		.map(|seq| compositor::destination_in(&synthetic_frame(width, height, seq), &ellipse))
		.collect();

	let (spf, palette) = packer::pack_frames(&frames)?;
	assert_eq!(spf.frame_count(), 5);

	// Serialize both artifacts and read them back
	let dir = std::env::temp_dir().join("spflogo_pack_roundtrip");
	std::fs::create_dir_all(&dir)?;
	let spf_path = dir.join("LOGO.SPF");
	let pal_path = dir.join("LOGO.PAL");

	spf.save(&spf_path)?;
	palette.save(&pal_path)?;

	let reloaded = SpfFile::open(&spf_path)?;
	let reloaded_pal = Palette::from_file(&pal_path)?;

	assert_eq!(reloaded.frame_count(), 5);
	assert_eq!(reloaded_pal.get(TRANSPARENT_INDEX), Color::transparent());

	for (seq, frame) in reloaded.iter().enumerate() {
		assert_eq!(frame.width(), width);
		assert_eq!(frame.height(), height);

		// Outside the ellipse every pixel is the transparency key,
		// inside none are
		for (i, &index) in frame.pixels().iter().enumerate() {
			let (x, y) = (i as u32 % width, i as u32 / width);
			let inside = ellipse.get_pixel(x, y).0[3] == 255;
			if inside {
				assert_ne!(index, TRANSPARENT_INDEX, "frame {seq} pixel ({x},{y})");
			} else {
				assert_eq!(index, TRANSPARENT_INDEX, "frame {seq} pixel ({x},{y})");
			}
		}
	}

	// Frame order survives the disk roundtrip: red channel rises with seq
	let mut last_red = 0u8;
	for frame in reloaded.iter() {
		let center = frame.pixels()[(height / 2 * width + width / 2) as usize];
		let color = reloaded_pal.get(center);
		assert!(color.r > last_red, "frame order broken: {} !> {last_red}", color.r);
		last_red = color.r;
	}

	std::fs::remove_dir_all(&dir)?;
	Ok(())
}
