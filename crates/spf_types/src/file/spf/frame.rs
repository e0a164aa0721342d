//! SPF frame structures and utilities.
//!
//! This module provides types for working with individual frames in SPF files.
//! A frame is a rectangle of 8-bit palette indices plus the descriptor that
//! places it in the container.

use std::fmt;

use crate::file::TRANSPARENT_INDEX;

use super::palette::Palette;

/// SPF frame descriptor entry (20 bytes).
///
/// This structure describes a single frame's metadata, including the offset
/// of its pixel data within the container's data area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameEntry {
	/// Offset to pixel data (relative to data area start)
	pub data_offset: u32,

	/// Frame width in pixels
	pub width: u32,

	/// Frame height in pixels
	pub height: u32,

	/// Hotspot X coordinate (registration point)
	pub hotspot_x: u32,

	/// Hotspot Y coordinate (registration point)
	pub hotspot_y: u32,
}

impl FrameEntry {
	/// Creates a new frame entry.
	///
	/// # Arguments
	///
	/// * `data_offset` - Offset to pixel data (relative to data area)
	/// * `width` - Frame width in pixels
	/// * `height` - Frame height in pixels
	/// * `hotspot_x` - Hotspot X coordinate
	/// * `hotspot_y` - Hotspot Y coordinate
	pub fn new(data_offset: u32, width: u32, height: u32, hotspot_x: u32, hotspot_y: u32) -> Self {
		Self {
			data_offset,
			width,
			height,
			hotspot_x,
			hotspot_y,
		}
	}

	/// Returns the total number of pixels in this frame.
	#[inline]
	pub fn pixel_count(&self) -> usize {
		(self.width as usize) * (self.height as usize)
	}

	/// Returns the frame's width.
	#[inline]
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Returns the frame's height.
	#[inline]
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Returns the hotspot X coordinate.
	#[inline]
	pub fn hotspot_x(&self) -> u32 {
		self.hotspot_x
	}

	/// Returns the hotspot Y coordinate.
	#[inline]
	pub fn hotspot_y(&self) -> u32 {
		self.hotspot_y
	}

	/// Returns the pixel data offset.
	#[inline]
	pub fn data_offset(&self) -> u32 {
		self.data_offset
	}
}

impl fmt::Display for FrameEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}×{} (hotspot: {}, {})",
			self.width, self.height, self.hotspot_x, self.hotspot_y
		)
	}
}

/// Complete SPF frame with its indexed pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	/// Frame metadata
	entry: FrameEntry,

	/// Indexed pixel data, row-major
	pixels: Vec<u8>,
}

impl Frame {
	/// Creates a new frame.
	///
	/// # Arguments
	///
	/// * `entry` - Frame metadata
	/// * `pixels` - Indexed pixel data (`width * height` bytes, row-major)
	pub fn new(entry: FrameEntry, pixels: Vec<u8>) -> Self {
		Self {
			entry,
			pixels,
		}
	}

	/// Returns the frame's metadata entry.
	#[inline]
	pub fn entry(&self) -> &FrameEntry {
		&self.entry
	}

	/// Returns the frame's indexed pixel data.
	#[inline]
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	/// Returns the frame's width.
	#[inline]
	pub fn width(&self) -> u32 {
		self.entry.width
	}

	/// Returns the frame's height.
	#[inline]
	pub fn height(&self) -> u32 {
		self.entry.height
	}

	/// Returns the hotspot X coordinate.
	#[inline]
	pub fn hotspot_x(&self) -> u32 {
		self.entry.hotspot_x
	}

	/// Returns the hotspot Y coordinate.
	#[inline]
	pub fn hotspot_y(&self) -> u32 {
		self.entry.hotspot_y
	}

	/// Returns an iterator over pixel rows.
	pub fn rows(&self) -> FrameRowIterator<'_> {
		FrameRowIterator {
			pixels: &self.pixels,
			width: self.entry.width as usize,
			current_row: 0,
			row_count: self.entry.height as usize,
		}
	}

	/// Expands the frame to straight-alpha RGBA bytes using the given palette.
	///
	/// Pixels holding the transparency key expand to transparent black;
	/// every other index expands to its palette color at full opacity.
	///
	/// # Arguments
	///
	/// * `palette` - Palette to resolve indices against
	///
	/// # Returns
	///
	/// `width * height * 4` bytes, row-major RGBA.
	pub fn to_rgba(&self, palette: &Palette) -> Vec<u8> {
		let mut rgba = Vec::with_capacity(self.pixels.len() * 4);

		for &index in &self.pixels {
			if index == TRANSPARENT_INDEX {
				rgba.extend_from_slice(&[0, 0, 0, 0]);
			} else {
				let color = palette.get(index);
				rgba.extend_from_slice(&[color.r, color.g, color.b, 255]);
			}
		}

		rgba
	}
}

impl fmt::Display for Frame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Frame {}", self.entry)
	}
}

/// Iterator over the pixel rows of a [`Frame`].
pub struct FrameRowIterator<'a> {
	pixels: &'a [u8],
	width: usize,
	current_row: usize,
	row_count: usize,
}

impl<'a> Iterator for FrameRowIterator<'a> {
	type Item = &'a [u8];

	fn next(&mut self) -> Option<Self::Item> {
		if self.current_row >= self.row_count {
			return None;
		}

		let start = self.current_row * self.width;
		let row = self.pixels.get(start..start + self.width)?;
		self.current_row += 1;
		Some(row)
	}
}
