//! PAL palette support.
//!
//! This module provides types for working with the 256-color palette that
//! accompanies an SPF file. The palette is stored in a `.PAL` file as
//! 256 entries of 4 bytes each (RGBX format, 1024 bytes total). Index 0
//! is the transparency key; the game client never draws it.

use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::file::{FileType, SpfFileError, TRANSPARENT_INDEX};

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Color {
	/// Creates a new RGBA color.
	///
	/// # Arguments
	///
	/// * `r` - Red component (0-255)
	/// * `g` - Green component (0-255)
	/// * `b` - Blue component (0-255)
	/// * `a` - Alpha component (0-255)
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a new RGB color with full opacity.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 255)
	}

	/// Creates a new grayscale color.
	pub const fn gray(value: u8) -> Self {
		Self::rgb(value, value, value)
	}

	/// Creates a transparent black color.
	pub const fn transparent() -> Self {
		Self::new(0, 0, 0, 0)
	}

	/// Returns the color as a 32-bit RGBA value.
	pub const fn to_rgba32(&self) -> u32 {
		((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | (self.a as u32)
	}

	/// Creates a color from a 32-bit RGBA value.
	pub const fn from_rgba32(rgba: u32) -> Self {
		Self {
			r: ((rgba >> 24) & 0xFF) as u8,
			g: ((rgba >> 16) & 0xFF) as u8,
			b: ((rgba >> 8) & 0xFF) as u8,
			a: (rgba & 0xFF) as u8,
		}
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::transparent()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// SPF color palette (256 colors).
///
/// PAL file format:
/// - 256 colors × 4 bytes (RGBX format, X is padding)
/// - Index 0 is the transparency key, stored as black
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
	/// 256-color palette
	colors: [Color; 256],
}

impl Palette {
	/// Total palette size
	pub const COLOR_COUNT: usize = 256;

	/// Size of the PAL file in bytes (256 colors × 4 bytes)
	pub const PAL_FILE_SIZE: usize = Self::COLOR_COUNT * 4;

	/// Creates a new palette with all colors set to transparent black.
	pub fn new() -> Self {
		Self {
			colors: [Color::transparent(); 256],
		}
	}

	/// Creates a grayscale palette.
	///
	/// All 256 colors are set to grayscale values matching their index.
	pub fn grayscale() -> Self {
		let mut palette = Self::new();
		for i in 0..Self::COLOR_COUNT {
			palette.colors[i] = Color::gray(i as u8);
		}
		palette
	}

	/// Loads a palette from a PAL file.
	///
	/// # Arguments
	///
	/// * `path` - Path to the PAL file
	///
	/// # File Format
	///
	/// The PAL file contains 256 colors in RGBX format (1024 bytes total).
	/// Each color is 4 bytes: R, G, B, X (where X is ignored/padding).
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SpfFileError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Loads a palette from a byte slice.
	///
	/// # Arguments
	///
	/// * `data` - Raw palette data (must be at least 1024 bytes)
	pub fn from_bytes(data: &[u8]) -> Result<Self, SpfFileError> {
		if data.len() < Self::PAL_FILE_SIZE {
			return Err(SpfFileError::insufficient_data(
				FileType::Pal,
				Self::PAL_FILE_SIZE,
				data.len(),
			));
		}

		let mut reader = std::io::Cursor::new(data);
		Self::from_reader(&mut reader)
	}

	/// Loads a palette from a reader.
	///
	/// # Arguments
	///
	/// * `reader` - Data reader
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, SpfFileError> {
		let mut palette = Self::new();

		// Read 256 colors in RGBX format
		for i in 0..Self::COLOR_COUNT {
			let mut rgbx = [0u8; 4];
			reader.read_exact(&mut rgbx)?;

			palette.colors[i] = Color::new(
				rgbx[0], // R
				rgbx[1], // G
				rgbx[2], // B
				255,     // Fully opaque
			);
		}

		// Index 0 is the transparency key
		palette.colors[TRANSPARENT_INDEX as usize] = Color::transparent();

		Ok(palette)
	}

	/// Gets a color by index.
	///
	/// # Arguments
	///
	/// * `index` - Color index (0-255)
	#[inline]
	pub fn get(&self, index: u8) -> Color {
		self.colors[index as usize]
	}

	/// Sets a color at the specified index.
	///
	/// # Arguments
	///
	/// * `index` - Color index (0-255)
	/// * `color` - New color value
	#[inline]
	pub fn set(&mut self, index: u8, color: Color) {
		self.colors[index as usize] = color;
	}

	/// Returns a reference to the color array.
	#[inline]
	pub fn colors(&self) -> &[Color; 256] {
		&self.colors
	}

	/// Saves the palette to a file in PAL format.
	///
	/// # Arguments
	///
	/// * `path` - Output file path
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SpfFileError> {
		std::fs::write(path, self.to_bytes())?;
		Ok(())
	}

	/// Converts the palette to bytes in PAL format.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut data = Vec::with_capacity(Self::PAL_FILE_SIZE);

		for color in &self.colors {
			data.push(color.r);
			data.push(color.g);
			data.push(color.b);
			data.push(0); // X padding
		}

		data
	}

	/// Returns an iterator over palette colors.
	pub fn iter(&self) -> impl Iterator<Item = &Color> {
		self.colors.iter()
	}

	/// Returns an iterator over palette colors with indices.
	pub fn iter_indexed(&self) -> impl Iterator<Item = (u8, &Color)> {
		self.colors.iter().enumerate().map(|(i, c)| (i as u8, c))
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for Palette {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SPF Palette: {} colors", Self::COLOR_COUNT)
	}
}

impl std::ops::Index<u8> for Palette {
	type Output = Color;

	fn index(&self, index: u8) -> &Self::Output {
		&self.colors[index as usize]
	}
}

impl std::ops::IndexMut<u8> for Palette {
	fn index_mut(&mut self, index: u8) -> &mut Self::Output {
		&mut self.colors[index as usize]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_color_creation() {
		let color = Color::new(255, 128, 64, 255);
		assert_eq!(color.r, 255);
		assert_eq!(color.g, 128);
		assert_eq!(color.b, 64);
		assert_eq!(color.a, 255);
	}

	#[test]
	fn test_color_rgba32_roundtrip() {
		let color = Color::rgb(255, 128, 64);
		assert_eq!(Color::from_rgba32(color.to_rgba32()), color);
	}

	#[test]
	fn test_palette_get_set() {
		let mut palette = Palette::new();
		let color = Color::rgb(255, 128, 64);

		palette.set(42, color);
		assert_eq!(palette.get(42), color);
	}

	#[test]
	fn test_palette_index() {
		let mut palette = Palette::new();
		let color = Color::rgb(255, 128, 64);

		palette[42] = color;
		assert_eq!(palette[42], color);
	}

	#[test]
	fn test_palette_from_bytes_too_short() {
		let err = Palette::from_bytes(&[0u8; 16]).unwrap_err();
		assert!(matches!(err, SpfFileError::InsufficientData { .. }));
	}

	#[test]
	fn test_palette_from_bytes() {
		let mut data = vec![0u8; Palette::PAL_FILE_SIZE];

		// Set color 1 to red
		data[4] = 255; // R
		data[5] = 0; // G
		data[6] = 0; // B
		data[7] = 0; // X

		let palette = Palette::from_bytes(&data).unwrap();
		assert_eq!(palette.get(1), Color::rgb(255, 0, 0));

		// Index 0 always reads back as the transparency key
		assert_eq!(palette.get(0), Color::transparent());
	}

	#[test]
	fn test_palette_roundtrip() {
		let mut original = Palette::new();
		original.set(1, Color::rgb(255, 0, 0));
		original.set(10, Color::rgb(0, 255, 0));
		original.set(255, Color::rgb(0, 0, 255));

		let bytes = original.to_bytes();
		assert_eq!(bytes.len(), Palette::PAL_FILE_SIZE);

		let loaded = Palette::from_bytes(&bytes).unwrap();
		assert_eq!(loaded.get(1), Color::rgb(255, 0, 0));
		assert_eq!(loaded.get(10), Color::rgb(0, 255, 0));
		assert_eq!(loaded.get(255), Color::rgb(0, 0, 255));
	}
}
