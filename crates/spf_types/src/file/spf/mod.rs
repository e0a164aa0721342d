//! `.SPF` file format support for the `spflogo` project.
//!
//! This module provides support for building and loading SPF sprite
//! containers, the animated sprite format consumed by the target game
//! client's login screen. An SPF file holds an ordered sequence of
//! palette-indexed frames; the colors live in a companion `.PAL` file
//! (see [`palette`]).
//!
//! # File Structure
//!
//! The SPF file format consists of:
//! - **Header (0x00-0x0F):** Magic bytes, frame count and reserved bytes
//! - **Frame Descriptors:** Metadata entries (20 bytes each) describing each frame
//! - **Data Area:** Raw 8-bit indexed pixel data, one run per frame
//!
//! # Frame Descriptor Format
//!
//! Each frame descriptor (20 bytes) contains:
//! - Data offset (4 bytes, little-endian, relative to data area start)
//! - Width (4 bytes, little-endian)
//! - Height (4 bytes, little-endian)
//! - Hotspot X (4 bytes, little-endian)
//! - Hotspot Y (4 bytes, little-endian)
//!
//! # Pixel Format
//!
//! Frame pixels are 8-bit palette indices, row-major. Index 0 is the
//! transparency key and is never a visible color.
//!
//! # Usage Examples
//!
//! ## Loading an SPF file
//!
//! ```no_run
//! use spf_types::file::spf::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let spf = File::open("LOGO.SPF")?;
//!
//! println!("Total frames: {}", spf.frame_count());
//!
//! if let Some(frame) = spf.get_frame(0) {
//!     println!("Frame 0: {}x{}", frame.width(), frame.height());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Creating a new SPF file
//!
//! ```no_run
//! use spf_types::file::spf::{File, Frame, FrameEntry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut spf = File::new();
//!
//! // Create a simple 10x10 frame, fully transparent
//! let entry = FrameEntry::new(0, 10, 10, 5, 5);
//! let frame = Frame::new(entry, vec![0u8; 100]);
//!
//! spf.add_frame(frame)?;
//! spf.save("LOGO.SPF")?;
//! # Ok(())
//! # }
//! ```

use std::io::Cursor;

use crate::file::{FileType, SpfFileError};

pub mod frame;
pub mod palette;

pub use frame::{Frame, FrameEntry, FrameRowIterator};
pub use palette::{Color, Palette};

/// SPF file constants.
pub mod constants {
	/// Magic bytes at the start of every SPF file
	pub const MAGIC: [u8; 4] = *b"SPF1";

	/// Size of the file header (16 bytes: magic + `frame_count` + reserved)
	pub const HEADER_SIZE: usize = 16;

	/// Size of each frame descriptor entry (20 bytes)
	pub const FRAME_DESCRIPTOR_SIZE: usize = 20;

	/// Offset of frame count in the header
	pub const FRAME_COUNT_OFFSET: usize = 4;

	/// Size of reserved bytes in header
	pub const RESERVED_SIZE: usize = 8;
}

/// SPF file structure, representing a complete sprite animation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	/// Complete file data
	raw: Vec<u8>,

	/// Number of frames in the file
	frame_count: u32,

	/// Frame entries (descriptors)
	entries: Vec<FrameEntry>,
}

impl File {
	/// Creates a new empty SPF file.
	pub fn new() -> Self {
		let mut raw = vec![0u8; constants::HEADER_SIZE];
		raw[..4].copy_from_slice(&constants::MAGIC);
		// Frame count is 0 (already initialized)

		Self {
			raw,
			frame_count: 0,
			entries: Vec::new(),
		}
	}

	/// Opens an SPF file from the specified path.
	///
	/// # Arguments
	///
	/// * `path` - Path to the SPF file.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - The file cannot be opened or read
	/// - The file is too small to contain required headers
	/// - The magic bytes are wrong
	/// - The frame descriptors are invalid
	pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, SpfFileError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Returns the number of frames in the file.
	pub fn frame_count(&self) -> u32 {
		self.frame_count
	}

	/// Returns a reference to the frame entries.
	pub fn entries(&self) -> &[FrameEntry] {
		&self.entries
	}

	/// Returns a specific frame entry by index.
	///
	/// # Arguments
	///
	/// * `index` - Frame index (0-based)
	///
	/// # Returns
	///
	/// The frame entry, or None if the index is out of range.
	pub fn get_entry(&self, index: usize) -> Option<&FrameEntry> {
		self.entries.get(index)
	}

	/// Gets a complete frame (entry + pixel data) by index.
	///
	/// # Arguments
	///
	/// * `index` - Frame index (0-based)
	///
	/// # Returns
	///
	/// The complete frame with its indexed pixel data, or None if the
	/// index is out of range or the data is invalid.
	pub fn get_frame(&self, index: usize) -> Option<Frame> {
		let entry = self.entries.get(index)?;

		let data_start = self.data_area_start();
		let pixel_start = data_start + entry.data_offset as usize;
		let pixel_end = pixel_start + entry.pixel_count();

		if pixel_end > self.raw.len() {
			return None;
		}

		let pixels = self.raw[pixel_start..pixel_end].to_vec();

		Some(Frame::new(*entry, pixels))
	}

	/// Returns an iterator over all frames in the file.
	pub fn iter(&self) -> FrameIterator<'_> {
		FrameIterator {
			file: self,
			current_index: 0,
		}
	}

	/// Calculates the start offset of the data area.
	///
	/// Data area starts after header and all frame descriptors.
	#[inline]
	fn data_area_start(&self) -> usize {
		constants::HEADER_SIZE + (self.frame_count as usize * constants::FRAME_DESCRIPTOR_SIZE)
	}

	/// Adds a new frame to the SPF file.
	///
	/// The frame is appended at the end of the animation; frame order in
	/// the container is the order of `add_frame` calls.
	///
	/// # Arguments
	///
	/// * `frame` - The frame to add
	///
	/// # Errors
	///
	/// Returns an error if the frame's pixel buffer does not match its
	/// descriptor dimensions.
	pub fn add_frame(&mut self, frame: Frame) -> Result<(), SpfFileError> {
		if frame.pixels().len() != frame.entry().pixel_count() {
			return Err(SpfFileError::PixelCountMismatch {
				width: frame.width(),
				height: frame.height(),
				expected: frame.entry().pixel_count(),
				actual: frame.pixels().len(),
			});
		}

		// Calculate current data area size
		let current_data_start = self.data_area_start();
		let current_data_size = self.raw.len().saturating_sub(current_data_start);

		// Offset for the new frame data, relative to data area start
		let data_offset = current_data_size as u32;

		let new_entry = FrameEntry::new(
			data_offset,
			frame.width(),
			frame.height(),
			frame.hotspot_x(),
			frame.hotspot_y(),
		);

		// Build new raw data
		let new_frame_count = self.frame_count + 1;
		let new_descriptors_size = new_frame_count as usize * constants::FRAME_DESCRIPTOR_SIZE;
		let new_header_and_descriptors_size = constants::HEADER_SIZE + new_descriptors_size;

		let mut new_raw = Vec::with_capacity(
			new_header_and_descriptors_size + current_data_size + frame.pixels().len(),
		);

		// Write header
		new_raw.extend_from_slice(&constants::MAGIC);
		new_raw.extend_from_slice(&new_frame_count.to_le_bytes());
		new_raw.extend_from_slice(&[0u8; constants::RESERVED_SIZE]);

		// Write all frame descriptors (existing + new)
		for entry in self.entries.iter().chain(std::iter::once(&new_entry)) {
			new_raw.extend_from_slice(&entry.data_offset.to_le_bytes());
			new_raw.extend_from_slice(&entry.width.to_le_bytes());
			new_raw.extend_from_slice(&entry.height.to_le_bytes());
			new_raw.extend_from_slice(&entry.hotspot_x.to_le_bytes());
			new_raw.extend_from_slice(&entry.hotspot_y.to_le_bytes());
		}

		// Write existing data area
		if current_data_start < self.raw.len() {
			new_raw.extend_from_slice(&self.raw[current_data_start..]);
		}

		// Write new frame data
		new_raw.extend_from_slice(frame.pixels());

		// Update state
		self.raw = new_raw;
		self.frame_count = new_frame_count;
		self.entries.push(new_entry);

		Ok(())
	}

	/// Saves the SPF file to disk.
	///
	/// # Arguments
	///
	/// * `path` - Output file path
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be written.
	pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), SpfFileError> {
		std::fs::write(path, &self.raw)?;
		Ok(())
	}

	/// Serializes the SPF file to bytes.
	pub fn to_bytes(&self) -> Vec<u8> {
		self.raw.clone()
	}

	/// Loads an SPF file from a byte slice.
	///
	/// # Arguments
	///
	/// * `data` - Raw file data
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - The file is too small to contain the header
	/// - The magic bytes are wrong
	/// - Frame descriptors are invalid
	/// - Data offsets are out of bounds
	pub fn from_bytes(data: &[u8]) -> Result<Self, SpfFileError> {
		let mut cursor = Cursor::new(data);
		Self::from_reader(&mut cursor)
	}

	/// Loads an SPF file from any reader.
	///
	/// # Arguments
	///
	/// * `reader` - Data reader
	///
	/// # Errors
	///
	/// Returns an error if the file structure is invalid.
	pub fn from_reader<R: std::io::Read>(reader: &mut R) -> Result<Self, SpfFileError> {
		// Read entire file
		let mut raw = Vec::new();
		reader.read_to_end(&mut raw)?;

		// Validate minimum file size
		if raw.len() < constants::HEADER_SIZE {
			return Err(SpfFileError::insufficient_data(
				FileType::Spf,
				constants::HEADER_SIZE,
				raw.len(),
			));
		}

		// Validate magic
		let magic = [raw[0], raw[1], raw[2], raw[3]];
		if magic != constants::MAGIC {
			return Err(SpfFileError::InvalidMagic(magic));
		}

		// Read frame count from header
		let frame_count = u32::from_le_bytes([
			raw[constants::FRAME_COUNT_OFFSET],
			raw[constants::FRAME_COUNT_OFFSET + 1],
			raw[constants::FRAME_COUNT_OFFSET + 2],
			raw[constants::FRAME_COUNT_OFFSET + 3],
		]);

		// Calculate expected size for header + descriptors
		let descriptors_size = frame_count as usize * constants::FRAME_DESCRIPTOR_SIZE;
		let header_and_descriptors_size = constants::HEADER_SIZE + descriptors_size;

		if raw.len() < header_and_descriptors_size {
			return Err(SpfFileError::insufficient_data(
				FileType::Spf,
				header_and_descriptors_size,
				raw.len(),
			));
		}

		// Parse frame descriptors
		let data_area_size = raw.len() - header_and_descriptors_size;
		let mut entries = Vec::with_capacity(frame_count as usize);
		for i in 0..frame_count as usize {
			let offset = constants::HEADER_SIZE + i * constants::FRAME_DESCRIPTOR_SIZE;

			let data_offset = u32::from_le_bytes([
				raw[offset],
				raw[offset + 1],
				raw[offset + 2],
				raw[offset + 3],
			]);

			let width = u32::from_le_bytes([
				raw[offset + 4],
				raw[offset + 5],
				raw[offset + 6],
				raw[offset + 7],
			]);

			let height = u32::from_le_bytes([
				raw[offset + 8],
				raw[offset + 9],
				raw[offset + 10],
				raw[offset + 11],
			]);

			let hotspot_x = u32::from_le_bytes([
				raw[offset + 12],
				raw[offset + 13],
				raw[offset + 14],
				raw[offset + 15],
			]);

			let hotspot_y = u32::from_le_bytes([
				raw[offset + 16],
				raw[offset + 17],
				raw[offset + 18],
				raw[offset + 19],
			]);

			let entry = FrameEntry::new(data_offset, width, height, hotspot_x, hotspot_y);

			// Validate the descriptor against the data area
			let start = entry.data_offset as usize;
			let end = start + entry.pixel_count();
			if end > data_area_size {
				return Err(SpfFileError::FrameDataOutOfRange {
					index: i,
					start,
					end,
					available: data_area_size,
				});
			}

			entries.push(entry);
		}

		Ok(Self {
			raw,
			frame_count,
			entries,
		})
	}
}

impl Default for File {
	fn default() -> Self {
		Self::new()
	}
}

/// Iterator over the frames of an SPF [`File`].
pub struct FrameIterator<'a> {
	file: &'a File,
	current_index: usize,
}

impl Iterator for FrameIterator<'_> {
	type Item = Frame;

	fn next(&mut self) -> Option<Self::Item> {
		let frame = self.file.get_frame(self.current_index)?;
		self.current_index += 1;
		Some(frame)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn checker_frame(width: u32, height: u32) -> Frame {
		let entry = FrameEntry::new(0, width, height, width / 2, height / 2);
		let pixels = (0..width * height).map(|i| (i % 2) as u8 + 1).collect();
		Frame::new(entry, pixels)
	}

	#[test]
	fn test_new_file_header() {
		let file = File::new();
		let bytes = file.to_bytes();

		assert_eq!(bytes.len(), constants::HEADER_SIZE);
		assert_eq!(&bytes[..4], &constants::MAGIC);
		assert_eq!(file.frame_count(), 0);
	}

	#[test]
	fn test_add_frame_and_get() {
		let mut file = File::new();
		file.add_frame(checker_frame(4, 2)).unwrap();

		assert_eq!(file.frame_count(), 1);

		let frame = file.get_frame(0).unwrap();
		assert_eq!(frame.width(), 4);
		assert_eq!(frame.height(), 2);
		assert_eq!(frame.hotspot_x(), 2);
		assert_eq!(frame.pixels().len(), 8);
	}

	#[test]
	fn test_add_frame_rejects_bad_pixel_count() {
		let mut file = File::new();
		let entry = FrameEntry::new(0, 4, 4, 2, 2);
		let frame = Frame::new(entry, vec![1u8; 3]);

		let err = file.add_frame(frame).unwrap_err();
		assert!(matches!(err, SpfFileError::PixelCountMismatch { .. }));
	}

	#[test]
	fn test_roundtrip_preserves_frame_order() {
		let mut file = File::new();
		for i in 0..5u8 {
			let entry = FrameEntry::new(0, 2, 2, 1, 1);
			file.add_frame(Frame::new(entry, vec![i + 1; 4])).unwrap();
		}

		let loaded = File::from_bytes(&file.to_bytes()).unwrap();
		assert_eq!(loaded.frame_count(), 5);

		for (i, frame) in loaded.iter().enumerate() {
			assert_eq!(frame.pixels(), &[i as u8 + 1; 4]);
		}
	}

	#[test]
	fn test_from_bytes_rejects_short_header() {
		let err = File::from_bytes(&[0u8; 4]).unwrap_err();
		assert!(matches!(err, SpfFileError::InsufficientData { .. }));
	}

	#[test]
	fn test_from_bytes_rejects_bad_magic() {
		let mut data = vec![0u8; constants::HEADER_SIZE];
		data[..4].copy_from_slice(b"NOPE");

		let err = File::from_bytes(&data).unwrap_err();
		assert!(matches!(err, SpfFileError::InvalidMagic(_)));
	}

	#[test]
	fn test_from_bytes_rejects_truncated_descriptors() {
		let mut file = File::new();
		file.add_frame(checker_frame(4, 4)).unwrap();

		let bytes = file.to_bytes();
		// Chop the file in the middle of the descriptor table
		let err = File::from_bytes(&bytes[..constants::HEADER_SIZE + 8]).unwrap_err();
		assert!(matches!(err, SpfFileError::InsufficientData { .. }));
	}

	#[test]
	fn test_from_bytes_rejects_out_of_range_descriptor() {
		let mut file = File::new();
		file.add_frame(checker_frame(4, 4)).unwrap();

		// Drop the last pixel byte so the descriptor overruns the data area
		let mut bytes = file.to_bytes();
		bytes.pop();

		let err = File::from_bytes(&bytes).unwrap_err();
		assert!(matches!(err, SpfFileError::FrameDataOutOfRange { .. }));
	}

	#[test]
	fn test_get_frame_out_of_range() {
		let file = File::new();
		assert!(file.get_frame(0).is_none());
	}
}
