//! Error types for file format parsing and manipulation.

use std::fmt;

use thiserror::Error;

/// File formats handled by this crate, used to tag errors with their origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
	/// SPF sprite container
	Spf,
	/// PAL palette file
	Pal,
}

impl fmt::Display for FileType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Spf => write!(f, "SPF"),
			Self::Pal => write!(f, "PAL"),
		}
	}
}

/// Errors that can occur when parsing or manipulating SPF/PAL files
#[derive(Debug, Error)]
pub enum SpfFileError {
	/// Not enough data to parse
	#[error("{file_type}: insufficient data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// File format being parsed
		file_type: FileType,
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Invalid magic number
	#[error("invalid magic number: {0:02X?}")]
	InvalidMagic([u8; 4]),

	/// Frame descriptor points outside the data area
	#[error("frame {index} data out of range: needs bytes {start}..{end}, data area is {available} bytes")]
	FrameDataOutOfRange {
		/// Frame index (0-based)
		index: usize,
		/// First byte required (relative to data area start)
		start: usize,
		/// One past the last byte required
		end: usize,
		/// Bytes available in the data area
		available: usize,
	},

	/// Frame pixel buffer does not match the descriptor dimensions
	#[error("pixel count mismatch: descriptor is {width}x{height} ({expected} pixels), buffer holds {actual}")]
	PixelCountMismatch {
		/// Frame width in pixels
		width: u32,
		/// Frame height in pixels
		height: u32,
		/// Expected pixel count
		expected: usize,
		/// Actual pixel count
		actual: usize,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl SpfFileError {
	/// Creates an `InsufficientData` error.
	pub fn insufficient_data(file_type: FileType, expected: usize, actual: usize) -> Self {
		Self::InsufficientData {
			file_type,
			expected,
			actual,
		}
	}
}
