//! File type support for the `spflogo` project.

mod error;

pub mod spf;

/// Palette index reserved for fully transparent pixels.
pub const TRANSPARENT_INDEX: u8 = 0;

// Re-export unified error type
pub use error::{FileType, SpfFileError};

// Re-export main file types
pub use spf::{File as SpfFile, Frame as SpfFrame, FrameEntry as SpfFrameEntry};
pub use spf::palette::{Color, Palette};
