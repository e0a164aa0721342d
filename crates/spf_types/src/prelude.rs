//! Prelude module for `spf_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use spf_types::prelude::*;
//!
//! let mut spf = SpfFile::new();
//! let pal = Palette::grayscale();
//! ```

#[doc(inline)]
pub use crate::file::{
	Color,
	FileType,
	Palette,
	// SPF types
	SpfFile,
	// Error types
	SpfFileError,
	SpfFrame,
	SpfFrameEntry,
	// Palette constants
	TRANSPARENT_INDEX,
};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
