//! This crate provides the binary file format support for the `spflogo` project.
//!
//! # File Formats
//!
//! - **SPF**: Sprite container holding an ordered sequence of 8-bit indexed
//!   animation frames (header, frame descriptors, pixel data area)
//! - **PAL**: 256-color palette file accompanying an SPF (RGBX entries,
//!   index 0 reserved as the transparency key)
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use spf_types::prelude::*;
//!
//! # fn main() -> Result<(), SpfFileError> {
//! let spf = SpfFile::open("LOGO.SPF")?;
//! let pal = Palette::from_file("LOGO.PAL")?;
//!
//! println!("frames: {}", spf.frame_count());
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use spf_types::file::spf::{File, Palette};
//!
//! let spf = File::new();
//! let pal = Palette::new();
//! ```

pub mod file;

/// `use spf_types::prelude::*;` to import commonly used items.
pub mod prelude;
