//! `spflogo` converts a short video clip into a packed SPF/PAL asset pair,
//! an animated login-screen logo for the target game client.
//!
//! The conversion is a strictly sequential five-stage pipeline:
//!
//! 1. [`sampler`] — probe the video and dump an evenly spaced subset of its
//!    frames to disk
//! 2. [`mask`] — rasterize the elliptical transparency mask from the
//!    reference logo's dimensions
//! 3. [`compositor`] — resize each sampled frame and clip it with the mask
//!    (destination-in)
//! 4. [`loader`] — re-read the composited frames from disk, in order
//! 5. [`packer`] — quantize the frame set against one shared palette and
//!    build the SPF container plus its PAL file
//!
//! Frame order is preserved end-to-end: sample index, file name, load order
//! and pack order all agree, which is what makes the packed animation
//! coherent. [`pipeline::run`] drives the whole thing.

pub mod compositor;
pub mod error;
pub mod loader;
pub mod mask;
pub mod packer;
pub mod pipeline;
pub mod sampler;
pub mod video;

pub use error::LogoError;

// Re-export the format crate for convenience
pub use spf_types;
