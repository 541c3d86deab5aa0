//! Clip-pack manifests and sprite-sheet slicing.
//!
//! A clip pack is a TOML manifest describing a sprite sheet's frame
//! grid and a set of named clips (row, frame count, timing, loop
//! policy), from which [`flick_anim::FrameCycler`]s are built. The
//! [`sheet`] module decodes the PNG sheet itself, verifies it against
//! the manifest grid, and slices clips into raw RGBA frames.

pub mod manifest;
pub mod sheet;

pub use manifest::{ClipSpec, PackManifest, SheetGeometry};
pub use sheet::FrameImage;
