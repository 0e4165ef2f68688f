//! Common types and descriptors for task graph resources.
//!
//! This module contains geometric types, format enums, usage flags, and the
//! [`TextureInfo`] shape descriptor used throughout the crate.

mod common;
mod texture;

pub use common::{Extent2d, Offset2d, Viewport};
pub use texture::{TextureFormat, TextureInfo, TextureUsage};
