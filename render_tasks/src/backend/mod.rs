//! Backend implementations of the resource and command interfaces.
//!
//! Only the headless dummy backend lives in this crate. GPU backends implement
//! [`ResourceProvider`](crate::ResourceProvider),
//! [`CommandBuffer`](crate::CommandBuffer), and [`DrawPass`](crate::DrawPass)
//! in their own crates.

#[cfg(feature = "dummy")]
pub mod dummy;
