//! Error types.

use thiserror::Error;

use crate::types::Extent2d;

/// Errors reported by resource providers, draw passes, and command buffers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// Failed to create a resource.
    #[error("resource creation failed: {0}")]
    ResourceCreationFailed(String),
    /// An invalid parameter was provided.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// Out of GPU memory.
    #[error("out of GPU memory")]
    OutOfMemory,
    /// The GPU device was lost.
    #[error("GPU device lost")]
    DeviceLost,
    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failures of a task during preparation or command emission.
///
/// Every variant is recoverable at the graph level: the driver is expected to
/// abort the current graph execution rather than retry the task.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The render target could not be instantiated.
    #[error("failed to instantiate render pass target ({dimensions})")]
    TargetInstantiation {
        /// Dimensions of the target proxy.
        dimensions: Extent2d,
        #[source]
        source: GraphicsError,
    },
    /// A draw pass failed to prepare its resources.
    #[error("draw pass {index} failed to prepare resources")]
    DrawPassPreparation {
        /// Index of the failing draw pass.
        index: usize,
        #[source]
        source: GraphicsError,
    },
    /// No multisampled color attachment could be obtained.
    #[error("could not get color attachment ({dimensions})")]
    ColorAttachment {
        /// Requested attachment dimensions.
        dimensions: Extent2d,
        #[source]
        source: GraphicsError,
    },
    /// No depth/stencil attachment could be obtained.
    #[error("could not get depth/stencil attachment ({dimensions})")]
    DepthStencilAttachment {
        /// Requested attachment dimensions.
        dimensions: Extent2d,
        #[source]
        source: GraphicsError,
    },
    /// The command buffer rejected the render pass.
    #[error("command buffer rejected render pass")]
    Submission {
        #[source]
        source: GraphicsError,
    },
}
