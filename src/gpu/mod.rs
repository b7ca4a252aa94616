//! Rendering runtime: the backend trait the viewer draws through and the
//! wgpu render context that implements it.

/// Backend trait, render paths and per-eye views.
pub mod backend;
/// Core wgpu render context (device, queue, offscreen target).
pub mod render_context;

pub use backend::{EyeView, FrameContext, RenderBackend, RenderPath, Viewport};
pub use render_context::{RenderContext, RenderContextError};
