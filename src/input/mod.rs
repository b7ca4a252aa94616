//! Input handling: platform-agnostic event types, the unified pointer
//! state machine, and the gaze reticle.

/// Platform-agnostic input events.
pub mod event;
/// Hover/press/click state machine.
pub mod pointer;
/// Dwell-timer reticle selection.
pub mod reticle;
/// winit window-event conversion.
#[cfg(feature = "viewer")]
pub mod window;

pub use event::{InputEvent, PointerEvent, PointerPhase, PointerSource};
pub use pointer::{
    EvalContext, Evaluation, InteractionState, PointerState,
    PointerStateMachine, Tap,
};
pub use reticle::{DwellCheck, ReticleSelector};
