// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interaction, display-mode and render-scheduling core for 360°
//! panorama viewers.
//!
//! Panoview turns raw pointer, touch, gaze and sensor input into semantic
//! events on scene objects, switches between normal and stereo (VR)
//! viewing, and decides when a frame needs drawing. Drawing itself goes
//! through a pluggable [`gpu::RenderBackend`].
//!
//! # Key entry points
//!
//! - [`Viewer`] - owns the scene, camera and input state; the host drives
//!   it with [`Viewer::frame`] and [`Viewer::handle_input`]
//! - [`scene::Scene`] - object tree with per-object event listeners
//! - [`options::Options`] - runtime configuration (camera, interaction,
//!   rendering, control bar)
//! - [`schedule::RenderScheduler`] - continuous vs. passive frame
//!   scheduling
//!
//! # Architecture
//!
//! Everything runs on the host's thread. Each refresh the host calls
//! [`Viewer::frame`]; the scheduler hands back the frame callbacks that
//! are due (main loop, video pump, reticle dwell timer) and the viewer
//! runs them in order. In passive mode renders only happen when something
//! calls [`Viewer::notify_change`], and notifications raised while a frame
//! runs collapse into a single render.

pub mod animation;
pub mod camera;
pub mod error;
pub mod events;
pub mod gpu;
pub mod input;
pub mod options;
pub mod picking;
pub mod scene;
pub mod schedule;
pub mod util;
pub mod viewer;

pub use error::ViewerError;
pub use input::{InputEvent, PointerEvent, PointerPhase};
pub use options::Options;
pub use viewer::{
    CallbackId, Mode, Viewer, ViewerBuilder, ViewerEvent, ViewerEventKind,
    WidgetCommand,
};
