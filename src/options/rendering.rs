use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Rendering", inline)]
#[serde(default)]
/// Frame scheduling and render-target options.
pub struct RenderingOptions {
    /// Render only on change notifications instead of every tick.
    #[schemars(title = "Passive Rendering")]
    pub passive: bool,
    /// Clear color of the render target.
    #[schemars(skip)]
    pub clear_color: [f32; 3],
}
