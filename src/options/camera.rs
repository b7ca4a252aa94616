use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and orbit-control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(
        title = "Field of View",
        range(min = 30.0, max = 120.0),
        extend("step" = 1.0)
    )]
    pub fov: f32,
    /// Rotation sensitivity multiplier.
    #[schemars(
        title = "Rotate Speed",
        range(min = 0.1, max = 4.0),
        extend("step" = 0.05)
    )]
    pub rotate_speed: f32,
    /// Flip the drag direction of the orbit control.
    #[schemars(title = "Reverse Drag")]
    pub reverse_drag: bool,
    /// Restrict the orbit control to horizontal looking.
    #[schemars(title = "Horizontal Only")]
    pub horizontal_only: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov: 60.0,
            rotate_speed: 1.0,
            reverse_drag: false,
            horizontal_only: false,
        }
    }
}
