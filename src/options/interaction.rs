use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Interaction", inline)]
#[serde(default)]
/// Pointer, reticle and infospot behaviour.
pub struct InteractionOptions {
    /// Per-axis pixel distance between press and release still counted as
    /// a click.
    #[schemars(
        title = "Click Tolerance",
        range(min = 0.0, max = 50.0),
        extend("step" = 1.0)
    )]
    pub click_tolerance: f32,
    /// Use the gaze reticle instead of direct pointer input.
    #[schemars(title = "Enable Reticle")]
    pub enable_reticle: bool,
    /// Gaze time before the reticle synthesizes a click, in milliseconds.
    #[schemars(title = "Dwell Time (ms)", range(min = 100, max = 10000))]
    pub dwell_time_ms: u64,
    /// Let the reticle click automatically after the dwell time.
    #[schemars(title = "Auto Reticle Select")]
    pub auto_reticle_select: bool,
    /// Toggle infospot visibility when a click lands on no infospot.
    #[schemars(title = "Auto-hide Infospots")]
    pub auto_hide_infospot: bool,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            click_tolerance: 10.0,
            enable_reticle: false,
            dwell_time_ms: 1500,
            auto_reticle_select: true,
            auto_hide_infospot: true,
        }
    }
}
