use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Pull", inline)]
#[serde(default)]
/// Where a pull on the driving scroll surface starts a transition.
pub struct PullOptions {
    /// Resting top inset of the scroll surface (bars above the content).
    #[schemars(title = "Trigger Threshold", range(min = 0.0, max = 200.0), extend("step" = 1.0))]
    pub trigger_threshold: f32,
    /// Extra travel past the trigger threshold before the pull fires.
    #[schemars(title = "Travel Threshold", range(min = 0.0, max = 200.0), extend("step" = 1.0))]
    pub travel_threshold: f32,
}
