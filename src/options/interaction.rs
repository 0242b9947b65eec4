use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Interaction", inline)]
#[serde(default)]
/// Tuning constants of the completion policy and momentum hand-off.
///
/// The defaults were tuned against touch input on a phone; override them
/// per preset rather than editing the policy.
pub struct InteractionOptions {
    /// Fraction beyond which a slow release completes the transition.
    #[schemars(title = "Completion Threshold", range(min = 0.05, max = 0.5), extend("step" = 0.01))]
    pub completion_threshold: f32,
    /// Release speed (points/s) above which a reversed run is not slowed
    /// down.
    #[schemars(title = "Velocity Threshold", range(min = 100.0, max = 2000.0), extend("step" = 10.0))]
    pub velocity_threshold: f32,
    /// Damping applied to the release velocity before it seeds the spring.
    #[schemars(skip)]
    pub velocity_scalar: f32,
    /// Release speed (points/s) that counts as a flick.
    #[schemars(title = "Flick Magnitude", range(min = 400.0, max = 4000.0), extend("step" = 50.0))]
    pub flick_magnitude: f32,
    /// Number of Change samples below which a release always completes.
    #[schemars(skip)]
    pub grace_updates: u32,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            completion_threshold: 0.20,
            velocity_threshold: 500.0,
            velocity_scalar: 0.005,
            flick_magnitude: 1200.0,
            grace_updates: 2,
        }
    }
}
