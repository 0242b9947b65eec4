use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Timing of the transition animation.
pub struct AnimationOptions {
    /// Nominal duration of a full transition in seconds.
    #[schemars(title = "Duration", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub duration_secs: f32,
    /// Spring damping ratio (1.0 = critically damped, no overshoot).
    #[schemars(title = "Damping", range(min = 0.3, max = 2.0), extend("step" = 0.05))]
    pub damping_ratio: f32,
}

impl AnimationOptions {
    /// Nominal duration as a [`Duration`], rounded to whole microseconds.
    /// Negative or non-finite values yield zero.
    #[must_use]
    pub fn duration(&self) -> Duration {
        if self.duration_secs.is_finite() && self.duration_secs > 0.0 {
            let micros = (f64::from(self.duration_secs) * 1e6).round();
            Duration::from_micros(micros as u64)
        } else {
            Duration::ZERO
        }
    }
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration_secs: 0.6,
            damping_ratio: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_exact_for_decimal_seconds() {
        assert_eq!(AnimationOptions::default().duration(), Duration::from_millis(600));
        let snappy = AnimationOptions {
            duration_secs: 0.35,
            ..AnimationOptions::default()
        };
        assert_eq!(snappy.duration(), Duration::from_millis(350));
    }

    #[test]
    fn invalid_duration_is_zero() {
        for secs in [-1.0, 0.0, f32::NAN, f32::INFINITY] {
            let opts = AnimationOptions {
                duration_secs: secs,
                ..AnimationOptions::default()
            };
            assert_eq!(opts.duration(), Duration::ZERO);
        }
    }
}
