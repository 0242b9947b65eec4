//! Damped spring curve for momentum continuation runs.
//!
//! A continuation run moves the scrub fraction from wherever the gesture left
//! it toward 0 or 1. Its shape is the step response of a damped harmonic
//! oscillator, evaluated in closed form so a run is a pure function of
//! elapsed time:
//!
//! - underdamped (ζ < 1): overshoots, then settles
//! - critically damped (ζ = 1): fastest approach without overshoot
//! - overdamped (ζ > 1): slow approach, no overshoot
//!
//! The natural frequency is fitted to the run's duration so that a
//! critically damped spring is within 0.1% of its target when the duration
//! elapses. The run snaps to its target at that point.

use web_time::Duration;

/// ω·T at which a critically damped step response is within 0.1% of target.
const SETTLE_CONSTANT: f32 = 9.23;

/// Lowest damping ratio accepted; below this the run never settles visibly.
const MIN_DAMPING_RATIO: f32 = 0.05;

/// Damping ratios within this distance of 1.0 use the critical solution.
const CRITICAL_EPSILON: f32 = 1e-3;

/// Timing of a spring-driven run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringTiming {
    /// Damping ratio ζ (1.0 = critically damped).
    pub damping_ratio: f32,
    /// Initial velocity toward the run's target, in units of the run's
    /// total distance per second.
    pub initial_velocity: f32,
}

impl SpringTiming {
    /// A spring with the given damping ratio starting at rest.
    #[must_use]
    pub fn new(damping_ratio: f32) -> Self {
        Self {
            damping_ratio,
            initial_velocity: 0.0,
        }
    }

    /// Set the initial velocity (builder pattern).
    #[must_use]
    pub fn with_initial_velocity(mut self, velocity: f32) -> Self {
        self.initial_velocity = velocity;
        self
    }
}

impl Default for SpringTiming {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Normalized step response of a spring fitted to a duration.
///
/// `value(0) == 0`, `value'(0) == initial_velocity`, and `value(t)`
/// approaches 1 as `t` approaches the fitted duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringCurve {
    omega: f32,
    zeta: f32,
    v0: f32,
}

impl SpringCurve {
    /// Fit `timing` to a run lasting `duration`.
    #[must_use]
    pub fn new(timing: SpringTiming, duration: Duration) -> Self {
        let secs = duration.as_secs_f32();
        let omega = if secs > 0.0 {
            SETTLE_CONSTANT / secs
        } else {
            f32::INFINITY
        };
        Self {
            omega,
            zeta: timing.damping_ratio.max(MIN_DAMPING_RATIO),
            v0: timing.initial_velocity,
        }
    }

    /// Natural angular frequency in radians per second.
    #[must_use]
    pub fn omega(&self) -> f32 {
        self.omega
    }

    /// Progress of the run (0 = origin, 1 = target) after `t` seconds.
    ///
    /// May exceed 1 for underdamped springs or strong initial velocities;
    /// callers clamp to their own range.
    #[must_use]
    pub fn value(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if !self.omega.is_finite() {
            return 1.0;
        }
        let w = self.omega;
        let z = self.zeta;
        if (z - 1.0).abs() < CRITICAL_EPSILON {
            1.0 - (-w * t).exp() * (1.0 + (w - self.v0) * t)
        } else if z < 1.0 {
            let wd = w * (1.0 - z * z).sqrt();
            let envelope = (-z * w * t).exp();
            let b = (z * w - self.v0) / wd;
            1.0 - envelope * ((wd * t).cos() + b * (wd * t).sin())
        } else {
            let root = (z * z - 1.0).sqrt();
            let r1 = -w * (z - root);
            let r2 = -w * (z + root);
            let c2 = (-self.v0 - r1) / (r2 - r1);
            let c1 = 1.0 - c2;
            1.0 - (c1 * (r1 * t).exp() + c2 * (r2 * t).exp())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(zeta: f32, v0: f32) -> SpringCurve {
        SpringCurve::new(
            SpringTiming::new(zeta).with_initial_velocity(v0),
            Duration::from_millis(600),
        )
    }

    #[test]
    fn starts_at_zero_and_settles_by_duration() {
        for zeta in [0.5, 1.0, 1.4] {
            let c = curve(zeta, 0.0);
            assert_eq!(c.value(0.0), 0.0);
            assert!(
                (c.value(0.6) - 1.0).abs() < 0.05,
                "zeta {zeta} ended at {}",
                c.value(0.6)
            );
        }
    }

    #[test]
    fn critical_damping_never_overshoots_from_rest() {
        let c = curve(1.0, 0.0);
        let mut prev = 0.0;
        for i in 1..=60 {
            let v = c.value(i as f32 * 0.01);
            assert!(v >= prev - 1e-6);
            assert!(v <= 1.0 + 1e-6);
            prev = v;
        }
    }

    #[test]
    fn initial_velocity_matches_slope() {
        for zeta in [0.5, 1.0, 1.4] {
            let c = curve(zeta, 4.0);
            let dt = 1e-4;
            let slope = c.value(dt) / dt;
            assert!((slope - 4.0).abs() < 0.1, "zeta {zeta} slope {slope}");
        }
    }

    #[test]
    fn positive_velocity_runs_ahead_of_rest() {
        let rest = curve(1.0, 0.0);
        let pushed = curve(1.0, 5.0);
        assert!(pushed.value(0.05) > rest.value(0.05));
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let c = SpringCurve::new(SpringTiming::default(), Duration::ZERO);
        assert_eq!(c.value(0.001), 1.0);
        assert_eq!(c.value(0.0), 0.0);
    }
}
