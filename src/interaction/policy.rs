//! Completion policy: where a released gesture sends the transition, and
//! how the momentum run that gets it there is shaped.

use glam::Vec2;

use crate::animation::TransitionOperation;
use crate::options::InteractionOptions;
use crate::util::VectorExt;

/// Terminal position chosen when a gesture ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionPosition {
    /// Cancel: return to the outgoing view.
    Start,
    /// Complete: land on the incoming view.
    End,
}

/// Parameters of the momentum run that follows a decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Continuation {
    /// Whether the run heads back to the start.
    pub reversed: bool,
    /// Fraction the remaining time is measured from; never above
    /// `1 - completion_threshold`.
    pub fraction: f32,
    /// Remaining-time scalar, `1 - fraction`.
    pub duration_factor: f32,
    /// Damped release velocity that seeds the spring.
    pub velocity: Vec2,
}

/// Hybrid threshold/velocity completion policy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompletionPolicy {
    options: InteractionOptions,
}

impl CompletionPolicy {
    /// A policy with the given tuning constants.
    #[must_use]
    pub fn new(options: InteractionOptions) -> Self {
        Self { options }
    }

    /// Tuning constants in use.
    #[must_use]
    pub fn options(&self) -> &InteractionOptions {
        &self.options
    }

    /// Decide where the transition lands. First matching rule wins:
    ///
    /// 1. too few Change samples to trust: complete;
    /// 2. a flick: resolve by vertical direction;
    /// 3. past the completion threshold: complete;
    /// 4. otherwise cancel.
    #[must_use]
    pub fn decide(
        &self,
        update_count: u32,
        fraction: f32,
        velocity: Vec2,
        operation: TransitionOperation,
    ) -> CompletionPosition {
        // Near-instant gestures flash the incoming view if they cancel.
        if update_count <= self.options.grace_updates {
            return CompletionPosition::End;
        }

        let is_flick = velocity.magnitude() > self.options.flick_magnitude;
        let forward = operation.is_forward();
        if is_flick && velocity.y < 0.0 {
            return if forward {
                CompletionPosition::End
            } else {
                CompletionPosition::Start
            };
        }
        if is_flick && velocity.y > 0.0 {
            return if forward {
                CompletionPosition::Start
            } else {
                CompletionPosition::End
            };
        }
        if fraction > self.options.completion_threshold {
            CompletionPosition::End
        } else {
            CompletionPosition::Start
        }
    }

    /// Shape the momentum run toward `position`.
    ///
    /// A cancelling run that is not already moving fast back toward the
    /// start is timed from the midpoint so it does not snap home. Every run
    /// keeps at least `completion_threshold` of the nominal duration.
    #[must_use]
    pub fn continuation(
        &self,
        position: CompletionPosition,
        fraction: f32,
        velocity: Vec2,
        operation: TransitionOperation,
    ) -> Continuation {
        let reversed = position == CompletionPosition::Start;
        let current = fraction.clamp(0.0, 1.0);
        let threshold = self.options.velocity_threshold;

        let mut from = current;
        if reversed {
            let slowdown = if operation.is_forward() {
                velocity.y < threshold
            } else {
                velocity.y > -threshold
            };
            if slowdown {
                from = 0.5;
            }
        }
        let ceiling = 1.0 - self.options.completion_threshold;
        if from > ceiling {
            from = ceiling;
        }

        Continuation {
            reversed,
            fraction: from,
            duration_factor: 1.0 - from,
            velocity: velocity.scaled(self.options.velocity_scalar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUSH: TransitionOperation = TransitionOperation::Push;
    const POP: TransitionOperation = TransitionOperation::Pop;

    fn policy() -> CompletionPolicy {
        CompletionPolicy::default()
    }

    #[test]
    fn grace_period_always_completes() {
        let p = policy();
        for count in 0..=2 {
            let flick_down = Vec2::new(0.0, 5000.0);
            assert_eq!(
                p.decide(count, 0.0, flick_down, PUSH),
                CompletionPosition::End
            );
        }
    }

    #[test]
    fn flick_resolves_by_direction() {
        let p = policy();
        let down = Vec2::new(0.0, 1500.0);
        let up = Vec2::new(0.0, -1500.0);
        assert_eq!(p.decide(5, 0.9, down, PUSH), CompletionPosition::Start);
        assert_eq!(p.decide(5, 0.0, up, PUSH), CompletionPosition::End);
        assert_eq!(p.decide(5, 0.0, down, POP), CompletionPosition::End);
        assert_eq!(p.decide(5, 0.9, up, POP), CompletionPosition::Start);
    }

    #[test]
    fn sideways_flick_falls_through_to_threshold() {
        let p = policy();
        let sideways = Vec2::new(3000.0, 0.0);
        assert_eq!(p.decide(5, 0.25, sideways, PUSH), CompletionPosition::End);
        assert_eq!(p.decide(5, 0.1, sideways, PUSH), CompletionPosition::Start);
    }

    #[test]
    fn slow_release_uses_threshold() {
        let p = policy();
        let slow = Vec2::new(0.0, 100.0);
        assert_eq!(p.decide(5, 0.25, slow, PUSH), CompletionPosition::End);
        assert_eq!(p.decide(5, 0.10, slow, PUSH), CompletionPosition::Start);
        assert_eq!(p.decide(5, 0.20, slow, PUSH), CompletionPosition::Start);
    }

    #[test]
    fn completing_run_is_capped() {
        let c = policy().continuation(
            CompletionPosition::End,
            0.95,
            Vec2::new(0.0, -800.0),
            PUSH,
        );
        assert!(!c.reversed);
        assert!((c.fraction - 0.8).abs() < 1e-6);
        assert!((c.duration_factor - 0.2).abs() < 1e-6);
        assert!((c.velocity.y + 4.0).abs() < 1e-6);
    }

    #[test]
    fn cancelling_run_slows_down_from_midpoint() {
        // Forward operation, finger still moving up: away from the start.
        let c = policy().continuation(
            CompletionPosition::Start,
            0.1,
            Vec2::new(0.0, -200.0),
            PUSH,
        );
        assert!(c.reversed);
        assert_eq!(c.fraction, 0.5);
        assert_eq!(c.duration_factor, 0.5);
    }

    #[test]
    fn fast_return_keeps_current_fraction() {
        // Forward operation, finger flying down toward the start.
        let c = policy().continuation(
            CompletionPosition::Start,
            0.1,
            Vec2::new(0.0, 900.0),
            PUSH,
        );
        assert!((c.fraction - 0.1).abs() < 1e-6);
        assert!((c.duration_factor - 0.9).abs() < 1e-6);

        let c = policy().continuation(
            CompletionPosition::Start,
            0.1,
            Vec2::new(0.0, -900.0),
            POP,
        );
        assert!((c.fraction - 0.1).abs() < 1e-6);
    }

    #[test]
    fn continuation_bounds_hold_across_inputs() {
        let p = policy();
        for i in 0..=20 {
            let fraction = i as f32 / 20.0;
            for vy in [-3000.0, -600.0, 0.0, 600.0, 3000.0] {
                for position in
                    [CompletionPosition::Start, CompletionPosition::End]
                {
                    for op in [PUSH, POP] {
                        let c = p.continuation(
                            position,
                            fraction,
                            Vec2::new(0.0, vy),
                            op,
                        );
                        assert!(c.fraction <= 0.8 + 1e-6);
                        assert!(c.duration_factor >= 0.2 - 1e-6);
                        assert!(c.duration_factor <= 1.0);
                    }
                }
            }
        }
    }
}
