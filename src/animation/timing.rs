//! Timing functions (easing curves) for tweens.
//!
//! Timing functions control the rate of change during one tween iteration,
//! mapping normalized time `t` in `[0, 1]` to an interpolation factor.
//!
//! ## Built-in Easing Functions
//!
//! - [`TimingFunction::Linear`] - Constant speed (no easing)
//! - [`TimingFunction::EaseIn`] - Starts slow, ends fast (acceleration)
//! - [`TimingFunction::EaseOut`] - Starts fast, ends slow (deceleration)
//! - [`TimingFunction::EaseInOut`] - Slow start and end, fast middle
//! - [`TimingFunction::ExpoOut`] - Very fast start, long exponential tail
//! - [`TimingFunction::Power4Out`] - Quintic deceleration
//!
//! ## Advanced Options
//!
//! - [`TimingFunction::Custom`] - User-defined function
//!
//! ## Example
//!
//! ```ignore
//! Tween::new(&element)
//!     .to(Channel::RevealScale, 1.0)
//!     .transition(Transition::new(1.0, TimingFunction::ExpoOut))
//! ```

use std::sync::Arc;

/// Timing function that controls the animation curve
#[derive(Clone, Default)]
pub enum TimingFunction {
    /// Linear interpolation (constant speed)
    Linear,
    /// Starts slow, ends fast
    EaseIn,
    /// Starts fast, ends slow. Default for tweens that don't pick a curve.
    #[default]
    EaseOut,
    /// Starts slow, speeds up, then slows down
    EaseInOut,
    /// Exponential deceleration, `1 - 2^(-10t)`
    ExpoOut,
    /// Quintic deceleration, `1 - (1 - t)^5`
    Power4Out,
    /// Custom timing function
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl TimingFunction {
    /// Evaluate the timing function at time t (0.0 to 1.0).
    /// Input outside the unit range is clamped.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseIn => ease_in(t),
            TimingFunction::EaseOut => ease_out(t),
            TimingFunction::EaseInOut => ease_in_out(t),
            TimingFunction::ExpoOut => expo_out(t),
            TimingFunction::Power4Out => power4_out(t),
            TimingFunction::Custom(f) => f(t),
        }
    }

    /// Create a custom timing function from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        TimingFunction::Custom(Arc::new(f))
    }
}

impl std::fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingFunction::Linear => write!(f, "Linear"),
            TimingFunction::EaseIn => write!(f, "EaseIn"),
            TimingFunction::EaseOut => write!(f, "EaseOut"),
            TimingFunction::EaseInOut => write!(f, "EaseInOut"),
            TimingFunction::ExpoOut => write!(f, "ExpoOut"),
            TimingFunction::Power4Out => write!(f, "Power4Out"),
            TimingFunction::Custom(_) => write!(f, "Custom"),
        }
    }
}

// Easing functions

fn ease_in(t: f32) -> f32 {
    t * t
}

fn ease_out(t: f32) -> f32 {
    t * (2.0 - t)
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

fn expo_out(t: f32) -> f32 {
    // The raw curve only approaches 1, snap the endpoint
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f32.powf(-10.0 * t)
    }
}

fn power4_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(TimingFunction::Linear.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_ease_out() {
        let result = TimingFunction::EaseOut.evaluate(0.5);
        assert!(result > 0.5); // Should be faster at start
    }

    #[test]
    fn test_expo_out_endpoints() {
        assert_eq!(TimingFunction::ExpoOut.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::ExpoOut.evaluate(1.0), 1.0);
        // Most of the distance is covered early
        assert!(TimingFunction::ExpoOut.evaluate(0.3) > 0.8);
    }

    #[test]
    fn test_power4_out_decelerates() {
        let f = TimingFunction::Power4Out;
        assert_eq!(f.evaluate(0.0), 0.0);
        assert_eq!(f.evaluate(1.0), 1.0);
        assert!(f.evaluate(0.5) > TimingFunction::EaseOut.evaluate(0.5));
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(TimingFunction::Linear.evaluate(-1.0), 0.0);
        assert_eq!(TimingFunction::EaseIn.evaluate(2.0), 1.0);
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let f = TimingFunction::EaseInOut;
        assert_eq!(f.evaluate(0.5), 0.5);
        assert!(f.evaluate(0.25) < 0.25);
        assert!((f.evaluate(0.25) + f.evaluate(0.75) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_custom() {
        let step = TimingFunction::custom(|t| if t < 0.5 { 0.0 } else { 1.0 });
        assert_eq!(step.evaluate(0.25), 0.0);
        assert_eq!(step.evaluate(0.75), 1.0);
    }
}
