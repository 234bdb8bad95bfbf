mod animatable;
mod timing;

pub use animatable::Animatable;
pub use timing::TimingFunction;

/// Configuration for how one tween iteration is timed
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of one iteration in seconds
    pub duration: f32,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
    /// Delay before the first iteration starts, in seconds
    pub delay: f32,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration: f32, timing: TimingFunction) -> Self {
        Self {
            duration,
            timing,
            delay: 0.0,
        }
    }

    /// Set the delay before the animation starts
    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Set the duration of the animation
    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }
}

impl Default for Transition {
    /// Half a second with the default ease-out curve
    fn default() -> Self {
        Self::new(0.5, TimingFunction::default())
    }
}
