use crate::animation::{TimingFunction, Transition};
use crate::dom::{Channel, TargetId};

use super::TweenTarget;

/// Callback fired at a single point in a tween's life.
pub type Callback = Box<dyn FnMut(&mut Commands)>;

/// Callback fired per iteration; receives the iteration index.
pub type IterationCallback = Box<dyn FnMut(u32, &mut Commands)>;

/// Identifier handed out by a scheduler for every tween it accepts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct TweenId(pub(crate) u64);

/// Destination of a channel animation.
pub enum Value {
    /// Same value every iteration
    Fixed(f32),
    /// Re-evaluated at the start of every iteration
    Dynamic(Box<dyn FnMut() -> f32>),
}

impl Value {
    pub(crate) fn resolve(&mut self) -> f32 {
        match self {
            Value::Fixed(v) => *v,
            Value::Dynamic(f) => f(),
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Fixed(v)
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Fixed(v) => write!(f, "Fixed({})", v),
            Value::Dynamic(_) => write!(f, "Dynamic"),
        }
    }
}

/// One channel driven by a tween.
#[derive(Debug)]
pub(crate) struct ChannelTween {
    pub(crate) channel: Channel,
    /// `None` captures the target's current value when the tween starts
    pub(crate) from: Option<f32>,
    pub(crate) to: Value,
}

/// Description of a timed animation on one target.
///
/// Built with consuming setters and handed to an
/// [`AnimationScheduler`](super::AnimationScheduler). One iteration lasts
/// `duration`; `repeat(n)` adds `n` more iterations separated by
/// `repeat_delay`.
pub struct Tween {
    pub(crate) target: Box<dyn TweenTarget>,
    pub(crate) channels: Vec<ChannelTween>,
    pub(crate) transition: Transition,
    pub(crate) repeat: u32,
    pub(crate) repeat_delay: f32,
    pub(crate) on_start: Option<Callback>,
    pub(crate) on_repeat: Option<IterationCallback>,
    pub(crate) on_refresh: Option<IterationCallback>,
    pub(crate) on_complete: Option<Callback>,
}

impl Tween {
    /// Start describing a tween on `target`.
    pub fn new<T: TweenTarget + Clone + 'static>(target: &T) -> Self {
        Self {
            target: Box::new(target.clone()),
            channels: Vec::new(),
            transition: Transition::default(),
            repeat: 0,
            repeat_delay: 0.0,
            on_start: None,
            on_repeat: None,
            on_refresh: None,
            on_complete: None,
        }
    }

    /// A zero-length tween that only fires `f` after `delay` seconds.
    ///
    /// It is grouped under `target`, so cancelling that target cancels the call.
    pub fn delayed_call<T, F>(target: &T, delay: f32, f: F) -> Self
    where
        T: TweenTarget + Clone + 'static,
        F: FnMut(&mut Commands) + 'static,
    {
        Self::new(target)
            .duration(0.0)
            .delay(delay)
            .on_complete(f)
    }

    /// Animate `channel` from its current value to `to`.
    pub fn to(mut self, channel: Channel, to: impl Into<Value>) -> Self {
        self.channels.push(ChannelTween {
            channel,
            from: None,
            to: to.into(),
        });
        self
    }

    /// Animate `channel` from `from` to `to`.
    pub fn from_to(mut self, channel: Channel, from: f32, to: impl Into<Value>) -> Self {
        self.channels.push(ChannelTween {
            channel,
            from: Some(from),
            to: to.into(),
        });
        self
    }

    /// Animate `channel` to a value produced fresh for every iteration.
    pub fn to_with<F>(self, channel: Channel, producer: F) -> Self
    where
        F: FnMut() -> f32 + 'static,
    {
        self.to(channel, Value::Dynamic(Box::new(producer)))
    }

    /// Set duration, delay and timing at once.
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn duration(mut self, duration: f32) -> Self {
        self.transition.duration = duration;
        self
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.transition.delay = delay;
        self
    }

    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.transition.timing = timing;
        self
    }

    /// Number of extra iterations after the first.
    pub fn repeat(mut self, count: u32) -> Self {
        self.repeat = count;
        self
    }

    /// Pause between iterations, in seconds.
    pub fn repeat_delay(mut self, delay: f32) -> Self {
        self.repeat_delay = delay;
        self
    }

    /// Fired once, when the first iteration begins.
    pub fn on_start<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Commands) + 'static,
    {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Fired when each repeat begins, with iterations numbered from 1.
    pub fn on_repeat<F>(mut self, f: F) -> Self
    where
        F: FnMut(u32, &mut Commands) + 'static,
    {
        self.on_repeat = Some(Box::new(f));
        self
    }

    /// Fired at the start of every iteration, including the first, after
    /// `on_start`/`on_repeat`.
    pub fn on_refresh<F>(mut self, f: F) -> Self
    where
        F: FnMut(u32, &mut Commands) + 'static,
    {
        self.on_refresh = Some(Box::new(f));
        self
    }

    /// Fired once after the last iteration has written its end values.
    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Commands) + 'static,
    {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn target_id(&self) -> TargetId {
        self.target.target_id()
    }

    /// Seconds from scheduling until the last iteration ends.
    pub fn total_duration(&self) -> f32 {
        let t = &self.transition;
        let repeats = self.repeat as f32;
        t.delay + t.duration * (repeats + 1.0) + self.repeat_delay * repeats
    }
}

impl std::fmt::Debug for Tween {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("target", &self.target.target_id())
            .field("channels", &self.channels)
            .field("transition", &self.transition)
            .field("repeat", &self.repeat)
            .field("repeat_delay", &self.repeat_delay)
            .finish()
    }
}

/// Deferred work queued by tween callbacks.
///
/// Tweens scheduled here are timed from the event that fired the callback,
/// not from the frame that processed it.
pub struct Commands {
    now: f64,
    pub(crate) spawned: Vec<(f64, Tween)>,
}

impl Commands {
    pub(crate) fn new(now: f64) -> Self {
        Self {
            now,
            spawned: Vec::new(),
        }
    }

    pub(crate) fn set_now(&mut self, now: f64) {
        self.now = now;
    }

    /// Logical time of the event being handled.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Queue a follow-up tween.
    pub fn schedule(&mut self, tween: Tween) {
        self.spawned.push((self.now, tween));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Color, TextElement};

    #[test]
    fn test_builder_defaults() {
        let element = TextElement::new("x", Color::WHITE);
        let tween = Tween::new(&element).to(Channel::RevealScale, 1.0);

        assert_eq!(tween.target_id(), element.id());
        assert_eq!(tween.repeat, 0);
        assert_eq!(tween.transition.delay, 0.0);
        assert_eq!(tween.channels.len(), 1);
        assert!(tween.channels[0].from.is_none());
    }

    #[test]
    fn test_total_duration() {
        let element = TextElement::new("x", Color::WHITE);
        let tween = Tween::new(&element)
            .duration(0.5)
            .delay(1.0)
            .repeat(2)
            .repeat_delay(0.25);
        assert_eq!(tween.total_duration(), 1.0 + 1.5 + 0.5);
    }

    #[test]
    fn test_total_duration_with_max_repeat() {
        let element = TextElement::new("x", Color::WHITE);
        let tween = Tween::new(&element).duration(0.5).repeat(u32::MAX);
        assert!(tween.total_duration().is_finite());
        assert!(tween.total_duration() > 1.0e9);
    }

    #[test]
    fn test_dynamic_value_resolves_each_time() {
        let mut next = 0.0;
        let mut value = Value::Dynamic(Box::new(move || {
            next += 1.0;
            next
        }));
        assert_eq!(value.resolve(), 1.0);
        assert_eq!(value.resolve(), 2.0);
        assert_eq!(Value::from(3.0).resolve(), 3.0);
    }

    #[test]
    fn test_commands_stamp_event_time() {
        let element = TextElement::new("x", Color::WHITE);
        let mut commands = Commands::new(0.5);
        commands.set_now(0.75);
        commands.schedule(Tween::delayed_call(&element, 0.1, |_| {}));
        assert_eq!(commands.now(), 0.75);
        assert_eq!(commands.spawned[0].0, 0.75);
    }
}
