//! Frame-driven tween scheduling.
//!
//! A [`Timeline`] owns every scheduled [`Tween`] and a logical clock in
//! seconds. The host advances the clock once per rendered frame; each tween
//! walks its phases up to the new time and fires its callbacks in event
//! order, so even a single large step produces the same sequence of writes
//! as many small ones.
//!
//! ## Cancellation
//!
//! [`AnimationScheduler::cancel_all_for`] removes tweens synchronously.
//! Callbacks only ever run inside [`Timeline::advance`], which needs
//! `&mut Timeline`, so nothing cancelled can fire afterwards.

mod active;
mod tween;

use crate::dom::{Channel, TargetId};

use active::{ActiveTween, StepResult};
pub use tween::{Callback, Commands, IterationCallback, Tween, TweenId, Value};

/// Anything a tween can animate.
pub trait TweenTarget {
    /// Identity used to group tweens for cancellation
    fn target_id(&self) -> TargetId;
    /// Current value of a channel
    fn read(&self, channel: Channel) -> f32;
    /// Write a channel value
    fn write(&self, channel: Channel, value: f32);
}

/// The scheduling surface the animator depends on.
pub trait AnimationScheduler {
    /// Current logical time in seconds
    fn now(&self) -> f64;

    /// Accept a tween, timed from [`now`](Self::now).
    fn schedule(&mut self, tween: Tween) -> TweenId;

    /// Drop every pending or running tween on `target`.
    /// Returns how many were removed.
    fn cancel_all_for(&mut self, target: TargetId) -> usize;

    /// Write channel values immediately, bypassing animation.
    fn set_for(&mut self, target: &dyn TweenTarget, values: &[(Channel, f32)]) {
        for &(channel, value) in values {
            target.write(channel, value);
        }
    }

    /// Number of live tweens on `target`.
    fn active_for(&self, target: TargetId) -> usize;
}

/// Single-threaded tween scheduler over a logical clock.
#[derive(Default)]
pub struct Timeline {
    now: f64,
    next_id: u64,
    tweens: Vec<ActiveTween>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `dt` seconds and process every tween.
    pub fn advance(&mut self, dt: f64) {
        let target = self.now + dt.max(0.0);
        self.advance_to(target);
    }

    /// Advance the clock to an absolute time. Times in the past are ignored.
    pub fn advance_to(&mut self, time: f64) {
        if time > self.now {
            self.now = time;
        }
        let now = self.now;

        // Tweens spawned by callbacks are appended and picked up in this pass
        let mut index = 0;
        while index < self.tweens.len() {
            let mut commands = Commands::new(now);
            let result = self.tweens[index].step(now, &mut commands);
            for (at, tween) in commands.spawned {
                let id = self.allocate_id();
                self.tweens.push(ActiveTween::new(id, tween, at));
            }
            if result == StepResult::Finished {
                log::trace!("tween {:?} retired", self.tweens[index].id);
            }
            index += 1;
        }
        self.tweens.retain(|tween| !tween.is_finished());
    }

    /// Number of tweens still pending or running.
    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Whether `id` is still pending or running.
    pub fn is_scheduled(&self, id: TweenId) -> bool {
        self.tweens.iter().any(|tween| tween.id == id)
    }

    fn allocate_id(&mut self) -> TweenId {
        self.next_id += 1;
        TweenId(self.next_id)
    }
}

impl AnimationScheduler for Timeline {
    fn now(&self) -> f64 {
        self.now
    }

    fn schedule(&mut self, tween: Tween) -> TweenId {
        let id = self.allocate_id();
        log::trace!("scheduling {:?} as {:?} at {:.3}", tween, id, self.now);
        self.tweens.push(ActiveTween::new(id, tween, self.now));
        id
    }

    fn cancel_all_for(&mut self, target: TargetId) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|tween| tween.target_id() != target);
        let removed = before - self.tweens.len();
        if removed > 0 {
            log::trace!("cancelled {} tween(s) on {:?}", removed, target);
        }
        removed
    }

    fn active_for(&self, target: TargetId) -> usize {
        self.tweens
            .iter()
            .filter(|tween| tween.target_id() == target)
            .count()
    }
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("now", &self.now)
            .field("active", &self.tweens.len())
            .finish()
    }
}
