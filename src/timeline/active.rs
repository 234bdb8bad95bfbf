use crate::animation::Animatable;
use crate::dom::TargetId;

use super::tween::{Commands, Tween, TweenId};

/// Where a scheduled tween is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    /// Before the initial delay elapses
    Waiting { start_at: f64 },
    /// Inside an iteration
    Running { iteration: u32, started_at: f64 },
    /// Between iterations
    RepeatWait { iteration: u32, resume_at: f64 },
    Done,
}

/// Result of stepping a tween to the current time
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum StepResult {
    /// Still has work left on a future tick
    Active,
    /// Completed (callbacks included) and can be dropped
    Finished,
}

/// Runtime state for one scheduled tween
pub(crate) struct ActiveTween {
    pub(crate) id: TweenId,
    tween: Tween,
    phase: Phase,
    /// Per-channel (start, end) resolved for the current iteration
    resolved: Vec<(f32, f32)>,
    duration: f64,
    repeat_delay: f64,
}

impl ActiveTween {
    pub(crate) fn new(id: TweenId, tween: Tween, scheduled_at: f64) -> Self {
        let start_at = scheduled_at + tween.transition.delay.max(0.0) as f64;
        let duration = tween.transition.duration.max(0.0) as f64;
        let repeat_delay = tween.repeat_delay.max(0.0) as f64;
        let resolved = vec![(0.0, 0.0); tween.channels.len()];
        Self {
            id,
            tween,
            phase: Phase::Waiting { start_at },
            resolved,
            duration,
            repeat_delay,
        }
    }

    pub(crate) fn target_id(&self) -> TargetId {
        self.tween.target.target_id()
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Walk the tween's phases up to `now`, firing callbacks in event order.
    pub(crate) fn step(&mut self, now: f64, commands: &mut Commands) -> StepResult {
        loop {
            match self.phase {
                Phase::Waiting { start_at } => {
                    if now < start_at {
                        return StepResult::Active;
                    }
                    commands.set_now(start_at);
                    log::trace!("tween {:?} started at {:.3}", self.id, start_at);
                    if let Some(on_start) = self.tween.on_start.as_mut() {
                        on_start(commands);
                    }
                    self.begin_iteration(0, start_at, commands);
                }
                Phase::Running {
                    iteration,
                    started_at,
                } => {
                    let ends_at = started_at + self.duration;
                    if now < ends_at {
                        let t = ((now - started_at) / self.duration) as f32;
                        self.apply(t);
                        return StepResult::Active;
                    }
                    self.apply(1.0);
                    if iteration < self.tween.repeat {
                        self.phase = Phase::RepeatWait {
                            iteration: iteration + 1,
                            resume_at: ends_at + self.repeat_delay,
                        };
                    } else {
                        commands.set_now(ends_at);
                        self.phase = Phase::Done;
                        log::trace!("tween {:?} completed at {:.3}", self.id, ends_at);
                        if let Some(on_complete) = self.tween.on_complete.as_mut() {
                            on_complete(commands);
                        }
                        return StepResult::Finished;
                    }
                }
                Phase::RepeatWait {
                    iteration,
                    resume_at,
                } => {
                    if now < resume_at {
                        return StepResult::Active;
                    }
                    commands.set_now(resume_at);
                    if let Some(on_repeat) = self.tween.on_repeat.as_mut() {
                        on_repeat(iteration, commands);
                    }
                    self.begin_iteration(iteration, resume_at, commands);
                }
                Phase::Done => return StepResult::Finished,
            }
        }
    }

    fn begin_iteration(&mut self, iteration: u32, at: f64, commands: &mut Commands) {
        if let Some(on_refresh) = self.tween.on_refresh.as_mut() {
            on_refresh(iteration, commands);
        }
        let target = &self.tween.target;
        for (channel, resolved) in self.tween.channels.iter_mut().zip(self.resolved.iter_mut()) {
            let start = match channel.from {
                Some(from) => from,
                // Captured once; repeats replay from the same origin
                None if iteration == 0 => target.read(channel.channel),
                None => resolved.0,
            };
            *resolved = (start, channel.to.resolve());
        }
        self.phase = Phase::Running {
            iteration,
            started_at: at,
        };
    }

    fn apply(&self, t: f32) {
        let eased = self.tween.transition.timing.evaluate(t);
        for (channel, (start, end)) in self.tween.channels.iter().zip(&self.resolved) {
            let value = if t >= 1.0 {
                *end
            } else {
                f32::lerp(start, end, eased)
            };
            self.tween.target.write(channel.channel, value);
        }
    }
}
