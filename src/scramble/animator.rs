use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::{TimingFunction, Transition};
use crate::dom::{Channel, CharHandle, Color, TextElement};
use crate::error::OptionsError;
use crate::splitter::{CharSplitter, TextSplitter};
use crate::timeline::{AnimationScheduler, Commands, Tween};

use super::glyphs::GlyphSource;
use super::{Markers, ScrambleOptions, Variant};

/// Element channels the animator may write.
const DECORATION_CHANNELS: [Channel; 4] = [
    Channel::RevealScale,
    Channel::GlitchIntensity,
    Channel::GlitchOffsetX,
    Channel::GlitchSkew,
];

const REVEAL_IN_DURATION: f32 = 1.0;
const REVEAL_OUT_DURATION: f32 = 0.6;
const GLITCH_RAMP_DURATION: f32 = 0.1;
const GLITCH_JUMPS: u32 = 4;
const GLITCH_JUMP_DURATION: f32 = 0.05;
const GLITCH_SETTLE_DELAY: f32 = 0.4;
const GLITCH_SETTLE_DURATION: f32 = 0.3;
const GLITCH_OUT_DURATION: f32 = 0.2;
const GLITCH_MAX_OFFSET: f32 = 4.0;
const GLITCH_MAX_SKEW: f32 = 2.5;

/// Drives the scramble-and-settle animation of one text element.
///
/// The element is split into glyph handles on construction. Every
/// [`animate`](Self::animate) call cancels the previous run, then launches
/// one staggered flash sequence per glyph plus the variant's element-level
/// decoration. Each glyph settles back to the glyph and color it had at
/// construction.
///
/// The animator never holds the scheduler; every operation that schedules
/// or cancels work borrows it for the duration of the call.
pub struct ScrambleAnimator<S: TextSplitter = CharSplitter> {
    element: TextElement,
    variant: Variant,
    options: ScrambleOptions,
    splitter: S,
    characters: Vec<CharHandle>,
    original_glyphs: Vec<String>,
    original_colors: Vec<Color>,
    /// Element channel values present before construction
    pristine_channels: Vec<(Channel, Option<f32>)>,
    glyphs: Rc<RefCell<GlyphSource>>,
    destroyed: bool,
}

impl ScrambleAnimator<CharSplitter> {
    /// Split `element` with the default splitter and prepare it for `variant`.
    pub fn new(
        element: TextElement,
        variant: Variant,
        options: ScrambleOptions,
    ) -> Result<Self, OptionsError> {
        Self::with_splitter(element, variant, options, CharSplitter::new())
    }
}

impl<S: TextSplitter> ScrambleAnimator<S> {
    /// Like [`ScrambleAnimator::new`] with a caller-supplied splitter.
    pub fn with_splitter(
        element: TextElement,
        variant: Variant,
        options: ScrambleOptions,
        mut splitter: S,
    ) -> Result<Self, OptionsError> {
        options.validate()?;

        let snapshot = element.snapshot();
        let pristine_channels = DECORATION_CHANNELS
            .iter()
            .map(|&channel| {
                let value = snapshot
                    .channels
                    .iter()
                    .find(|(c, _)| *c == channel)
                    .map(|(_, v)| *v);
                (channel, value)
            })
            .collect();

        let characters = splitter.split(&element, options.granularity);
        let original_glyphs = characters.iter().map(CharHandle::text).collect();
        let original_colors = characters.iter().map(CharHandle::computed_color).collect();

        for class in variant.markers().class_names() {
            element.add_class(class);
        }

        log::debug!(
            "scramble animator on {:?}: variant {}, {} character(s)",
            element.id(),
            variant,
            characters.len()
        );

        Ok(Self {
            element,
            variant,
            options,
            splitter,
            characters,
            original_glyphs,
            original_colors,
            pristine_channels,
            glyphs: Rc::new(RefCell::new(GlyphSource::from_os())),
            destroyed: false,
        })
    }

    /// Use a deterministic random source for glyphs, colors and jitter.
    pub fn with_seed(self, seed: u64) -> Self {
        *self.glyphs.borrow_mut() = GlyphSource::seeded(seed);
        self
    }

    pub fn element(&self) -> &TextElement {
        &self.element
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn options(&self) -> &ScrambleOptions {
        &self.options
    }

    pub fn characters(&self) -> &[CharHandle] {
        &self.characters
    }

    pub fn original_glyphs(&self) -> &[String] {
        &self.original_glyphs
    }

    pub fn original_colors(&self) -> &[Color] {
        &self.original_colors
    }

    /// True when the element had nothing to split; every operation is a no-op.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Start, or restart, the scramble sequence.
    pub fn animate(&mut self, scheduler: &mut dyn AnimationScheduler) {
        if !self.is_live("animate") {
            return;
        }
        self.reset(scheduler);
        if self.options.reduced_motion {
            log::debug!("{:?}: reduced motion, skipping scramble", self.element.id());
            return;
        }

        for index in 0..self.characters.len() {
            let tween = self.character_tween(index);
            scheduler.schedule(tween);
        }

        match self.variant {
            Variant::Background | Variant::Blur => {
                scheduler.schedule(
                    Tween::new(&self.element)
                        .from_to(Channel::RevealScale, 0.0, 1.0)
                        .transition(Transition::new(REVEAL_IN_DURATION, TimingFunction::ExpoOut)),
                );
            }
            Variant::Glitch => self.schedule_glitch(scheduler),
            Variant::Cursor | Variant::Color => {}
        }

        log::debug!(
            "{:?}: animating {} character(s) as {}",
            self.element.id(),
            self.characters.len(),
            self.variant
        );
    }

    /// Reverse the element-level decoration, leaving glyphs alone.
    pub fn animate_out(&mut self, scheduler: &mut dyn AnimationScheduler) {
        if !self.is_live("animate_out") {
            return;
        }
        match self.variant {
            Variant::Background | Variant::Blur => {
                scheduler.cancel_all_for(self.element.id());
                scheduler.schedule(
                    Tween::new(&self.element)
                        .to(Channel::RevealScale, 0.0)
                        .transition(Transition::new(
                            REVEAL_OUT_DURATION,
                            TimingFunction::Power4Out,
                        )),
                );
            }
            Variant::Glitch => {
                scheduler.cancel_all_for(self.element.id());
                scheduler.schedule(
                    Tween::new(&self.element)
                        .to(Channel::GlitchIntensity, 0.0)
                        .to(Channel::GlitchOffsetX, 0.0)
                        .to(Channel::GlitchSkew, 0.0)
                        .duration(GLITCH_OUT_DURATION),
                );
            }
            Variant::Cursor | Variant::Color => {}
        }
    }

    /// Cancel everything in flight and snap back to the original state.
    ///
    /// Safe at any time, any number of times.
    pub fn reset(&mut self, scheduler: &mut dyn AnimationScheduler) {
        if !self.is_live("reset") {
            return;
        }

        // Nothing may be written until every pending callback is gone
        let mut cancelled = 0;
        for handle in &self.characters {
            cancelled += scheduler.cancel_all_for(handle.id());
        }
        cancelled += scheduler.cancel_all_for(self.element.id());

        for (index, handle) in self.characters.iter().enumerate() {
            handle.set_text(self.original_glyphs[index].as_str());
            handle.set_color(self.original_colors[index]);
            scheduler.set_for(
                handle,
                &[(Channel::Opacity, 1.0), (Channel::CursorVisible, 0.0)],
            );
        }
        scheduler.set_for(&self.element, &[(Channel::RevealScale, 0.0)]);
        if self.variant == Variant::Glitch {
            scheduler.set_for(
                &self.element,
                &[
                    (Channel::GlitchIntensity, 0.0),
                    (Channel::GlitchOffsetX, 0.0),
                    (Channel::GlitchSkew, 0.0),
                ],
            );
        }

        if cancelled > 0 {
            log::debug!(
                "{:?}: reset cancelled {} tween(s)",
                self.element.id(),
                cancelled
            );
        }
    }

    /// Unwind completely and hand the element back untouched.
    ///
    /// The animator is inert afterwards.
    pub fn destroy(&mut self, scheduler: &mut dyn AnimationScheduler) {
        if self.destroyed {
            log::warn!("{:?}: destroy called twice", self.element.id());
            return;
        }
        self.reset(scheduler);
        self.splitter.revert();

        for class in Markers::all().class_names() {
            self.element.remove_class(class);
        }
        for (channel, value) in &self.pristine_channels {
            match value {
                Some(value) => self.element.set_channel(*channel, *value),
                None => self.element.remove_channel(*channel),
            }
        }

        self.characters.clear();
        self.destroyed = true;
        log::debug!("{:?}: destroyed", self.element.id());
    }

    fn is_live(&self, operation: &str) -> bool {
        if self.destroyed {
            log::warn!(
                "{:?}: {} called after destroy, ignoring",
                self.element.id(),
                operation
            );
            return false;
        }
        !self.characters.is_empty()
    }

    /// One glyph's flash sequence: a fade-in per flash, a random glyph per
    /// flash, then a delayed restore once the last flash has played.
    fn character_tween(&self, index: usize) -> Tween {
        let handle = &self.characters[index];
        let options = &self.options;
        let tick = options.scramble_tick_duration;
        let cursor = self.variant == Variant::Cursor;
        let colorize = self.variant == Variant::Color;

        let on_start = {
            let handle = handle.clone();
            move |_: &mut Commands| {
                if cursor {
                    handle.set_channel(Channel::CursorVisible, 1.0);
                }
            }
        };
        let on_repeat = {
            let handle = handle.clone();
            move |iteration: u32, _: &mut Commands| {
                if cursor && iteration == 1 {
                    handle.set_channel(Channel::CursorVisible, 0.0);
                }
            }
        };
        let on_refresh = {
            let handle = handle.clone();
            let glyphs = self.glyphs.clone();
            move |_: u32, _: &mut Commands| {
                let mut glyphs = glyphs.borrow_mut();
                handle.set_text(glyphs.glyph().to_string());
                if colorize {
                    handle.set_color(glyphs.color());
                }
            }
        };
        let on_complete = {
            let handle = handle.clone();
            let glyph = self.original_glyphs[index].clone();
            let color = self.original_colors[index];
            move |commands: &mut Commands| {
                if cursor {
                    handle.set_channel(Channel::CursorVisible, 0.0);
                }
                let restore = handle.clone();
                let glyph = glyph.clone();
                commands.schedule(Tween::delayed_call(&handle, tick, move |_| {
                    restore.set_text(glyph.as_str());
                    restore.set_color(color);
                }));
            }
        };

        Tween::new(handle)
            .from_to(Channel::Opacity, 0.0, 1.0)
            .duration(tick)
            .delay((index + 1) as f32 * options.stagger_delay)
            .repeat(options.scramble_repeat_count)
            .repeat_delay(options.repeat_delay)
            .on_start(on_start)
            .on_repeat(on_repeat)
            .on_refresh(on_refresh)
            .on_complete(on_complete)
    }

    /// Ramp up, four jumps to random displacement and back, ramp down.
    fn schedule_glitch(&self, scheduler: &mut dyn AnimationScheduler) {
        let element = &self.element;
        scheduler.schedule(
            Tween::new(element)
                .from_to(Channel::GlitchIntensity, 0.0, 1.0)
                .duration(GLITCH_RAMP_DURATION),
        );

        for jump in 0..GLITCH_JUMPS {
            let jump_at = GLITCH_RAMP_DURATION + jump as f32 * 2.0 * GLITCH_JUMP_DURATION;
            let offset = self.glyphs.clone();
            let skew = self.glyphs.clone();
            scheduler.schedule(
                Tween::new(element)
                    .to_with(Channel::GlitchOffsetX, move || {
                        offset.borrow_mut().jitter(GLITCH_MAX_OFFSET)
                    })
                    .to_with(Channel::GlitchSkew, move || {
                        skew.borrow_mut().jitter(GLITCH_MAX_SKEW)
                    })
                    .duration(GLITCH_JUMP_DURATION)
                    .delay(jump_at),
            );
            scheduler.schedule(
                Tween::new(element)
                    .to(Channel::GlitchOffsetX, 0.0)
                    .to(Channel::GlitchSkew, 0.0)
                    .duration(GLITCH_JUMP_DURATION)
                    .delay(jump_at + GLITCH_JUMP_DURATION),
            );
        }

        scheduler.schedule(
            Tween::new(element)
                .to(Channel::GlitchIntensity, 0.0)
                .duration(GLITCH_SETTLE_DURATION)
                .delay(GLITCH_SETTLE_DELAY),
        );
    }
}

impl<S: TextSplitter> std::fmt::Debug for ScrambleAnimator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrambleAnimator")
            .field("element", &self.element)
            .field("variant", &self.variant)
            .field("options", &self.options)
            .field("characters", &self.characters.len())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::splitter::Granularity;
    use crate::timeline::Timeline;

    #[test]
    fn test_construction_captures_originals() {
        let blue = Color::from_hex(0x0000ff);
        let element = TextElement::new("Hi ", Color::WHITE).with_run("yo", blue);
        let animator =
            ScrambleAnimator::new(element.clone(), Variant::Cursor, ScrambleOptions::default())
                .unwrap();

        assert_eq!(animator.original_glyphs(), ["H", "i", "y", "o"]);
        assert_eq!(
            animator.original_colors(),
            [Color::WHITE, Color::WHITE, blue, blue]
        );
        assert_eq!(animator.characters().len(), animator.original_glyphs().len());
        assert!(element.is_split());
        assert!(element.has_class("cursor"));
    }

    #[test]
    fn test_color_variant_adds_no_marker() {
        let element = TextElement::new("x", Color::WHITE);
        let _animator =
            ScrambleAnimator::new(element.clone(), Variant::Color, ScrambleOptions::default())
                .unwrap();
        assert!(element.classes().is_empty());
    }

    /// Splitter that hands out one handle per run and counts reverts
    struct RunSplitter {
        reverts: Rc<Cell<u32>>,
    }

    impl TextSplitter for RunSplitter {
        fn split(&mut self, element: &TextElement, _: Granularity) -> Vec<CharHandle> {
            element
                .runs()
                .into_iter()
                .map(|run| CharHandle::new(run.text, run.color))
                .collect()
        }

        fn revert(&mut self) {
            self.reverts.set(self.reverts.get() + 1);
        }
    }

    #[test]
    fn test_custom_splitter_is_reverted_on_destroy() {
        let reverts = Rc::new(Cell::new(0));
        let element = TextElement::new("one", Color::WHITE).with_run("two", Color::BLACK);
        let mut animator = ScrambleAnimator::with_splitter(
            element,
            Variant::Glitch,
            ScrambleOptions::default(),
            RunSplitter {
                reverts: reverts.clone(),
            },
        )
        .unwrap();
        assert_eq!(animator.original_glyphs(), ["one", "two"]);

        let mut timeline = Timeline::new();
        animator.animate(&mut timeline);
        animator.destroy(&mut timeline);
        animator.destroy(&mut timeline);

        assert_eq!(reverts.get(), 1);
        assert!(animator.characters().is_empty());
        assert!(timeline.is_idle());
    }

    #[test]
    fn test_animate_schedules_one_sequence_per_character() {
        let element = TextElement::new("abc", Color::WHITE);
        let mut animator =
            ScrambleAnimator::new(element, Variant::Background, ScrambleOptions::default())
                .unwrap();
        let mut timeline = Timeline::new();

        animator.animate(&mut timeline);

        for handle in animator.characters() {
            assert_eq!(timeline.active_for(handle.id()), 1);
        }
        assert_eq!(timeline.active_for(animator.element().id()), 1);
    }

    #[test]
    fn test_glitch_schedules_full_sequence() {
        let element = TextElement::new("a", Color::WHITE);
        let mut animator =
            ScrambleAnimator::new(element, Variant::Glitch, ScrambleOptions::default()).unwrap();
        let mut timeline = Timeline::new();

        animator.animate(&mut timeline);

        // Ramp, a jump and a snap per jitter, settle
        let expected = 1 + 2 * GLITCH_JUMPS as usize + 1;
        assert_eq!(timeline.active_for(animator.element().id()), expected);
    }
}
