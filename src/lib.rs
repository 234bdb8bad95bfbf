//! Headless character-scramble text animation.
//!
//! A [`ScrambleAnimator`](scramble::ScrambleAnimator) splits a
//! [`TextElement`](dom::TextElement) into glyphs and, on demand, flashes
//! each glyph through random symbols before settling it back, with an
//! optional element-wide decoration per [`Variant`](scramble::Variant).
//! All timing runs on a [`Timeline`](timeline::Timeline) the host advances
//! once per frame.
//!
//! ```ignore
//! let element = TextElement::new("Hover me", Color::WHITE);
//! let mut animator = ScrambleAnimator::new(element, Variant::Cursor, ScrambleOptions::default())?;
//! let mut timeline = Timeline::new();
//!
//! animator.animate(&mut timeline);
//! loop {
//!     timeline.advance(1.0 / 60.0);
//!     // paint animator.element()
//! }
//! ```

pub mod animation;
pub mod dom;
pub mod error;
pub mod scramble;
pub mod splitter;
pub mod timeline;

pub mod prelude {
    pub use crate::animation::{TimingFunction, Transition};
    pub use crate::dom::{Channel, CharHandle, Color, ElementSnapshot, TargetId, TextElement};
    pub use crate::error::{OptionsError, ParseVariantError};
    pub use crate::scramble::{Markers, ScrambleAnimator, ScrambleOptions, Variant};
    pub use crate::splitter::{CharSplitter, Granularity, TextSplitter};
    pub use crate::timeline::{AnimationScheduler, Commands, Timeline, Tween, TweenTarget};
}
