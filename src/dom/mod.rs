//! Headless document model the animator drives.
//!
//! A [`TextElement`] stands in for the host's text node: colored runs of
//! text, a class list the styling layer keys effects off, and a set of
//! numeric decoration [`Channel`]s (the CSS custom properties of a browser
//! host). Splitting an element yields [`CharHandle`]s, one per glyph.
//!
//! Both handle types are cheap clones over shared interior state, the same
//! way several owners can hold a reference to one DOM node.

mod color;
mod element;
mod handle;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

pub use color::Color;
pub use element::{ElementSnapshot, Segment, TextElement, TextRun};
pub use handle::CharHandle;

/// Stable identity of an animatable node, used to group and cancel tweens.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct TargetId(u64);

static NEXT_TARGET_ID: AtomicU64 = AtomicU64::new(1);

impl TargetId {
    /// Generate a new unique target ID
    pub fn next() -> Self {
        TargetId(NEXT_TARGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Numeric style channels written by tweens.
///
/// Each channel is a signal for the styling layer, not a pixel value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    /// Glyph opacity, 0..1
    Opacity,
    /// Caret flag on a single glyph, 0 or 1
    CursorVisible,
    /// Background/blur reveal progress, 0..1
    RevealScale,
    /// Glitch strength, 0..1
    GlitchIntensity,
    /// Horizontal glitch displacement in px
    GlitchOffsetX,
    /// Glitch skew in degrees
    GlitchSkew,
}

impl Channel {
    /// Name of the style property this channel maps to.
    pub const fn css_property(self) -> &'static str {
        match self {
            Channel::Opacity => "opacity",
            Channel::CursorVisible => "--cursor-visible",
            Channel::RevealScale => "--scale",
            Channel::GlitchIntensity => "--glitch-intensity",
            Channel::GlitchOffsetX => "--glitch-x",
            Channel::GlitchSkew => "--glitch-skew",
        }
    }

    /// Value the channel reads as when no inline value is set.
    pub const fn rest_value(self) -> f32 {
        match self {
            Channel::Opacity => 1.0,
            _ => 0.0,
        }
    }
}

/// Inline channel values; unset channels read as their rest value.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ChannelMap(BTreeMap<Channel, f32>);

impl ChannelMap {
    pub(crate) fn get(&self, channel: Channel) -> f32 {
        self.0
            .get(&channel)
            .copied()
            .unwrap_or_else(|| channel.rest_value())
    }

    pub(crate) fn set(&mut self, channel: Channel, value: f32) {
        self.0.insert(channel, value);
    }

    pub(crate) fn remove(&mut self, channel: Channel) {
        self.0.remove(&channel);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Channel, f32)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }
}
