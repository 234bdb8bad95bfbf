//! The character-scramble engine.
//!
//! Each glyph of the target element runs its own timed sequence:
//!
//! ```text
//! Idle --(i+1)*stagger--> Flashing(0) --tick+repeat_delay--> ... --> Flashing(n) --> Settled
//! ```
//!
//! Every flash shows a random glyph from [`SYMBOLS`]; after the last one the
//! original glyph and color come back. `reset()` forces every glyph straight
//! back to `Idle` from any state, cancelling whatever was pending.
//!
//! Variants layer extra effects on top:
//!
//! | Variant      | Per glyph                           | Element                              |
//! |--------------|-------------------------------------|--------------------------------------|
//! | `Cursor`     | caret during the first flash        | none                                 |
//! | `Color`      | random palette color on every flash | none                                 |
//! | `Background` | none                                | reveal scale 0 -> 1, expo-out, 1s    |
//! | `Blur`       | none                                | reveal scale 0 -> 1, expo-out, 1s    |
//! | `Glitch`     | none                                | intensity ramp, four jitters, settle |

mod animator;
mod glyphs;
mod options;
mod variant;

pub use animator::ScrambleAnimator;
pub use glyphs::{GlyphSource, PALETTE, SYMBOLS};
pub use options::ScrambleOptions;
pub use variant::{Markers, Variant};
