use serde::{Deserialize, Serialize};

use crate::error::OptionsError;
use crate::splitter::Granularity;

/// Per-animator timing configuration. All durations are in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScrambleOptions {
    /// How long each random glyph flash lasts
    pub scramble_tick_duration: f32,
    /// Random glyphs shown after the first one, before settling
    pub scramble_repeat_count: u32,
    /// Launch delay added per character index
    pub stagger_delay: f32,
    /// Pause between flashes
    pub repeat_delay: f32,
    /// Skip all motion; `animate()` only resets
    pub reduced_motion: bool,
    pub granularity: Granularity,
}

impl ScrambleOptions {
    pub fn tick_duration(mut self, seconds: f32) -> Self {
        self.scramble_tick_duration = seconds;
        self
    }

    pub fn repeat_count(mut self, count: u32) -> Self {
        self.scramble_repeat_count = count;
        self
    }

    pub fn stagger_delay(mut self, seconds: f32) -> Self {
        self.stagger_delay = seconds;
        self
    }

    pub fn repeat_delay(mut self, seconds: f32) -> Self {
        self.repeat_delay = seconds;
        self
    }

    pub fn reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Check every duration is finite and non-negative.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let durations = [
            ("scramble-tick-duration", self.scramble_tick_duration),
            ("stagger-delay", self.stagger_delay),
            ("repeat-delay", self.repeat_delay),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(OptionsError::InvalidDuration { field, value });
            }
        }
        Ok(())
    }
}

impl Default for ScrambleOptions {
    fn default() -> Self {
        Self {
            scramble_tick_duration: 0.03,
            scramble_repeat_count: 3,
            stagger_delay: 0.07,
            repeat_delay: 0.04,
            reduced_motion: false,
            granularity: Granularity::Chars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ScrambleOptions::default();
        assert_eq!(options.scramble_tick_duration, 0.03);
        assert_eq!(options.scramble_repeat_count, 3);
        assert_eq!(options.stagger_delay, 0.07);
        assert_eq!(options.repeat_delay, 0.04);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_durations() {
        let negative = ScrambleOptions::default().stagger_delay(-0.1);
        assert_eq!(
            negative.validate(),
            Err(OptionsError::InvalidDuration {
                field: "stagger-delay",
                value: -0.1,
            })
        );

        let nan = ScrambleOptions::default().tick_duration(f32::NAN);
        assert!(matches!(
            nan.validate(),
            Err(OptionsError::InvalidDuration {
                field: "scramble-tick-duration",
                ..
            })
        ));
    }

    #[test]
    fn test_deserialize_partial_json() {
        let options: ScrambleOptions =
            serde_json::from_str(r#"{ "scramble-repeat-count": 1, "granularity": "words" }"#)
                .unwrap();
        assert_eq!(options.scramble_repeat_count, 1);
        assert_eq!(options.granularity, Granularity::Words);
        assert_eq!(options.stagger_delay, 0.07);
    }
}
