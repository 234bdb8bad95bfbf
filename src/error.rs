use thiserror::Error;

/// Invalid animator configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("`{field}` must be a finite, non-negative number of seconds, got {value}")]
    InvalidDuration { field: &'static str, value: f32 },
}

/// A variant name that doesn't match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scramble variant `{0}`, expected one of cursor, background, color, blur, glitch")]
pub struct ParseVariantError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = OptionsError::InvalidDuration {
            field: "stagger-delay",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "`stagger-delay` must be a finite, non-negative number of seconds, got -1"
        );
        assert!(ParseVariantError("wobble".into())
            .to_string()
            .contains("`wobble`"));
    }
}
