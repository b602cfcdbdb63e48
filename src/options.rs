use thiserror::Error;

/// Largest digit run that still fits a `u64` counter with room to increment.
pub const MAX_ORDERED_MARKER_DIGITS: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Options {
    /// Tabs expand to the next multiple of this many columns.
    pub tab_width: usize,
    /// Longest digit run accepted as an ordered list marker.
    ///
    /// Longer runs are plain text, so marker parsing never overflows.
    pub max_ordered_marker_digits: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tab_width: 4,
            max_ordered_marker_digits: 9,
        }
    }
}

impl Options {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.tab_width == 0 {
            return Err(OptionsError::ZeroTabWidth);
        }
        if self.max_ordered_marker_digits == 0
            || self.max_ordered_marker_digits > MAX_ORDERED_MARKER_DIGITS
        {
            return Err(OptionsError::OrderedMarkerDigits(
                self.max_ordered_marker_digits,
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("tab width must be at least 1")]
    ZeroTabWidth,
    #[error("ordered list markers must allow between 1 and 18 digits, got {0}")]
    OrderedMarkerDigits(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Options::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_tab_width() {
        let opts = Options {
            tab_width: 0,
            ..Options::default()
        };
        assert_eq!(opts.validate(), Err(OptionsError::ZeroTabWidth));
    }

    #[test]
    fn rejects_marker_digits_that_could_overflow() {
        let opts = Options {
            max_ordered_marker_digits: 19,
            ..Options::default()
        };
        assert_eq!(opts.validate(), Err(OptionsError::OrderedMarkerDigits(19)));
        assert_eq!(
            opts.validate().unwrap_err().to_string(),
            "ordered list markers must allow between 1 and 18 digits, got 19"
        );
    }
}
