//! Construction-time configuration for a masked field.

use std::fmt;

/// The placeholder used when none is configured.
pub const DEFAULT_PLACEHOLDER: char = ' ';

/// Errors that can occur while reading mask configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyPlaceholder,
    PlaceholderTooLong(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPlaceholder => {
                write!(f, "Placeholder must be a single character, got nothing")
            }
            Self::PlaceholderTooLong(s) => {
                write!(f, "Placeholder must be a single character, got {s:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Template and placeholder for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskConfig {
    /// Mask template. Empty disables formatting.
    pub mask: String,
    /// Shown in unfilled wildcard slots.
    pub placeholder: char,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            mask: String::new(),
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }
}

impl MaskConfig {
    pub fn new(mask: &str, placeholder: char) -> Self {
        Self {
            mask: mask.to_string(),
            placeholder,
        }
    }

    pub fn with_mask(mut self, mask: &str) -> Self {
        self.mask = mask.to_string();
        self
    }

    pub fn with_placeholder(mut self, placeholder: char) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Build a config from loosely typed host attributes.
    ///
    /// Missing or empty attributes fall back to the defaults. A placeholder
    /// attribute longer than one char contributes its first char.
    pub fn from_attrs(mask: Option<&str>, placeholder: Option<&str>) -> Self {
        Self::default().with_attrs(mask, placeholder)
    }

    /// Fill in from host attributes what was not set explicitly.
    ///
    /// A non-empty mask already on `self` wins over the `mask` attribute. The
    /// `placeholder` attribute is only used while `self` still has the
    /// default placeholder.
    pub fn with_attrs(mut self, mask: Option<&str>, placeholder: Option<&str>) -> Self {
        if self.mask.is_empty()
            && let Some(mask) = mask
        {
            self.mask = mask.to_string();
        }
        if self.placeholder == DEFAULT_PLACEHOLDER
            && let Some(ch) = placeholder.and_then(|s| s.chars().next())
        {
            self.placeholder = ch;
        }
        self
    }
}

/// Parse a placeholder given as text, e.g. on the command line.
pub fn parse_placeholder(s: &str) -> Result<char, ConfigError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(ConfigError::EmptyPlaceholder),
        (Some(ch), None) => Ok(ch),
        (Some(_), Some(_)) => Err(ConfigError::PlaceholderTooLong(s.to_string())),
    }
}
