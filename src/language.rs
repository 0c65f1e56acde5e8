use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LexiconError;

/// One of the two language columns of a lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageField {
    English,
    Oromo,
}

impl LanguageField {
    /// ISO 639-1 code used when talking to translation providers
    pub fn code(self) -> &'static str {
        match self {
            LanguageField::English => "en",
            LanguageField::Oromo => "om",
        }
    }

    pub fn other(self) -> Self {
        match self {
            LanguageField::English => LanguageField::Oromo,
            LanguageField::Oromo => LanguageField::English,
        }
    }
}

/// Translation direction, always concrete.
///
/// `auto` is not a direction: it is a request to run the detector, see
/// [`DirectionRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Oromo → English
    #[serde(rename = "om_en")]
    OmEn,
    /// English → Oromo
    #[serde(rename = "en_om")]
    EnOm,
}

impl Direction {
    pub fn source(self) -> LanguageField {
        match self {
            Direction::OmEn => LanguageField::Oromo,
            Direction::EnOm => LanguageField::English,
        }
    }

    pub fn target(self) -> LanguageField {
        self.source().other()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::OmEn => "om_en",
            Direction::EnOm => "en_om",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction as requested by a caller: fixed, or detected from the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionRequest {
    Auto,
    Fixed(Direction),
}

impl FromStr for DirectionRequest {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(DirectionRequest::Auto),
            "om_en" => Ok(DirectionRequest::Fixed(Direction::OmEn)),
            "en_om" => Ok(DirectionRequest::Fixed(Direction::EnOm)),
            other => Err(LexiconError::Validation(format!(
                "Unsupported direction '{}' (expected om_en, en_om or auto)",
                other
            ))),
        }
    }
}
