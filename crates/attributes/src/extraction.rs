use serde::{Deserialize, Serialize};

use crate::error::AttributeError;
use crate::set::AttributeSet;

/// Confidence below which an extraction is not trusted as a dog description.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.7;

/// Outcome reported by an attribute extractor for a set of images and/or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Extraction {
    /// The input was not recognised as a dog, or could not be read.
    Rejected {
        #[serde(default)]
        reason: Option<String>,
    },
    /// Tokens describing the dog, with the extractor's confidence in `[0, 1]`.
    Accepted {
        attributes: AttributeSet,
        confidence: f64,
    },
}

impl Extraction {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Extraction::Rejected {
            reason: Some(reason.into()),
        }
    }

    /// Build an accepted extraction, normalizing the raw tokens.
    pub fn accepted<I, S>(tokens: I, confidence: f64) -> Result<Self, AttributeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(AttributeError::InvalidConfidence(confidence));
        }
        Ok(Extraction::Accepted {
            attributes: AttributeSet::from_tokens(tokens),
            confidence,
        })
    }

    /// The extracted tokens, if the extraction was accepted with at least
    /// `min_confidence` and produced a non-empty set.
    pub fn into_attributes(self, min_confidence: f64) -> Option<AttributeSet> {
        match self {
            Extraction::Accepted {
                attributes,
                confidence,
            } if confidence >= min_confidence && !attributes.is_empty() => Some(attributes),
            _ => None,
        }
    }
}
