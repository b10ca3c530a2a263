use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_token;

/// Ordered, deduplicated set of normalized attribute tokens.
///
/// Serializes as a JSON array. Deserialization runs every token through
/// [`normalize_token`], so records written by older extractors still
/// compare against the current vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct AttributeSet(BTreeSet<String>);

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize, deduplicate and collect raw tokens. Tokens that normalize
    /// to nothing are dropped.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tokens
                .into_iter()
                .filter_map(|t| normalize_token(t.as_ref()))
                .collect(),
        )
    }

    /// Collect tokens that are already normalized, skipping the normalizer.
    pub fn from_normalized<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Borrow the underlying set for similarity scoring.
    pub fn as_set(&self) -> &BTreeSet<String> {
        &self.0
    }
}

impl From<Vec<String>> for AttributeSet {
    fn from(tokens: Vec<String>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl From<AttributeSet> for Vec<String> {
    fn from(set: AttributeSet) -> Self {
        set.0.into_iter().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_tokens(iter)
    }
}
