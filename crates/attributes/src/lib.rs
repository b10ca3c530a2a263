//! # Pawmatch Attributes (`attributes`)
//!
//! Attribute tokens are the shared vocabulary between the attribute
//! extractor (a vision-language model describing a dog) and the matcher.
//! Tokens are lowercase, accent-free and use `_` in place of spaces, e.g.
//! `"pastor_aleman"` or `"collar_rojo"`.
//!
//! - [`normalize_token`] turns a raw extractor token into that form.
//! - [`AttributeSet`] is an ordered, deduplicated set of normalized tokens.
//! - [`Extraction`] models the extractor's answer: either a rejection
//!   (not a dog, unreadable image) or a token list with a confidence.
//!
//! ```
//! use attributes::{normalize_token, AttributeSet};
//!
//! assert_eq!(normalize_token("Pastor Alemán").as_deref(), Some("pastor_aleman"));
//!
//! let set = AttributeSet::from_tokens(["Labrador", "café", "labrador", "  "]);
//! assert_eq!(set.len(), 2);
//! assert!(set.contains("cafe"));
//! ```

mod error;
mod extraction;
mod normalize;
mod set;

pub use crate::error::AttributeError;
pub use crate::extraction::{Extraction, DEFAULT_MIN_CONFIDENCE};
pub use crate::normalize::normalize_token;
pub use crate::set::AttributeSet;
