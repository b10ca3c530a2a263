//! # Pawmatch Similarity (`similarity`)
//!
//! Stateless scoring primitives shared by every matcher in the workspace.
//!
//! - [`jaccard`]: intersection-over-union over two ordered token sets.
//! - [`cosine`]: normalized dot product over two embeddings, floored at 0.
//! - [`haversine_km`]: great-circle distance between two [`GeoPoint`]s.
//!
//! All three are total: degenerate inputs (empty sets, mismatched vector
//! lengths, zero magnitudes) score `0.0` instead of failing.
//!
//! ```
//! use std::collections::BTreeSet;
//! use similarity::{cosine, haversine_km, jaccard, GeoPoint};
//!
//! let a: BTreeSet<&str> = ["labrador", "cafe", "grande"].into_iter().collect();
//! let b: BTreeSet<&str> = ["labrador", "cafe"].into_iter().collect();
//! assert!((jaccard(&a, &b) - 2.0 / 3.0).abs() < 1e-12);
//!
//! assert!((cosine(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-9);
//!
//! let santiago = GeoPoint::new(-33.45, -70.65);
//! assert_eq!(haversine_km(santiago, santiago), 0.0);
//! ```

mod geo;
mod set;
mod vector;

pub use crate::geo::{haversine_km, GeoPoint, EARTH_RADIUS_KM};
pub use crate::set::jaccard;
pub use crate::vector::cosine;
