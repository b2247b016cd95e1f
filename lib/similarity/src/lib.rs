//! # Mobidex Similarity
//!
//! Finds the catalog device that best illustrates a set of target specs.
//!
//! ## Matching
//!
//! 1. **Exact**: the first record (in catalog order) with an image whose RAM,
//!    battery, camera and weight equal the target and which satisfies every
//!    categorical constraint (brand, OS, chipset).
//! 2. **Nearest**: otherwise, among records with an image that satisfy the
//!    constraints, the one minimizing the weighted distance
//!    (see [`distance`]). Ties go to the earliest record.
//!
//! ## Example
//!
//! ```rust
//! use mobidex_core::{Catalog, DeviceRecord, SpecVector};
//! use mobidex_similarity::{MatchEngine, MatchQuery};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::new(vec![
//!     DeviceRecord::new("Acme", "One")
//!         .with_specs(SpecVector::new(8.0, 4000.0, 48.0, 180.0))
//!         .with_image("a.png"),
//!     DeviceRecord::new("Acme", "Two")
//!         .with_specs(SpecVector::new(8.0, 4500.0, 50.0, 190.0))
//!         .with_image("b.png"),
//! ]));
//! let engine = MatchEngine::new(catalog);
//!
//! let query = MatchQuery::new(SpecVector::new(8.0, 4300.0, 49.0, 185.0)).with_brand("Acme");
//! let outcome = engine.find(&query).unwrap();
//! assert_eq!(outcome.image_or("placeholder.png"), "b.png");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ MatchQuery  │────>│ MatchEngine │────>│ MatchOutcome│
//! │ (target)    │     │ exact/near  │     │             │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                    │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Catalog    │     │  Explain    │
//!                     │ (Arc, r/o)  │     │ (per field) │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod distance;
pub mod explain;
pub mod matcher;
pub mod query;

pub use distance::{weighted_distance, BATTERY_SCALE, CAMERA_SCALE, RAM_SCALE, WEIGHT_SCALE};
pub use explain::{ExplainedMatch, MatchKind};
pub use matcher::{MatchEngine, MatchOutcome};
pub use query::MatchQuery;
