//! # Mobidex Core
//!
//! Core library for Mobidex.
//!
//! This crate provides the catalog data structures and read-only queries:
//!
//! - [`DeviceRecord`] - One row of the phone specification dataset
//! - [`Catalog`] - Immutable, ordered collection of records
//! - [`CatalogStore`] - Distinct values, brand and name filters, paging
//! - [`CategoricalEncoder`] - Append-only integer codes for categorical fields
//! - [`FeatureAssembler`] - Model inputs in the model's feature order
//!
//! ## Example
//!
//! ```rust
//! use mobidex_core::{Catalog, CatalogStore, DeviceRecord, SpecVector};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::new(vec![
//!     DeviceRecord::new("Acme", "One Pro")
//!         .with_specs(SpecVector::new(8.0, 4000.0, 48.0, 180.0)),
//!     DeviceRecord::new("Beta", "Max"),
//! ]));
//! let store = CatalogStore::new(catalog);
//!
//! let acme = store.filter_by_brand("Acme").name_contains("pro");
//! assert_eq!(acme.len(), 1);
//! assert_eq!(store.distinct_values("brand").unwrap(), vec!["Acme", "Beta"]);
//! ```

pub mod catalog;
pub mod encoding;
pub mod error;
pub mod features;
pub mod filter;
pub mod model;
pub mod record;

pub use catalog::{
    limit, BrowsePage, BrowseQuery, Catalog, CatalogConfig, CatalogStore, Selection,
    DEFAULT_DISPLAY_LIMIT, DEFAULT_PLACEHOLDER_IMAGE,
};
pub use encoding::{CategoricalEncoder, EncodingTable};
pub use error::{Error, Result};
pub use features::{FeatureAssembler, PredictionInput};
pub use filter::{Filter, FilterCondition, ALL_BRANDS};
pub use model::PriceModel;
pub use record::{DeviceRecord, Field, FieldKind, SpecVector};
