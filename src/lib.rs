//! # Mobidex
//!
//! Browse a mobile-phone specification catalog, estimate prices with a
//! pre-trained model, and find the catalog device closest to a configuration.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! mobidex --dataset mobile_data_cleaned_2026.csv browse --brand Samsung --search galaxy
//! mobidex --dataset mobile_data_cleaned_2026.csv --model model.json \
//!     predict --brand Samsung --ram 8 --battery 5000 --camera 50 --weight 190 \
//!     --os Android --chipset "Snapdragon 8 Gen 2"
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use mobidex::prelude::*;
//!
//! let catalog = Catalog::new(vec![
//!     DeviceRecord::new("Acme", "One")
//!         .with_specs(SpecVector::new(8.0, 4000.0, 48.0, 180.0))
//!         .with_platform("Android", "Snapdragon")
//!         .with_image("a.png"),
//! ]);
//! let workspace = Workspace::from_parts(catalog, None, CatalogConfig::default());
//!
//! let page = workspace.store().browse(&BrowseQuery::default());
//! assert_eq!(page.total, 1);
//!
//! let query = MatchQuery::new(SpecVector::new(8.0, 4100.0, 50.0, 182.0)).with_brand("Acme");
//! let outcome = workspace.engine().find(&query).unwrap();
//! assert_eq!(outcome.image_or(workspace.placeholder_image()), "a.png");
//! ```
//!
//! ## Crate Structure
//!
//! - `mobidex-core` - Device records, catalog store, filters, categorical encoding
//! - `mobidex-similarity` - Exact-then-nearest match engine and explanations
//! - `mobidex-storage` - CSV dataset and JSON model loading, [`Workspace`]

// Re-export core types
pub use mobidex_core::{
    limit, BrowsePage, BrowseQuery, Catalog, CatalogConfig, CatalogStore, CategoricalEncoder,
    DeviceRecord, Error, FeatureAssembler, Field, Filter, FilterCondition, PredictionInput,
    PriceModel, Result, Selection, SpecVector, ALL_BRANDS,
};

// Re-export matching
pub use mobidex_similarity::{ExplainedMatch, MatchEngine, MatchKind, MatchOutcome, MatchQuery};

// Re-export loading
pub use mobidex_storage::{load_catalog, LinearPriceModel, Workspace, WorkspaceConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BrowsePage, BrowseQuery, Catalog, CatalogConfig, CatalogStore, CategoricalEncoder,
        DeviceRecord, Error, ExplainedMatch, LinearPriceModel, MatchEngine, MatchOutcome,
        MatchQuery, PredictionInput, PriceModel, Result, SpecVector, Workspace, WorkspaceConfig,
        ALL_BRANDS,
    };
}
