use crate::loader::load_catalog;
use crate::model::LinearPriceModel;
use mobidex_core::{
    Catalog, CatalogConfig, CatalogStore, CategoricalEncoder, Error, FeatureAssembler,
    PredictionInput, PriceModel, Result,
};
use mobidex_similarity::{MatchEngine, MatchOutcome, MatchQuery};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Where to load the dataset and model from
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    pub dataset_path: PathBuf,
    pub model_path: Option<PathBuf>,
    pub catalog: CatalogConfig,
}

impl WorkspaceConfig {
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            model_path: None,
            catalog: CatalogConfig::default(),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model_path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(model_path.into());
        self
    }
}

/// Everything loaded once at startup, shared read-only afterwards.
///
/// The catalog is handed explicitly to the store, the match engine and the
/// encoder; nothing is held in global state.
pub struct Workspace {
    catalog: Arc<Catalog>,
    store: CatalogStore,
    engine: MatchEngine,
    encoder: CategoricalEncoder,
    model: Option<Arc<dyn PriceModel>>,
}

impl Workspace {
    /// Load the dataset and, if configured, the model
    pub fn open(config: WorkspaceConfig) -> Result<Self> {
        let catalog = load_catalog(&config.dataset_path)?;
        let model = match &config.model_path {
            Some(path) => Some(Arc::new(LinearPriceModel::load(path)?) as Arc<dyn PriceModel>),
            None => None,
        };

        let workspace = Self::from_parts(catalog, model, config.catalog);
        info!(
            "Workspace ready: {} devices, model {}",
            workspace.catalog.len(),
            if workspace.model.is_some() { "loaded" } else { "not configured" }
        );
        Ok(workspace)
    }

    pub fn from_parts(
        catalog: Catalog,
        model: Option<Arc<dyn PriceModel>>,
        config: CatalogConfig,
    ) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            store: CatalogStore::with_config(catalog.clone(), config),
            engine: MatchEngine::new(catalog.clone()),
            encoder: CategoricalEncoder::new(catalog.clone()),
            catalog,
            model,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn encoder(&self) -> &CategoricalEncoder {
        &self.encoder
    }

    pub fn model(&self) -> Option<&dyn PriceModel> {
        self.model.as_deref()
    }

    pub fn placeholder_image(&self) -> &str {
        &self.store.config().placeholder_image
    }

    /// Estimated price for the given configuration
    pub fn predict(&self, input: &PredictionInput) -> Result<f64> {
        let model = self
            .model()
            .ok_or_else(|| Error::Configuration("no price model configured".to_string()))?;
        FeatureAssembler::new(&self.encoder).predict(model, input)
    }

    /// Closest catalog device to a prediction input, constrained to its brand, OS and chipset
    pub fn illustrate(&self, input: &PredictionInput) -> Result<MatchOutcome<'_>> {
        let query = Self::match_query(input);
        self.engine.find(&query)
    }

    pub fn match_query(input: &PredictionInput) -> MatchQuery {
        MatchQuery::new(input.specs)
            .with_brand(input.brand.clone())
            .with_os(input.os.clone())
            .with_chipset(input.chipset.clone())
    }
}
