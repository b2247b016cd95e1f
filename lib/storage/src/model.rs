use mobidex_core::{Error, PriceModel, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Pre-trained linear price regressor exported as JSON:
///
/// ```json
/// { "feature_names": ["brand", "RAM_GB"], "coefficients": [12.5, 40.0], "intercept": 99.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPriceModel {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    #[serde(default)]
    intercept: f64,
}

impl LinearPriceModel {
    pub fn new(feature_names: Vec<String>, coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        let model = Self {
            feature_names,
            coefficients,
            intercept,
        };
        model.check()?;
        Ok(model)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::Initialization(format!("failed to read model {}: {}", path.display(), e))
        })?;
        let model = Self::from_json(&json)?;
        info!("Loaded price model with {} features from {:?}", model.feature_names.len(), path);
        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)
            .map_err(|e| Error::Initialization(format!("invalid model file: {}", e)))?;
        model.check()?;
        Ok(model)
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    fn check(&self) -> Result<()> {
        if self.feature_names.is_empty() {
            return Err(Error::Initialization("model has no features".to_string()));
        }
        if self.feature_names.len() != self.coefficients.len() {
            return Err(Error::Initialization(format!(
                "model has {} feature names but {} coefficients",
                self.feature_names.len(),
                self.coefficients.len()
            )));
        }
        if self.coefficients.iter().chain([&self.intercept]).any(|c| !c.is_finite()) {
            return Err(Error::Initialization("model parameters must be finite".to_string()));
        }
        Ok(())
    }
}

impl PriceModel for LinearPriceModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(Error::InvalidQuery(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }

        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>())
    }
}
