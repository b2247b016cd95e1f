//! Feature vector assembly for price prediction

use crate::{CategoricalEncoder, Error, Field, FieldKind, PriceModel, Result, SpecVector};
use serde::{Deserialize, Serialize};

/// User-selected device configuration to price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub brand: String,
    pub specs: SpecVector,
    pub os: String,
    pub chipset: String,
}

impl PredictionInput {
    fn categorical(&self, field: Field) -> Option<&str> {
        match field {
            Field::Brand => Some(&self.brand),
            Field::Os => Some(&self.os),
            Field::Chipset => Some(&self.chipset),
            _ => None,
        }
    }

    fn numeric(&self, field: Field) -> Option<f64> {
        self.specs
            .entries()
            .into_iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value)
    }
}

/// Builds model inputs in the model's own feature order
pub struct FeatureAssembler<'a> {
    encoder: &'a CategoricalEncoder,
}

impl<'a> FeatureAssembler<'a> {
    pub fn new(encoder: &'a CategoricalEncoder) -> Self {
        Self { encoder }
    }

    pub fn assemble(&self, feature_names: &[String], input: &PredictionInput) -> Result<Vec<f64>> {
        feature_names
            .iter()
            .map(|name| self.feature(name.trim(), input))
            .collect()
    }

    /// Assemble features for `model` and run its prediction
    pub fn predict(&self, model: &dyn PriceModel, input: &PredictionInput) -> Result<f64> {
        let features = self.assemble(model.feature_names(), input)?;
        model.predict(&features)
    }

    fn feature(&self, name: &str, input: &PredictionInput) -> Result<f64> {
        let field: Field = name.parse()?;

        if field.is_categorical() {
            let value = input.categorical(field).unwrap_or_default();
            return Ok(f64::from(self.encoder.encode_field(field, value)?));
        }

        match (field.kind(), input.numeric(field)) {
            (FieldKind::Number, Some(value)) if value.is_finite() && value >= 0.0 => Ok(value),
            (FieldKind::Number, Some(value)) => Err(Error::InvalidQuery(format!(
                "feature '{}' must be a non-negative number, got {}",
                field, value
            ))),
            _ => Err(Error::Configuration(format!(
                "model feature '{}' cannot be supplied from prediction input",
                field
            ))),
        }
    }
}
