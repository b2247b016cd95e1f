use crate::Result;

/// A pre-trained price regressor.
///
/// Implementations report the ordered feature names they were trained on;
/// `predict` expects a vector in exactly that order.
pub trait PriceModel: Send + Sync {
    fn feature_names(&self) -> &[String];

    fn predict(&self, features: &[f64]) -> Result<f64>;
}
