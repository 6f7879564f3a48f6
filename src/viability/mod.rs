pub mod features;
pub mod score;

pub use self::features::{extract_features, FeatureSet, FeatureValue};
pub use self::score::{ItemPrediction, Prediction, ViabilityModel, MODEL_VERSION, VIABILITY_THRESHOLD};
