use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::item::{ItemKind, ItemRecord};
use crate::viability::features::{extract_features, FeatureSet};

/// Version tag stamped on every prediction.
pub const MODEL_VERSION: &str = "1.0";

/// Score at or above which an item is considered viable.
pub const VIABILITY_THRESHOLD: f64 = 0.6;

/// Fixed normalization denominator: the sum of every rule weight below,
/// including the pricing block. It stays constant even for item shapes
/// whose rules cannot fire (sample items never earn the pricing weight);
/// the historical score distribution depends on that, so the denominator
/// is not derived from the rules that applied.
const MAX_SCORE: f64 = 1.0;

/// Heuristic viability verdict for one item record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Normalized score in [0, 1], rounded to four decimals.
    pub score: f64,
    /// `score >= 0.6`, exactly.
    pub viable: bool,
    pub model_version: String,
    pub features: FeatureSet,
}

impl Prediction {
    /// Neutral fallback for boundary code that must never block its
    /// caller: registering an item proceeds even when scoring it did not.
    pub fn neutral() -> Self {
        Self {
            score: 0.5,
            viable: false,
            model_version: MODEL_VERSION.to_string(),
            features: FeatureSet::default(),
        }
    }
}

/// One batch entry: the prediction plus the id slot matching the record's
/// kind, so the caller can persist it against the right table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPrediction {
    pub sample_item_id: Option<String>,
    pub process_item_id: Option<String>,
    #[serde(flatten)]
    pub prediction: Prediction,
}

/// Rule-based viability model, version "1.0".
///
/// Accumulates a weighted sum over a fixed rule table and normalizes by
/// [`MAX_SCORE`]. Pure and stateless; scoring a batch in parallel is safe.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViabilityModel;

impl ViabilityModel {
    pub fn new() -> Self {
        Self
    }

    /// Score one record.
    pub fn predict(&self, record: &ItemRecord) -> Prediction {
        let features = extract_features(record);
        let score = round4(viability_score(&features));
        Prediction {
            score,
            viable: score >= VIABILITY_THRESHOLD,
            model_version: MODEL_VERSION.to_string(),
            features,
        }
    }

    /// Score a mixed batch of sample and process records.
    ///
    /// Records are independent, so the batch is scored in parallel; output
    /// order matches input order.
    pub fn predict_batch(&self, records: &[ItemRecord]) -> Vec<ItemPrediction> {
        records
            .par_iter()
            .map(|record| {
                let prediction = self.predict(record);
                let (sample_item_id, process_item_id) = match record.kind {
                    ItemKind::Sample => (Some(record.id.clone()), None),
                    ItemKind::Process => (None, Some(record.id.clone())),
                };
                ItemPrediction {
                    sample_item_id,
                    process_item_id,
                    prediction,
                }
            })
            .collect()
    }
}

/// The rule table.
///
/// | signal                | weight | condition                              |
/// |-----------------------|--------|----------------------------------------|
/// | has quantity          | 0.20   | quantity present                       |
/// | has description       | 0.20   | description or code present            |
/// | has brand             | 0.10   | brand present                          |
/// | description length    | 0.10   | longer than 10 characters              |
/// | reasonable quantity   | 0.10   | 0 < q <= 10000; half credit above      |
/// | measurement units     | 0.10   | unit term in description               |
/// | domain keywords       | 0.05   | medical or technical term              |
/// | valid pricing         | 0.15   | 0.10 base + 0.05 for a sane unit price |
fn viability_score(features: &FeatureSet) -> f64 {
    let mut score = 0.0;

    // essential information
    if features.flag("has_quantity") {
        score += 0.2;
    }
    if features.flag("has_description") {
        score += 0.2;
    }

    // quality indicators
    if features.flag("has_brand") {
        score += 0.1;
    }
    if features.number("description_length") > 10.0 {
        score += 0.1;
    }

    // oversized orders only get half credit
    let quantity = features.number("quantity");
    if quantity > 0.0 && quantity <= 10_000.0 {
        score += 0.1;
    } else if quantity > 10_000.0 {
        score += 0.05;
    }

    if features.flag("has_units") {
        score += 0.1;
    }

    if features.flag("has_medical_terms") || features.flag("has_technical_terms") {
        score += 0.05;
    }

    // pricing block, process items only
    if features.flag("has_valid_pricing") {
        score += 0.1;
        let unit_price = features.number("unit_price");
        if unit_price > 0.01 && unit_price < 100_000.0 {
            score += 0.05;
        }
    }

    (score / MAX_SCORE).clamp(0.0, 1.0)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
