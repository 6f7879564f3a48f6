use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::item::{ItemKind, ItemRecord};

/// Measurement units that show up in usable catalog descriptions, with an
/// optional quantity prefix glued on ("10ml", "500mg").
static UNIT_TERMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b\d*(mg|ml|kg|g|cm|mm|unid|und|pc|pç)\b").unwrap());

/// Medication vocabulary: generic terms plus the common dosage forms.
static MEDICAL_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(medicamento|remedio|remédio|droga|farmaco|fármaco|tratamento|comprimido|capsula|cápsula|pomada|xarope|ampola|paracetamol|dipirona)\b")
        .unwrap()
});

/// Equipment vocabulary.
static TECHNICAL_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(equipamento|aparelho|instrumento|dispositivo)\b").unwrap()
});

/// A single extracted feature value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Flag(bool),
    Number(f64),
}

/// Named features derived from one item record.
///
/// Built in one pass by [`extract_features`] and only read afterwards.
/// Insertion order is preserved so serialized feature sets keep a stable,
/// human-scannable layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet {
    values: IndexMap<String, FeatureValue>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_flag(&mut self, name: &str, value: bool) {
        self.values.insert(name.to_owned(), FeatureValue::Flag(value));
    }

    pub fn put_number(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_owned(), FeatureValue::Number(value));
    }

    /// Boolean feature; `false` when missing or numeric.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(FeatureValue::Flag(true)))
    }

    /// Numeric feature; `0.0` when missing or boolean.
    pub fn number(&self, name: &str) -> f64 {
        match self.values.get(name) {
            Some(FeatureValue::Number(value)) => *value,
            _ => 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Derive the flat feature set for one item record.
///
/// Deterministic field inspection, no I/O, never fails: missing fields
/// become `false`/`0`. Kind-specific features follow the record's tag —
/// process records get the pricing block, sample records get batch and
/// result flags.
pub fn extract_features(record: &ItemRecord) -> FeatureSet {
    let mut features = FeatureSet::new();

    features.put_flag("has_quantity", record.quantity != 0);
    features.put_number("quantity", record.quantity as f64);
    features.put_flag(
        "has_description",
        non_empty(&record.description) || non_empty(&record.code),
    );
    features.put_flag("has_brand", non_empty(&record.brand));

    match record.kind {
        ItemKind::Process => {
            let unit_price = record.unit_price.unwrap_or(0.0);
            let total_value = record.total_value.unwrap_or(0.0);
            features.put_number("awarded_quantity", record.awarded_quantity as f64);
            features.put_number("unit_price", unit_price);
            features.put_number("total_value", total_value);
            features.put_flag("has_valid_pricing", unit_price > 0.0 && total_value > 0.0);
        }
        ItemKind::Sample => {
            features.put_flag("has_batch", non_empty(&record.batch));
            features.put_flag("has_result", non_empty(&record.result));
        }
    }

    let description = record.description.as_deref().unwrap_or("");
    features.put_number("description_length", description.chars().count() as f64);
    features.put_flag("has_numbers", description.chars().any(|c| c.is_ascii_digit()));
    features.put_flag("has_units", UNIT_TERMS.is_match(description));
    features.put_flag("has_medical_terms", MEDICAL_TERMS.is_match(description));
    features.put_flag("has_technical_terms", TECHNICAL_TERMS.is_match(description));

    features
}

fn non_empty(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_features_for_a_complete_sample_item() {
        let mut record = ItemRecord::sample("s1");
        record.quantity = 50;
        record.description = Some("comprimido 500mg paracetamol".to_string());
        record.brand = Some("Generico".to_string());

        let features = extract_features(&record);
        assert!(features.flag("has_quantity"));
        assert_eq!(features.number("quantity"), 50.0);
        assert!(features.flag("has_description"));
        assert!(features.flag("has_brand"));
        assert!(features.flag("has_numbers"));
        assert!(features.flag("has_units"));
        assert!(features.flag("has_medical_terms"));
        assert!(!features.flag("has_technical_terms"));
    }

    #[test]
    fn empty_record_defaults_to_falsy_features() {
        let record = ItemRecord::sample("s2");

        let features = extract_features(&record);
        assert!(!features.flag("has_quantity"));
        assert!(!features.flag("has_description"));
        assert!(!features.flag("has_brand"));
        assert_eq!(features.number("quantity"), 0.0);
        assert_eq!(features.number("description_length"), 0.0);
        assert!(!features.flag("has_units"));
    }

    #[test]
    fn code_alone_counts_as_description() {
        let mut record = ItemRecord::sample("s3");
        record.code = Some("OR1".to_string());

        assert!(extract_features(&record).flag("has_description"));
    }

    #[test]
    fn sample_records_get_batch_and_result_flags() {
        let mut record = ItemRecord::sample("s4");
        record.batch = Some("L-2024-09".to_string());

        let features = extract_features(&record);
        assert!(features.flag("has_batch"));
        assert!(!features.flag("has_result"));
        // no pricing block on sample records
        assert!(!features.flag("has_valid_pricing"));
        assert_eq!(features.number("unit_price"), 0.0);
    }

    #[test]
    fn process_records_get_the_pricing_block() {
        let mut record = ItemRecord::process("p1");
        record.awarded_quantity = 200;
        record.unit_price = Some(12.5);
        record.total_value = Some(2500.0);

        let features = extract_features(&record);
        assert_eq!(features.number("awarded_quantity"), 200.0);
        assert_eq!(features.number("unit_price"), 12.5);
        assert!(features.flag("has_valid_pricing"));
        assert!(!features.flag("has_batch"));
    }

    #[test]
    fn pricing_needs_both_sides_positive() {
        let mut record = ItemRecord::process("p2");
        record.unit_price = Some(12.5);

        assert!(!extract_features(&record).flag("has_valid_pricing"));
    }

    #[test]
    fn unit_terms_match_with_and_without_a_number_prefix() {
        let mut record = ItemRecord::sample("s5");

        record.description = Some("seringa descartável 10ml".to_string());
        assert!(extract_features(&record).flag("has_units"));

        record.description = Some("dose única de 500 mg".to_string());
        assert!(extract_features(&record).flag("has_units"));

        record.description = Some("drug paragraph".to_string());
        assert!(!extract_features(&record).flag("has_units"));
    }

    #[test]
    fn technical_terms_are_detected() {
        let mut record = ItemRecord::sample("s6");
        record.description = Some("aparelho de pressão digital".to_string());

        let features = extract_features(&record);
        assert!(features.flag("has_technical_terms"));
        assert!(!features.flag("has_medical_terms"));
    }

    #[test]
    fn feature_sets_serialize_as_a_flat_map() {
        let mut record = ItemRecord::sample("s7");
        record.quantity = 3;
        let features = extract_features(&record);

        let json = serde_json::to_value(&features).unwrap();
        assert_eq!(json["has_quantity"], serde_json::json!(true));
        assert_eq!(json["quantity"], serde_json::json!(3.0));
    }
}
