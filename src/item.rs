use serde::{Deserialize, Serialize};

/// A catalog entry as delivered by the corpus snapshot.
///
/// The similarity side of the engine only ever reads `code`, `description`
/// and `brand`; `id` identifies the item in emitted relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub code: String,
    pub description: String,
    pub brand: Option<String>,
}

impl CatalogItem {
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        description: impl Into<String>,
        brand: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            description: description.into(),
            brand: brand.map(str::to_owned),
        }
    }

    /// The text the engine indexes for this item: code, description and
    /// brand joined by spaces, with a missing brand contributing an empty
    /// segment.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.code,
            self.description,
            self.brand.as_deref().unwrap_or("")
        )
    }
}

/// Discriminates the two item shapes the scorer accepts.
///
/// Resolved once at the boundary; downstream code branches on the tag
/// instead of probing for field presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// An item registered for sample evaluation.
    Sample,
    /// An item awarded inside a procurement process.
    Process,
}

/// Scoring input: one sample or process item, flattened.
///
/// Fields that only exist for one kind stay at their defaults for the
/// other; the extractor consults `kind` to decide which ones to read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub kind: ItemKind,
    pub code: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    /// Sample items: production batch identifier.
    pub batch: Option<String>,
    /// Sample items: evaluation outcome, when one has been recorded.
    pub result: Option<String>,
    /// Process items: quantity awarded in the bidding.
    #[serde(default)]
    pub awarded_quantity: i64,
    /// Process items: price per unit.
    pub unit_price: Option<f64>,
    /// Process items: total awarded value.
    pub total_value: Option<f64>,
}

impl ItemRecord {
    /// An empty sample-shaped record.
    pub fn sample(id: impl Into<String>) -> Self {
        Self::empty(id.into(), ItemKind::Sample)
    }

    /// An empty process-shaped record.
    pub fn process(id: impl Into<String>) -> Self {
        Self::empty(id.into(), ItemKind::Process)
    }

    fn empty(id: String, kind: ItemKind) -> Self {
        Self {
            id,
            kind,
            code: None,
            description: None,
            brand: None,
            quantity: 0,
            batch: None,
            result: None,
            awarded_quantity: 0,
            unit_price: None,
            total_value: None,
        }
    }
}

/// One prior use of a catalog item in a sample bidding.
///
/// The engine never fills these in; `SimilarItem::sample_history` is the
/// slot the caller augments from persisted usage data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleUsage {
    pub bidding_number: String,
    pub agency: String,
    pub result: String,
    pub date: String,
}
