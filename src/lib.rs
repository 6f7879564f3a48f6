//! Item similarity search and viability scoring for procurement catalogs.
//!
//! Two independent capabilities over in-memory snapshots:
//! - rank catalog items against a free-text query (TF-IDF cosine, with a
//!   cheaper Jaccard fallback), and
//! - predict whether a newly registered item is complete enough to be
//!   viable (weighted rule evaluation over extracted features).
//!
//! Everything is synchronous pure computation; persistence and transport
//! belong to the caller.
pub mod error;
pub mod item;
pub mod similarity;
pub mod viability;

/// Front door for similarity search.
/// Holds the ranking, fuzzy and relationship knobs and talks to a
/// [`CatalogSource`] for the corpus snapshot. Every search entry point has
/// a `try_*` variant that propagates retrieval failures and a fail-soft
/// variant that logs them and returns an empty result.
pub use similarity::SimilarityEngine;

/// Corpus snapshot collaborator.
/// Implemented by whatever owns the catalog; `Vec<CatalogItem>` implements
/// it for tests and simple callers.
pub use similarity::CatalogSource;

/// Ranked search configuration and result entry.
pub use similarity::rank::{RankOptions, SimilarItem};

/// Fuzzy search configuration.
pub use similarity::fuzzy::FuzzyOptions;

/// Similarity edge emitted for persistence as part of the history graph.
pub use similarity::relationship::HistoryRelationship;

/// Rule-based viability model.
/// `predict` scores one record; `predict_batch` scores a mixed batch in
/// parallel, preserving input order.
pub use viability::ViabilityModel;

/// Viability verdict: bounded score, threshold verdict, model version and
/// the extracted features that produced it. `Prediction::neutral()` is the
/// fallback for boundary code that must never block item creation.
pub use viability::{ItemPrediction, Prediction};

/// Flat named-feature map derived from one item record.
pub use viability::{FeatureSet, FeatureValue};

/// Catalog and scoring input records.
pub use item::{CatalogItem, ItemKind, ItemRecord, SampleUsage};

/// Boundary error for failed corpus retrieval.
pub use error::RetrievalError;
