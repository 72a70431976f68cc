//! The mood taxonomy: categories, their synonym vocabulary, and the
//! adjacency graph between them.
//!
//! Loaded once at startup into an immutable [`Taxonomy`] that is handed to
//! the resolver and matcher by reference. Nothing here mutates per-query.

pub mod adjacency;

pub use adjacency::AdjacencyGraph;

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Single words that are strong mood signals despite being one word long.
/// Their specificity gets a +2 bump so e.g. "witchy" outranks a co-occurring
/// common synonym. Curated with the vocabulary; change with care, since
/// downstream confidence thresholds are tuned against it.
const SPECIFIC_TERMS: &[&str] = &[
    "witchy",
    "drag",
    "cabaret",
    "burlesque",
    "queer",
    "folk",
    "goth",
    "pagan",
    "klezmer",
    "seance",
    "gong",
    "improv",
];

/// Errors that can occur loading the taxonomy.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("I/O error reading mood index: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse mood index: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Mood index is empty")]
    Empty,
}

/// One mood category with its synonym vocabulary.
#[derive(Debug, Clone)]
pub struct MoodCategory {
    pub name: String,
    pub description: String,
    pub synonyms: Vec<String>,
    pub vibe_notes: String,
}

/// On-disk shape of one mood index entry.
#[derive(Debug, Deserialize)]
struct RawCategory {
    #[serde(default)]
    description: String,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    vibe_notes: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SynonymEntry {
    /// Index into `Taxonomy::categories`.
    pub category: usize,
    pub specificity: f64,
}

/// Immutable mood taxonomy with a derived synonym index.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<MoodCategory>,
    by_name: HashMap<String, usize>,
    synonym_index: HashMap<String, SynonymEntry>,
    adjacency: AdjacencyGraph,
}

impl Taxonomy {
    /// Build a taxonomy from categories and an adjacency graph.
    ///
    /// Synonyms are lowercased into the index; when two categories claim the
    /// same synonym the later one wins, mirroring the historical index
    /// behaviour. Specificity is the phrase's word count, plus 2 for the
    /// curated high-signal single words.
    pub fn new(categories: Vec<MoodCategory>, adjacency: AdjacencyGraph) -> Self {
        let mut by_name = HashMap::new();
        let mut synonym_index = HashMap::new();

        for (idx, category) in categories.iter().enumerate() {
            by_name.insert(category.name.clone(), idx);
            for synonym in &category.synonyms {
                let key = synonym.trim().to_lowercase();
                if key.is_empty() {
                    continue;
                }
                let specificity = synonym_specificity(&key);
                synonym_index.insert(
                    key,
                    SynonymEntry {
                        category: idx,
                        specificity,
                    },
                );
            }
        }

        for category in &categories {
            for neighbor in adjacency.neighbors(&category.name) {
                if !by_name.contains_key(neighbor) {
                    tracing::warn!(
                        "Adjacency references unknown category '{}' (from '{}')",
                        neighbor,
                        category.name
                    );
                }
            }
        }

        Self {
            categories,
            by_name,
            synonym_index,
            adjacency,
        }
    }

    /// Load the mood index from a JSON file (category name → entry) and pair
    /// it with the built-in adjacency map.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TaxonomyError> {
        let raw = std::fs::read_to_string(path)?;
        let parsed: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw)?;

        let mut categories = Vec::with_capacity(parsed.len());
        for (name, value) in parsed {
            let entry: RawCategory = serde_json::from_value(value)?;
            categories.push(MoodCategory {
                name,
                description: entry.description,
                synonyms: entry.synonyms,
                vibe_notes: entry.vibe_notes,
            });
        }

        if categories.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        Ok(Self::new(categories, AdjacencyGraph::built_in()))
    }

    pub fn categories(&self) -> &[MoodCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&MoodCategory> {
        self.by_name.get(name).map(|&idx| &self.categories[idx])
    }

    pub fn category_name(&self, idx: usize) -> &str {
        &self.categories[idx].name
    }

    /// The derived synonym index: lowercase phrase → (category, specificity).
    pub fn synonym_index(&self) -> &HashMap<String, SynonymEntry> {
        &self.synonym_index
    }

    pub fn lookup_synonym(&self, phrase: &str) -> Option<SynonymEntry> {
        self.synonym_index.get(phrase).copied()
    }

    pub fn adjacency(&self) -> &AdjacencyGraph {
        &self.adjacency
    }

    /// Neighbours of a category; empty when the category has no adjacency.
    pub fn neighbors(&self, category: &str) -> &[String] {
        self.adjacency.neighbors(category)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn synonym_specificity(phrase: &str) -> f64 {
    let words = phrase.split_whitespace().count().max(1) as f64;
    if SPECIFIC_TERMS.contains(&phrase) {
        words + 2.0
    } else {
        words
    }
}
