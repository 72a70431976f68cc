use std::collections::HashMap;
use std::sync::Arc;

use crate::core::similarity::{best_similarity, hyphen_stem, normalize, tokenize};
use crate::models::{MoodMatch, MoodResolution};
use crate::taxonomy::Taxonomy;

/// Minimum similarity for a fuzzy synonym hit. Below this, typos stay
/// unresolved rather than guessing.
pub const FUZZY_THRESHOLD: f64 = 0.75;

/// One synonym hit against the query.
#[derive(Debug, Clone, Copy)]
struct Hit {
    category: usize,
    specificity: f64,
    quality: f64,
}

/// Resolves free text into a ranked list of (mood, confidence) pairs.
///
/// Two-tier matching: an exact pass over the synonym index, and a fuzzy pass
/// that only runs when the exact pass comes up empty. Scores are weighted by
/// synonym specificity so a rare precise term outranks a common ambiguous
/// one, then normalized so the caller can apply confidence thresholds.
#[derive(Debug, Clone)]
pub struct MoodResolver {
    taxonomy: Arc<Taxonomy>,
    fuzzy_threshold: f64,
}

impl MoodResolver {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            taxonomy,
            fuzzy_threshold: FUZZY_THRESHOLD,
        }
    }

    pub fn with_threshold(taxonomy: Arc<Taxonomy>, fuzzy_threshold: f64) -> Self {
        Self {
            taxonomy,
            fuzzy_threshold,
        }
    }

    /// Resolve a query into ranked mood candidates, strongest first.
    ///
    /// Empty or unrecognizable input yields an empty ranking, never an error.
    pub fn resolve(&self, query: &str) -> Vec<MoodMatch> {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return Vec::new();
        }
        let tokens = tokenize(&normalized);

        let mut hits = self.exact_pass(&normalized, &tokens);
        if hits.is_empty() {
            hits = self.fuzzy_pass(&normalized, &tokens);
        }
        if hits.is_empty() {
            return Vec::new();
        }

        self.score(hits)
    }

    /// Top-1 variant: the strongest candidate, or the no-match sentinel.
    pub fn resolve_top(&self, query: &str) -> MoodResolution {
        match self.resolve(query).into_iter().next() {
            Some(m) => MoodResolution {
                mood: Some(m.mood),
                confidence: m.confidence,
            },
            None => MoodResolution::none(),
        }
    }

    /// Exact pass: multi-word synonyms as substrings of the whole query,
    /// single-word synonyms against tokens and their hyphen stems. At most
    /// one single-word hit is kept per mood (first found wins).
    fn exact_pass(&self, normalized: &str, tokens: &[&str]) -> Vec<Hit> {
        let mut hits = Vec::new();

        for (synonym, entry) in self.taxonomy.synonym_index() {
            if synonym.contains(' ') && normalized.contains(synonym.as_str()) {
                hits.push(Hit {
                    category: entry.category,
                    specificity: entry.specificity,
                    quality: 1.0,
                });
            }
        }

        let mut seen_moods: Vec<usize> = Vec::new();
        for token in tokens {
            let entry = self
                .taxonomy
                .lookup_synonym(token)
                .or_else(|| hyphen_stem(token).and_then(|stem| self.taxonomy.lookup_synonym(stem)));

            if let Some(entry) = entry {
                if !seen_moods.contains(&entry.category) {
                    seen_moods.push(entry.category);
                    hits.push(Hit {
                        category: entry.category,
                        specificity: entry.specificity,
                        quality: 1.0,
                    });
                }
            }
        }

        hits
    }

    /// Fuzzy pass: every synonym compared against the whole query and each
    /// token, best ratio kept when it clears the threshold. Recovers typos
    /// like "dragg" → "drag".
    fn fuzzy_pass(&self, normalized: &str, tokens: &[&str]) -> Vec<Hit> {
        let mut hits = Vec::new();

        for (synonym, entry) in self.taxonomy.synonym_index() {
            let sim = best_similarity(synonym, normalized, tokens);
            if sim >= self.fuzzy_threshold {
                hits.push(Hit {
                    category: entry.category,
                    specificity: entry.specificity,
                    quality: sim,
                });
            }
        }

        hits
    }

    /// Score accumulation and normalization.
    ///
    /// Per mood, the strongest hit contributes its full `specificity ×
    /// quality`; additional hits contribute half, so synonym-dense moods
    /// can't run away on volume. Each mood's total is then divided by the
    /// best total and scaled by its own best match quality, which caps
    /// fuzzy-only moods below 1.0.
    fn score(&self, hits: Vec<Hit>) -> Vec<MoodMatch> {
        let mut per_mood: HashMap<usize, Vec<Hit>> = HashMap::new();
        for hit in hits {
            per_mood.entry(hit.category).or_default().push(hit);
        }

        let mut totals: Vec<(usize, f64, f64)> = Vec::with_capacity(per_mood.len());
        for (category, mut mood_hits) in per_mood {
            mood_hits.sort_by(|a, b| {
                (b.specificity * b.quality)
                    .partial_cmp(&(a.specificity * a.quality))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let mut total = 0.0;
            let mut best_quality: f64 = 0.0;
            for (i, hit) in mood_hits.iter().enumerate() {
                let score = hit.specificity * hit.quality;
                total += if i == 0 { score } else { score * 0.5 };
                best_quality = best_quality.max(hit.quality);
            }
            totals.push((category, total, best_quality));
        }

        let max_total = totals.iter().map(|(_, t, _)| *t).fold(0.0, f64::max);
        if max_total <= 0.0 {
            return Vec::new();
        }

        let mut ranked: Vec<MoodMatch> = totals
            .into_iter()
            .map(|(category, total, best_quality)| MoodMatch {
                mood: self.taxonomy.category_name(category).to_string(),
                confidence: ((total / max_total) * best_quality).min(1.0),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.mood.cmp(&b.mood))
        });

        ranked
    }
}
