use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::filters::{
    expand_mood_terms, matches_budget, matches_genre, matches_group, matches_location,
    matches_mood,
};
use crate::models::{QueryFilters, Venue};
use crate::taxonomy::Taxonomy;

/// How many venues a match returns at most.
pub const MAX_RESULTS: usize = 3;

/// Plain venue matcher: applies the per-filter chain, then shuffles,
/// deduplicates by name, and returns a short result set.
///
/// An empty result is a normal outcome the caller must handle; it is never
/// an error.
#[derive(Debug, Clone)]
pub struct VenueMatcher {
    taxonomy: Arc<Taxonomy>,
    max_results: usize,
}

impl VenueMatcher {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            taxonomy,
            max_results: MAX_RESULTS,
        }
    }

    pub fn with_max_results(taxonomy: Arc<Taxonomy>, max_results: usize) -> Self {
        Self {
            taxonomy,
            max_results,
        }
    }

    /// Match with the process RNG.
    pub fn match_venues(&self, filters: &QueryFilters, venues: &[Venue]) -> Vec<Venue> {
        self.match_venues_with_rng(filters, venues, &mut rand::thread_rng())
    }

    /// Match with an injected RNG, so tests can pin the shuffle.
    pub fn match_venues_with_rng<R: Rng>(
        &self,
        filters: &QueryFilters,
        venues: &[Venue],
        rng: &mut R,
    ) -> Vec<Venue> {
        let mood_terms = filters
            .mood
            .as_deref()
            .map(|mood| expand_mood_terms(&self.taxonomy, mood));

        let mut candidates: Vec<&Venue> = venues
            .iter()
            .filter(|venue| self.passes_filters(venue, filters, mood_terms.as_deref()))
            .collect();

        tracing::debug!(
            "{} of {} venues passed the filter chain",
            candidates.len(),
            venues.len()
        );

        // Shuffle so identical queries don't pin the same three venues.
        candidates.shuffle(rng);

        let mut seen_names: Vec<String> = Vec::new();
        let mut results = Vec::with_capacity(self.max_results);
        for venue in candidates {
            let key = venue.name.to_lowercase();
            if seen_names.contains(&key) {
                continue;
            }
            seen_names.push(key);
            results.push(venue.clone());
            if results.len() == self.max_results {
                break;
            }
        }

        results
    }

    fn passes_filters(
        &self,
        venue: &Venue,
        filters: &QueryFilters,
        mood_terms: Option<&[String]>,
    ) -> bool {
        if let Some(terms) = mood_terms {
            if !matches_mood(venue, terms) {
                tracing::debug!("'{}' eliminated by mood filter", venue.name);
                return false;
            }
        }

        if let Some(location) = filters.location.as_deref() {
            if !matches_location(venue, location) {
                tracing::debug!("'{}' eliminated by location filter", venue.name);
                return false;
            }
        }

        if let Some(genre) = filters.genre.as_deref() {
            if !matches_genre(venue, genre) {
                tracing::debug!("'{}' eliminated by genre filter", venue.name);
                return false;
            }
        }

        if let Some(budget) = filters.budget {
            if !matches_budget(venue, budget) {
                tracing::debug!("'{}' eliminated by budget filter", venue.name);
                return false;
            }
        }

        if let Some(group) = filters.group {
            if !matches_group(venue, group) {
                tracing::debug!("'{}' eliminated by group filter", venue.name);
                return false;
            }
        }

        true
    }
}
