use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::filters::{matches_budget, matches_genre, matches_group, matches_location};
use crate::core::matcher::MAX_RESULTS;
use crate::core::similarity::{normalize, phrase_needles};
use crate::models::{DrawnVenue, QueryFilters, Venue};
use crate::taxonomy::Taxonomy;

/// Cap on draws from the primary category itself, so at least one slot stays
/// open for a neighbouring door.
const MAX_PRIMARY: usize = 2;

/// Adjacency-aware drawing on top of the plain matcher's filter vocabulary.
///
/// The point of this layer is serendipity with a guarantee: a draw is never
/// entirely one category's worth of venues when the collection can offer a
/// thematic neighbour. Text matches against venue names are the one thing
/// that outranks the mood — someone typing a venue's name should see it.
#[derive(Debug, Clone)]
pub struct AdjacencyDrawer {
    taxonomy: Arc<Taxonomy>,
}

impl AdjacencyDrawer {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    /// Draw up to three venues for the resolved filters, with the process RNG.
    pub fn draw_with_adjacency(
        &self,
        filters: &QueryFilters,
        search_text: Option<&str>,
        venues: &[Venue],
    ) -> Vec<DrawnVenue> {
        self.draw_with_adjacency_with_rng(filters, search_text, venues, &mut rand::thread_rng())
    }

    /// Draw with an injected RNG, so tests can pin outcomes.
    ///
    /// Resolution order: venue-name match, blurb match, primary-category
    /// draw (up to two), adjacency top-up (one per neighbour), then a
    /// fallback fill that still refuses to go all-one-category while any
    /// alternative venue exists.
    pub fn draw_with_adjacency_with_rng<R: Rng>(
        &self,
        filters: &QueryFilters,
        search_text: Option<&str>,
        venues: &[Venue],
        rng: &mut R,
    ) -> Vec<DrawnVenue> {
        let mut picked: Vec<DrawnVenue> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        if let Some(text) = search_text {
            for drawn in self.text_matches(text, venues) {
                push_unique(&mut picked, &mut seen, drawn);
                if picked.len() == MAX_RESULTS {
                    return picked;
                }
            }
        }

        let primary = match filters.mood.as_deref() {
            Some(primary) => primary,
            None => {
                // No category to anchor on: either the text search carried
                // the draw, or fate does.
                if picked.is_empty() {
                    return self.draw_surprise_with_rng(venues, rng);
                }
                self.fill_fallback(&mut picked, &mut seen, None, filters, venues, rng);
                return picked;
            }
        };

        // Strict categorical membership, not synonym expansion: the venue's
        // own filing decides what counts as "the" category here.
        if picked.len() < MAX_RESULTS {
            let mut pool: Vec<&Venue> = venues
                .iter()
                .filter(|v| v.arcana == primary)
                .filter(|v| !seen.contains(&v.name.to_lowercase()))
                .filter(|v| passes_secondary(v, filters))
                .collect();
            pool.shuffle(rng);

            let quota = MAX_PRIMARY.min(MAX_RESULTS - picked.len());
            for venue in pool.into_iter().take(quota) {
                push_unique(&mut picked, &mut seen, DrawnVenue::direct(venue.clone()));
            }
        }

        if picked.len() < MAX_RESULTS {
            let mut neighbors: Vec<&String> = self.taxonomy.neighbors(primary).iter().collect();
            neighbors.shuffle(rng);

            for neighbor in neighbors {
                if picked.len() == MAX_RESULTS {
                    break;
                }
                let pool: Vec<&Venue> = venues
                    .iter()
                    .filter(|v| &v.arcana == neighbor)
                    .filter(|v| !seen.contains(&v.name.to_lowercase()))
                    .filter(|v| passes_secondary(v, filters))
                    .collect();
                if let Some(venue) = pool.choose(rng) {
                    push_unique(
                        &mut picked,
                        &mut seen,
                        DrawnVenue::adjacent((*venue).clone(), primary),
                    );
                }
            }
        }

        if picked.len() < MAX_RESULTS {
            self.fill_fallback(&mut picked, &mut seen, Some(primary), filters, venues, rng);
        }

        picked
    }

    /// Free-text matching on its own: venue names first, then blurbs and
    /// tags. Used as the highest-priority draw stage and as the rescue path
    /// when mood resolution comes back empty or uncertain.
    pub fn text_matches(&self, text: &str, venues: &[Venue]) -> Vec<DrawnVenue> {
        let needles = phrase_needles(text);
        if needles.is_empty() {
            return Vec::new();
        }

        let name_hits = search_names(venues, &needles);
        let hits = if name_hits.is_empty() {
            search_blurbs(venues, &needles)
        } else {
            name_hits
        };

        let mut seen: HashSet<String> = HashSet::new();
        let mut picked = Vec::new();
        for venue in hits {
            push_unique(&mut picked, &mut seen, DrawnVenue::direct(venue.clone()));
            if picked.len() == MAX_RESULTS {
                break;
            }
        }
        picked
    }

    /// Fate draw: one venue chosen blind, then two doors adjacent to it.
    pub fn draw_surprise(&self, venues: &[Venue]) -> Vec<DrawnVenue> {
        self.draw_surprise_with_rng(venues, &mut rand::thread_rng())
    }

    pub fn draw_surprise_with_rng<R: Rng>(
        &self,
        venues: &[Venue],
        rng: &mut R,
    ) -> Vec<DrawnVenue> {
        let first = match venues.choose(rng) {
            Some(v) => v.clone(),
            None => return Vec::new(),
        };

        let primary = first.arcana.clone();
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(first.name.to_lowercase());
        let mut used_categories: HashSet<String> = HashSet::new();
        used_categories.insert(primary.clone());
        let mut picked = vec![DrawnVenue::fate(first)];

        let mut neighbors: Vec<&String> = self.taxonomy.neighbors(&primary).iter().collect();
        neighbors.shuffle(rng);

        // Cards 2 and 3 come from two different neighbouring categories when
        // the collection allows it.
        for neighbor in neighbors {
            if picked.len() == MAX_RESULTS {
                break;
            }
            if used_categories.contains(neighbor.as_str()) {
                continue;
            }
            let pool: Vec<&Venue> = venues
                .iter()
                .filter(|v| &v.arcana == neighbor)
                .filter(|v| !seen.contains(&v.name.to_lowercase()))
                .collect();
            if let Some(venue) = pool.choose(rng) {
                used_categories.insert(neighbor.clone());
                push_unique(
                    &mut picked,
                    &mut seen,
                    DrawnVenue::adjacent((*venue).clone(), &primary),
                );
            }
        }

        // Thin adjacency: keep maximizing category diversity before
        // repeating one.
        while picked.len() < MAX_RESULTS {
            let pool: Vec<&Venue> = venues
                .iter()
                .filter(|v| !used_categories.contains(v.arcana.as_str()))
                .filter(|v| !seen.contains(&v.name.to_lowercase()))
                .collect();
            match pool.choose(rng) {
                Some(venue) => {
                    used_categories.insert(venue.arcana.clone());
                    push_unique(&mut picked, &mut seen, DrawnVenue::direct((*venue).clone()));
                }
                None => break,
            }
        }

        while picked.len() < MAX_RESULTS {
            let pool: Vec<&Venue> = venues
                .iter()
                .filter(|v| !seen.contains(&v.name.to_lowercase()))
                .collect();
            match pool.choose(rng) {
                Some(venue) => {
                    push_unique(&mut picked, &mut seen, DrawnVenue::direct((*venue).clone()))
                }
                None => break,
            }
        }

        picked
    }

    /// Last top-up: the primary category's remainder first, then anywhere,
    /// except that the final slot swaps to a different category rather than
    /// complete an all-primary draw while an alternative exists.
    fn fill_fallback<R: Rng>(
        &self,
        picked: &mut Vec<DrawnVenue>,
        seen: &mut HashSet<String>,
        primary: Option<&str>,
        filters: &QueryFilters,
        venues: &[Venue],
        rng: &mut R,
    ) {
        let mut primary_pool: Vec<&Venue> = Vec::new();
        let mut other_pool: Vec<&Venue> = Vec::new();
        for venue in venues {
            if seen.contains(&venue.name.to_lowercase()) || !passes_secondary(venue, filters) {
                continue;
            }
            if primary.is_some_and(|p| venue.arcana == p) {
                primary_pool.push(venue);
            } else {
                other_pool.push(venue);
            }
        }
        primary_pool.shuffle(rng);
        other_pool.shuffle(rng);

        while picked.len() < MAX_RESULTS {
            let all_primary_so_far = primary.is_some_and(|p| {
                !picked.is_empty() && picked.iter().all(|d| d.venue.arcana == p)
            });
            let last_slot = picked.len() == MAX_RESULTS - 1;

            let next = if last_slot && all_primary_so_far && !other_pool.is_empty() {
                Some(other_pool.remove(0))
            } else if !primary_pool.is_empty() {
                Some(primary_pool.remove(0))
            } else if !other_pool.is_empty() {
                Some(other_pool.remove(0))
            } else {
                None
            };

            match next {
                Some(venue) => push_unique(picked, seen, DrawnVenue::direct(venue.clone())),
                None => break,
            }
        }
    }
}

/// Secondary filters only; mood membership is the drawer's own business.
fn passes_secondary(venue: &Venue, filters: &QueryFilters) -> bool {
    if let Some(location) = filters.location.as_deref() {
        if !matches_location(venue, location) {
            return false;
        }
    }
    if let Some(genre) = filters.genre.as_deref() {
        if !matches_genre(venue, genre) {
            return false;
        }
    }
    if let Some(budget) = filters.budget {
        if !matches_budget(venue, budget) {
            return false;
        }
    }
    if let Some(group) = filters.group {
        if !matches_group(venue, group) {
            return false;
        }
    }
    true
}

fn push_unique(picked: &mut Vec<DrawnVenue>, seen: &mut HashSet<String>, drawn: DrawnVenue) {
    let key = drawn.venue.name.to_lowercase();
    if seen.insert(key) {
        picked.push(drawn);
    }
}

/// Collect venues whose haystack contains a needle, walking needles in
/// order. `phrase_needles` emits longer phrases first, so a full phrase
/// match outranks a stray single-word hit.
fn search_by_needles<'a, F>(venues: &'a [Venue], needles: &[String], haystack: F) -> Vec<&'a Venue>
where
    F: Fn(&Venue) -> String,
{
    let haystacks: Vec<String> = venues.iter().map(|v| normalize(&haystack(v))).collect();

    let mut hits: Vec<&Venue> = Vec::new();
    for needle in needles {
        for (venue, hay) in venues.iter().zip(&haystacks) {
            if hay.contains(needle.as_str()) && !hits.iter().any(|h| h.name == venue.name) {
                hits.push(venue);
            }
        }
    }
    hits
}

fn search_names<'a>(venues: &'a [Venue], needles: &[String]) -> Vec<&'a Venue> {
    search_by_needles(venues, needles, |v| v.name.clone())
}

fn search_blurbs<'a>(venues: &'a [Venue], needles: &[String]) -> Vec<&'a Venue> {
    search_by_needles(venues, needles, |v| {
        format!(
            "{} {} {} {}",
            v.vibe_note,
            v.whisper,
            v.mood_tags.join(" "),
            v.genres.join(" ")
        )
    })
}
