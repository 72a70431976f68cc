use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::models::Venue;

/// Venues removed from the catalog at load time (curation decisions).
const EXCLUDED_VENUES: &[&str] = &["Streatham Space Project", "The Château", "Château"];

const DEFAULT_AREA: &str = "London";
const DEFAULT_ARCANA: &str = "Romanticised London";

/// Errors that can occur loading the venue catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error reading venue catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse venue catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk venue shape. The catalog files have grown organically and use
/// more than one name for the same field; every variant is accepted here and
/// collapsed into the canonical [`Venue`] exactly once.
#[derive(Debug, Deserialize)]
struct RawVenue {
    name: Option<String>,
    #[serde(alias = "area")]
    location: Option<String>,
    arcana: Option<String>,
    #[serde(rename = "type", alias = "venue_type")]
    venue_type: Option<String>,
    #[serde(alias = "mood_tags")]
    moods: Option<Vec<String>>,
    genres: Option<Vec<String>>,
    tags: Option<Vec<String>>,
    whisper: Option<String>,
    #[serde(alias = "tone_notes", alias = "vibe_note")]
    blurb: Option<String>,
    #[serde(alias = "website")]
    url: Option<String>,
    price: Option<String>,
    typical_start_time: Option<String>,
}

/// The venue collection, loaded once per process and read-only thereafter.
#[derive(Debug, Clone)]
pub struct VenueCatalog {
    venues: Vec<Venue>,
}

impl VenueCatalog {
    /// Load and normalize the catalog from a JSON array file. Applies the
    /// exclusion list and name-based deduplication (first occurrence wins).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let parsed: Vec<RawVenue> = serde_json::from_str(&raw)?;
        Ok(Self::from_raw(parsed))
    }

    /// Build a catalog directly from canonical venues (tests, embedding).
    pub fn from_venues(venues: Vec<Venue>) -> Self {
        Self { venues }
    }

    fn from_raw(raw: Vec<RawVenue>) -> Self {
        let mut venues = Vec::with_capacity(raw.len());
        let mut seen_names: Vec<String> = Vec::new();

        for entry in raw {
            let venue = normalize_venue(entry);
            if venue.name.is_empty() {
                continue;
            }
            if EXCLUDED_VENUES
                .iter()
                .any(|excluded| venue.name.to_lowercase().contains(&excluded.to_lowercase()))
            {
                continue;
            }
            let key = venue.name.to_lowercase();
            if seen_names.contains(&key) {
                continue;
            }
            seen_names.push(key);
            venues.push(venue);
        }

        tracing::info!("Venue catalog loaded: {} venues", venues.len());
        Self { venues }
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

/// Collapse a raw record into the canonical shape. Missing fields fall back
/// to safe defaults rather than failing the load; the venue's primary
/// category is always present in its mood tags.
fn normalize_venue(raw: RawVenue) -> Venue {
    let arcana = raw
        .arcana
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ARCANA.to_string());

    let mut mood_tags = raw.moods.unwrap_or_default();
    if !mood_tags.iter().any(|t| t == &arcana) {
        mood_tags.push(arcana.clone());
    }

    Venue {
        name: raw.name.unwrap_or_default().trim().to_string(),
        area: raw
            .location
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AREA.to_string()),
        arcana,
        venue_type: raw.venue_type.unwrap_or_default(),
        mood_tags,
        genres: raw.genres.unwrap_or_default(),
        tags: raw.tags.unwrap_or_default(),
        whisper: raw.whisper.unwrap_or_default(),
        vibe_note: raw.blurb.unwrap_or_default(),
        website: raw.url.unwrap_or_default(),
        price: raw.price,
        typical_start_time: raw.typical_start_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_alternate_field_names() {
        let json = r#"[
            {
                "name": "Green Note",
                "area": "Camden",
                "arcana": "Folk & Intimate",
                "mood_tags": ["folk", "acoustic"],
                "tone_notes": "Tiny folk room",
                "website": "https://example.com"
            }
        ]"#;
        let raw: Vec<RawVenue> = serde_json::from_str(json).unwrap();
        let catalog = VenueCatalog::from_raw(raw);

        let venue = &catalog.venues()[0];
        assert_eq!(venue.area, "Camden");
        assert_eq!(venue.vibe_note, "Tiny folk room");
        assert_eq!(venue.website, "https://example.com");
        assert!(venue.mood_tags.iter().any(|t| t == "Folk & Intimate"));
    }

    #[test]
    fn test_degenerate_record_gets_defaults() {
        let json = r#"[{"name": "Mystery Door"}]"#;
        let raw: Vec<RawVenue> = serde_json::from_str(json).unwrap();
        let catalog = VenueCatalog::from_raw(raw);

        let venue = &catalog.venues()[0];
        assert_eq!(venue.area, "London");
        assert_eq!(venue.arcana, "Romanticised London");
        assert_eq!(venue.mood_tags, vec!["Romanticised London"]);
    }

    #[test]
    fn test_exclusion_and_dedup() {
        let json = r#"[
            {"name": "Streatham Space Project"},
            {"name": "The Glory"},
            {"name": "the glory"},
            {"name": ""}
        ]"#;
        let raw: Vec<RawVenue> = serde_json::from_str(json).unwrap();
        let catalog = VenueCatalog::from_raw(raw);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.venues()[0].name, "The Glory");
    }
}
