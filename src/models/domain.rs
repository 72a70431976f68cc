use serde::{Deserialize, Serialize};

/// Canonical venue record.
///
/// Produced by the catalog's normalization step; every accepted input shape
/// (`area` vs `location`, `whisper` vs `blurb`, and so on) is mapped into
/// this struct once, at load time. Matching logic only ever sees this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub area: String,
    /// Primary mood category this venue is filed under.
    pub arcana: String,
    #[serde(rename = "venueType", default)]
    pub venue_type: String,
    /// All mood categories (and looser mood words) describing the venue.
    /// Always contains `arcana`.
    #[serde(rename = "moodTags", default)]
    pub mood_tags: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Free-form tags, including broader region labels ("North London")
    /// that individual venues don't repeat in their area field.
    #[serde(default)]
    pub tags: Vec<String>,
    /// One-line poetic hook shown on cards.
    #[serde(default)]
    pub whisper: String,
    /// Longer descriptive text, used for free-text search.
    #[serde(rename = "vibeNote", default)]
    pub vibe_note: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(rename = "typicalStartTime", default)]
    pub typical_start_time: Option<String>,
}

/// Budget preference extracted from a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    High,
}

/// Group-size preference extracted from a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Solo,
    Group,
}

/// Resolved filters for one request. Built per query, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryFilters {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default)]
    pub group: Option<Group>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// One ranked candidate from the mood resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodMatch {
    pub mood: String,
    pub confidence: f64,
}

/// Top-1 resolution result. `mood: None` with confidence 0.0 is the
/// no-match sentinel, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodResolution {
    pub mood: Option<String>,
    pub confidence: f64,
}

impl MoodResolution {
    pub fn none() -> Self {
        Self {
            mood: None,
            confidence: 0.0,
        }
    }
}

/// A venue drawn by the adjacency-aware drawer, with provenance flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawnVenue {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(rename = "isAdjacent")]
    pub is_adjacent: bool,
    /// Set when `is_adjacent`: the primary category this draw stepped
    /// sideways from.
    #[serde(rename = "adjacentFrom", default)]
    pub adjacent_from: Option<String>,
    #[serde(rename = "isFateDraw")]
    pub is_fate_draw: bool,
}

impl DrawnVenue {
    pub fn direct(venue: Venue) -> Self {
        Self {
            venue,
            is_adjacent: false,
            adjacent_from: None,
            is_fate_draw: false,
        }
    }

    pub fn adjacent(venue: Venue, from: &str) -> Self {
        Self {
            venue,
            is_adjacent: true,
            adjacent_from: Some(from.to_string()),
            is_fate_draw: false,
        }
    }

    pub fn fate(venue: Venue) -> Self {
        Self {
            venue,
            is_adjacent: false,
            adjacent_from: None,
            is_fate_draw: true,
        }
    }
}
