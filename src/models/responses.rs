use serde::{Deserialize, Serialize};

use crate::models::domain::{DrawnVenue, MoodMatch, QueryFilters, Venue};

/// Response for the mood resolution endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveMoodResponse {
    pub mood: Option<String>,
    pub confidence: f64,
    /// All ranked candidates, strongest first.
    pub candidates: Vec<MoodMatch>,
}

/// Response for the plain venue matching endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchVenuesResponse {
    pub venues: Vec<Venue>,
    #[serde(rename = "venueCount")]
    pub venue_count: usize,
}

/// Response for the recommendation and surprise endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub cards: Vec<DrawnVenue>,
    pub mood: Option<String>,
    pub confidence: f64,
    #[serde(rename = "venueCount")]
    pub venue_count: usize,
    pub filters: QueryFilters,
    #[serde(rename = "isSurprise")]
    pub is_surprise: bool,
    #[serde(rename = "needsClarification")]
    pub needs_clarification: bool,
    #[serde(rename = "clarificationType", skip_serializing_if = "Option::is_none")]
    pub clarification_type: Option<String>,
    /// Conversational text shown instead of cards when clarification is needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "openingLine", skip_serializing_if = "Option::is_none")]
    pub opening_line: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(rename = "venueCount")]
    pub venue_count: usize,
    #[serde(rename = "moodCount")]
    pub mood_count: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
