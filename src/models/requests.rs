use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Budget, Group};

/// Request to resolve a free-text query into a mood.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResolveMoodRequest {
    #[validate(length(min = 1, max = 500))]
    pub query: String,
}

/// Request to match venues against explicit filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchVenuesRequest {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default)]
    pub group: Option<Group>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Request for the full recommendation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(max = 500))]
    #[serde(default)]
    pub query: String,
    #[serde(alias = "session_id", rename = "sessionId", default)]
    pub session_id: Option<String>,
}
