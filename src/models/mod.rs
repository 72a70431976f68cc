// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Budget, DrawnVenue, Group, MoodMatch, MoodResolution, QueryFilters, Venue};
pub use requests::{MatchVenuesRequest, RecommendRequest, ResolveMoodRequest};
pub use responses::{
    ErrorResponse, HealthResponse, MatchVenuesResponse, RecommendResponse, ResolveMoodResponse,
};
