//! Free-text filter extraction: the first step of the pipeline, ahead of
//! mood resolution. Pulls budget, group size, genre, and location cues out
//! of a query so the matcher can apply them as independent filters.

use crate::models::{Budget, Group, QueryFilters};

/// Known areas and regions, with their display form. Longer needles first so
/// "north london" wins over any shorter overlap.
const LOCATIONS: &[(&str, &str)] = &[
    ("central london", "Central London"),
    ("north london", "North London"),
    ("south london", "South London"),
    ("east london", "East London"),
    ("west london", "West London"),
    ("stoke newington", "Stoke Newington"),
    ("bethnal green", "Bethnal Green"),
    ("notting hill", "Notting Hill"),
    ("king's cross", "King's Cross"),
    ("kings cross", "King's Cross"),
    ("new cross", "New Cross"),
    ("covent garden", "Covent Garden"),
    ("shoreditch", "Shoreditch"),
    ("hackney", "Hackney"),
    ("dalston", "Dalston"),
    ("brixton", "Brixton"),
    ("peckham", "Peckham"),
    ("islington", "Islington"),
    ("camden", "Camden"),
    ("soho", "Soho"),
    ("greenwich", "Greenwich"),
    ("deptford", "Deptford"),
    ("vauxhall", "Vauxhall"),
    ("whitechapel", "Whitechapel"),
    ("clapham", "Clapham"),
    ("walthamstow", "Walthamstow"),
    ("hammersmith", "Hammersmith"),
    ("tooting", "Tooting"),
    ("holborn", "Holborn"),
    ("bloomsbury", "Bloomsbury"),
];

const BUDGET_LOW: &[&str] = &["cheap", "free", "affordable", "budget", "skint"];
const BUDGET_HIGH: &[&str] = &["expensive", "splurge", "fancy", "lavish", "treat myself"];

const GROUP_SOLO: &[&str] = &["just me", "alone", "solo", "on my own", "by myself"];
const GROUP_GROUP: &[&str] = &["friends", "partner", "mates", "group of", "the gang"];

const GENRE_THEATRE: &[&str] = &["theatre", "theater"];
const GENRE_MUSIC: &[&str] = &["gig", "live music", "concert"];
const GENRE_DRAG: &[&str] = &["drag"];

/// Phrases that mean "let fate choose". Checked before normal resolution.
const SURPRISE_PHRASES: &[&str] = &[
    "i don't know",
    "i dont know",
    "don't know",
    "dont know",
    "not sure",
    "no idea",
    "no clue",
    "unsure",
    "uncertain",
    "surprise me",
    "surprise",
    "random",
    "anything",
    "whatever",
    "you choose",
    "you decide",
    "dealer's choice",
    "dealers choice",
    "fate",
    "let fate decide",
    "something",
    "somewhere",
    "idk",
    "dunno",
    "hmm",
    "um",
    "uh",
    "draw for me",
    "pick for me",
    "choose for me",
    "deal me",
    "shuffle",
];

/// Extract budget, group, genre, and location filters from free text.
/// Mood and confidence are left unset; the resolver fills those in.
pub fn interpret(query: &str) -> QueryFilters {
    let lower = query.to_lowercase();

    let budget = if BUDGET_LOW.iter().any(|w| lower.contains(w)) {
        Some(Budget::Low)
    } else if BUDGET_HIGH.iter().any(|w| lower.contains(w)) {
        Some(Budget::High)
    } else {
        None
    };

    let group = if GROUP_SOLO.iter().any(|w| lower.contains(w)) {
        Some(Group::Solo)
    } else if GROUP_GROUP.iter().any(|w| lower.contains(w)) {
        Some(Group::Group)
    } else {
        None
    };

    let genre = if GENRE_THEATRE.iter().any(|w| lower.contains(w)) {
        Some("theatre".to_string())
    } else if GENRE_MUSIC.iter().any(|w| lower.contains(w)) {
        Some("music".to_string())
    } else if GENRE_DRAG.iter().any(|w| lower.contains(w)) {
        Some("drag".to_string())
    } else {
        None
    };

    let location = LOCATIONS
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, display)| (*display).to_string());

    QueryFilters {
        mood: None,
        confidence: 0.0,
        location,
        budget,
        group,
        genre,
    }
}

/// True when the query asks for a fate draw: empty input, or a short query
/// matching the surprise vocabulary. Longer queries only trigger on an exact
/// phrase match, so "surprise" buried in a real request doesn't hijack it.
pub fn is_surprise_query(query: &str) -> bool {
    let lower = query.trim().to_lowercase();
    if lower.is_empty() {
        return true;
    }

    if lower.chars().count() < 20 {
        for phrase in SURPRISE_PHRASES {
            if lower.contains(phrase) || phrase.contains(lower.as_str()) {
                return true;
            }
        }
    }

    SURPRISE_PHRASES.contains(&lower.as_str())
}
