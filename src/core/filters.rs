//! Per-venue filter predicates. Each filter independently passes or
//! eliminates a venue; order never changes the result set.

use crate::core::similarity::stem8_eq;
use crate::models::{Budget, Group, Venue};
use crate::taxonomy::Taxonomy;

/// Venue types that read as premium pricing when the budget is low.
const PREMIUM_TYPES: &[&str] = &["opera", "concert hall"];

/// Vibe-note words that signal a crowd a solo visitor may not want.
const ROWDY_WORDS: &[&str] = &["rowdy", "raucous", "heaving"];

/// Vibe-note words that signal a room too small for a group.
const SMALL_ROOM_WORDS: &[&str] = &["tiny", "intimate", "hushed"];

const THEATRE_KEYWORDS: &[&str] = &["theatre", "theater", "stage", "play", "drama"];
const MUSIC_KEYWORDS: &[&str] = &["music", "gig", "concert", "band", "acoustic", "jazz"];
const DRAG_KEYWORDS: &[&str] = &["drag", "cabaret", "burlesque", "queer"];

/// Expand a requested mood into the full set of lowercase terms a venue tag
/// can match against.
///
/// Lookup chain: the taxonomy entry for the exact category name, then a
/// partial key match against category names, then the significant words of
/// the mood string itself. The requested mood is always included.
pub fn expand_mood_terms(taxonomy: &Taxonomy, mood: &str) -> Vec<String> {
    let mood_lower = mood.to_lowercase();
    let mut terms = vec![mood_lower.clone()];

    let category = taxonomy.category(mood).or_else(|| {
        taxonomy.categories().iter().find(|c| {
            let name = c.name.to_lowercase();
            name.contains(&mood_lower) || mood_lower.contains(&name)
        })
    });

    if let Some(category) = category {
        terms.push(category.name.to_lowercase());
        terms.extend(category.synonyms.iter().map(|s| s.to_lowercase()));
    } else {
        // No taxonomy entry at all: fall back to the mood name's own words.
        terms.extend(
            mood_lower
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| w.chars().count() >= 4)
                .map(str::to_string),
        );
    }

    terms.sort();
    terms.dedup();
    terms
}

/// Mood filter: any venue mood tag matching any expanded term, by equality,
/// substring containment either direction, or 8-character stem. Recall is
/// deliberately favoured over precision; the tag vocabulary is poetic.
pub fn matches_mood(venue: &Venue, terms: &[String]) -> bool {
    venue.mood_tags.iter().any(|tag| {
        let tag = tag.to_lowercase();
        terms.iter().any(|term| {
            tag == *term || tag.contains(term.as_str()) || term.contains(tag.as_str()) || stem8_eq(&tag, term)
        })
    })
}

/// Location filter: case-insensitive substring against the area field, or
/// against the free-form tags, which carry broader region labels the area
/// field doesn't repeat.
pub fn matches_location(venue: &Venue, location: &str) -> bool {
    let needle = location.to_lowercase();
    if venue.area.to_lowercase().contains(&needle) {
        return true;
    }
    venue
        .tags
        .iter()
        .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Genre filter: keyword-set check for the handful of genres we understand.
/// Anything else passes through unfiltered.
pub fn matches_genre(venue: &Venue, genre: &str) -> bool {
    let keywords: &[&str] = match genre.to_lowercase().as_str() {
        "theatre" | "theater" => THEATRE_KEYWORDS,
        "music" => MUSIC_KEYWORDS,
        "drag" => DRAG_KEYWORDS,
        _ => return true,
    };

    let haystack = format!(
        "{} {} {}",
        venue.venue_type,
        venue.genres.join(" "),
        venue.tags.join(" ")
    )
    .to_lowercase();

    keywords.iter().any(|k| haystack.contains(k))
}

/// Budget filter: `low` excludes premium-type venues; `high` never filters.
pub fn matches_budget(venue: &Venue, budget: Budget) -> bool {
    match budget {
        Budget::High => true,
        Budget::Low => {
            let venue_type = venue.venue_type.to_lowercase();
            !PREMIUM_TYPES.iter().any(|t| venue_type.contains(t))
        }
    }
}

/// Group filter: solo visitors are steered away from crowds and nightclubs,
/// groups away from rooms too small to hold them.
pub fn matches_group(venue: &Venue, group: Group) -> bool {
    let note = venue.vibe_note.to_lowercase();
    match group {
        Group::Solo => {
            if ROWDY_WORDS.iter().any(|w| note.contains(w)) {
                return false;
            }
            !venue.venue_type.to_lowercase().contains("nightclub")
        }
        Group::Group => !SMALL_ROOM_WORDS.iter().any(|w| note.contains(w)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{AdjacencyGraph, MoodCategory};

    fn venue(name: &str, area: &str, arcana: &str) -> Venue {
        Venue {
            name: name.to_string(),
            area: area.to_string(),
            arcana: arcana.to_string(),
            venue_type: String::new(),
            mood_tags: vec![arcana.to_string()],
            genres: vec![],
            tags: vec![],
            whisper: String::new(),
            vibe_note: String::new(),
            website: String::new(),
            price: None,
            typical_start_time: None,
        }
    }

    fn test_taxonomy() -> Taxonomy {
        Taxonomy::new(
            vec![MoodCategory {
                name: "Folk & Intimate".to_string(),
                description: String::new(),
                synonyms: vec!["folk".to_string(), "intimate".to_string(), "cosy".to_string()],
                vibe_notes: String::new(),
            }],
            AdjacencyGraph::default(),
        )
    }

    #[test]
    fn test_expand_direct_lookup() {
        let taxonomy = test_taxonomy();
        let terms = expand_mood_terms(&taxonomy, "Folk & Intimate");
        assert!(terms.contains(&"folk".to_string()));
        assert!(terms.contains(&"cosy".to_string()));
        assert!(terms.contains(&"folk & intimate".to_string()));
    }

    #[test]
    fn test_expand_partial_key() {
        let taxonomy = test_taxonomy();
        // Partial name still reaches the category's synonyms.
        let terms = expand_mood_terms(&taxonomy, "folk");
        assert!(terms.contains(&"cosy".to_string()));
    }

    #[test]
    fn test_expand_unknown_mood_splits_words() {
        let taxonomy = test_taxonomy();
        let terms = expand_mood_terms(&taxonomy, "Midnight / Strange");
        assert!(terms.contains(&"midnight".to_string()));
        assert!(terms.contains(&"strange".to_string()));
    }

    #[test]
    fn test_mood_stem_match() {
        let taxonomy = Taxonomy::new(
            vec![MoodCategory {
                name: "Melancholic Beauty".to_string(),
                description: String::new(),
                synonyms: vec!["melancholic".to_string()],
                vibe_notes: String::new(),
            }],
            AdjacencyGraph::default(),
        );
        let terms = expand_mood_terms(&taxonomy, "Melancholic Beauty");

        let mut v = venue("Ruin Garden", "City", "Melancholy");
        v.mood_tags = vec!["melancholy".to_string()];
        assert!(matches_mood(&v, &terms));
    }

    #[test]
    fn test_mood_no_match() {
        let taxonomy = test_taxonomy();
        let terms = expand_mood_terms(&taxonomy, "Folk & Intimate");
        let mut v = venue("Warehouse", "Dalston", "Big Night Out");
        v.mood_tags = vec!["rave".to_string()];
        assert!(!matches_mood(&v, &terms));
    }

    #[test]
    fn test_location_matches_area() {
        let v = venue("Green Note", "Camden", "Folk & Intimate");
        assert!(matches_location(&v, "camden"));
        assert!(!matches_location(&v, "Brixton"));
    }

    #[test]
    fn test_location_falls_back_to_tags() {
        let mut v = venue("Green Note", "Camden", "Folk & Intimate");
        v.tags = vec!["North London".to_string(), "live room".to_string()];
        assert!(matches_location(&v, "north london"));
    }

    #[test]
    fn test_genre_known_and_unknown() {
        let mut v = venue("The Yard", "Hackney Wick", "The Thoughtful Stage");
        v.venue_type = "fringe theatre".to_string();
        assert!(matches_genre(&v, "theatre"));
        assert!(!matches_genre(&v, "drag"));
        // unrecognized genres pass everything through
        assert!(matches_genre(&v, "puppetry"));
    }

    #[test]
    fn test_budget_low_excludes_premium() {
        let mut v = venue("Grand House", "Covent Garden", "Wonder & Awe");
        v.venue_type = "opera house".to_string();
        assert!(!matches_budget(&v, Budget::Low));
        assert!(matches_budget(&v, Budget::High));

        let pub_venue = venue("The Harrison", "King's Cross", "Folk & Intimate");
        assert!(matches_budget(&pub_venue, Budget::Low));
    }

    #[test]
    fn test_group_filters() {
        let mut rowdy = venue("Warehouse", "Dalston", "Big Night Out");
        rowdy.vibe_note = "Heaving dancefloor, raucous until dawn".to_string();
        assert!(!matches_group(&rowdy, Group::Solo));
        assert!(matches_group(&rowdy, Group::Group));

        let mut club = venue("FOLD", "Canning Town", "Late-Night Lark");
        club.venue_type = "nightclub".to_string();
        assert!(!matches_group(&club, Group::Solo));

        let mut snug = venue("Snug", "Soho", "Folk & Intimate");
        snug.vibe_note = "A tiny candlelit room".to_string();
        assert!(matches_group(&snug, Group::Solo));
        assert!(!matches_group(&snug, Group::Group));
    }
}
