// Integration tests for Lark Match: the full pipeline over the shipped
// taxonomy and venue catalog.
//
// Venue selection is shuffled by design, so assertions here are about set
// membership and invariants, not exact ordering, except where a seeded RNG
// pins the outcome.

use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use lark_match::core::{interpret, AdjacencyDrawer, MoodResolver, VenueMatcher};
use lark_match::models::{QueryFilters, Venue};
use lark_match::services::VenueCatalog;
use lark_match::taxonomy::{AdjacencyGraph, MoodCategory, Taxonomy};

fn data_path(file: &str) -> String {
    format!("{}/data/{}", env!("CARGO_MANIFEST_DIR"), file)
}

fn load_taxonomy() -> Arc<Taxonomy> {
    Arc::new(Taxonomy::from_path(data_path("mood_index.json")).expect("mood index loads"))
}

fn load_catalog() -> VenueCatalog {
    VenueCatalog::load(data_path("venues.json")).expect("venue catalog loads")
}

#[test]
fn test_shipped_data_loads() {
    let taxonomy = load_taxonomy();
    let catalog = load_catalog();

    assert!(taxonomy.len() >= 20, "taxonomy too small: {}", taxonomy.len());
    assert!(catalog.len() >= 30, "catalog too small: {}", catalog.len());

    // Every venue's primary category should exist in the taxonomy.
    for venue in catalog.venues() {
        assert!(
            taxonomy.category(&venue.arcana).is_some(),
            "venue '{}' filed under unknown category '{}'",
            venue.name,
            venue.arcana
        );
    }
}

#[test]
fn test_end_to_end_folky_query() {
    let taxonomy = load_taxonomy();
    let resolver = MoodResolver::new(Arc::clone(&taxonomy));

    let top = resolver.resolve_top("something folky tonight");
    assert_eq!(top.mood.as_deref(), Some("Folk & Intimate"));
    assert!((top.confidence - 1.0).abs() < 1e-9);
}

#[test]
fn test_end_to_end_typo_query() {
    let taxonomy = load_taxonomy();
    let resolver = MoodResolver::new(Arc::clone(&taxonomy));

    let top = resolver.resolve_top("looking for dragg shows this weekend");
    assert_eq!(top.mood.as_deref(), Some("Cabaret & Glitter"));
    assert!(
        top.confidence < 1.0 && top.confidence >= 0.85,
        "typo confidence out of band: {}",
        top.confidence
    );
}

#[test]
fn test_end_to_end_multi_filter_match() {
    let taxonomy = load_taxonomy();
    let catalog = load_catalog();
    let resolver = MoodResolver::new(Arc::clone(&taxonomy));
    let matcher = VenueMatcher::new(Arc::clone(&taxonomy));

    let query = "folk music in North London this weekend";
    let mut filters = interpret(query);
    let resolution = resolver.resolve_top(query);
    filters.mood = resolution.mood;
    filters.confidence = resolution.confidence;

    assert_eq!(filters.mood.as_deref(), Some("Folk & Intimate"));
    assert_eq!(filters.location.as_deref(), Some("North London"));

    let mut rng = StdRng::seed_from_u64(17);
    let results = matcher.match_venues_with_rng(&filters, catalog.venues(), &mut rng);

    assert!(!results.is_empty(), "expected folk venues in North London");
    assert!(results.len() <= 3);
    for v in &results {
        let in_area = v.area.to_lowercase().contains("north london");
        let in_tags = v
            .tags
            .iter()
            .any(|t| t.to_lowercase().contains("north london"));
        assert!(in_area || in_tags, "{} fails location soundness", v.name);
    }
}

#[test]
fn test_adjacency_draw_is_diverse() {
    let taxonomy = load_taxonomy();
    let catalog = load_catalog();
    let drawer = AdjacencyDrawer::new(Arc::clone(&taxonomy));

    let filters = QueryFilters {
        mood: Some("Folk & Intimate".to_string()),
        confidence: 1.0,
        ..Default::default()
    };

    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let drawn = drawer.draw_with_adjacency_with_rng(&filters, None, catalog.venues(), &mut rng);

        assert_eq!(drawn.len(), 3, "seed {}", seed);

        let primary_count = drawn
            .iter()
            .filter(|d| d.venue.arcana == "Folk & Intimate")
            .count();
        assert!(primary_count <= 2, "seed {}: too many primary draws", seed);
        assert!(
            drawn.iter().any(|d| d.venue.arcana != "Folk & Intimate"),
            "seed {}: no surprise in the draw",
            seed
        );

        for d in drawn.iter().filter(|d| d.is_adjacent) {
            assert_eq!(d.adjacent_from.as_deref(), Some("Folk & Intimate"));
            assert!(
                taxonomy
                    .neighbors("Folk & Intimate")
                    .contains(&d.venue.arcana),
                "seed {}: adjacent draw from non-neighbour '{}'",
                seed,
                d.venue.arcana
            );
        }
    }
}

#[test]
fn test_surprise_draw_never_collapses() {
    let taxonomy = load_taxonomy();
    let catalog = load_catalog();
    let drawer = AdjacencyDrawer::new(Arc::clone(&taxonomy));

    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let drawn = drawer.draw_surprise_with_rng(catalog.venues(), &mut rng);

        assert_eq!(drawn.len(), 3, "seed {}", seed);
        assert!(drawn[0].is_fate_draw, "seed {}", seed);

        let names: HashSet<String> = drawn
            .iter()
            .map(|d| d.venue.name.to_lowercase())
            .collect();
        assert_eq!(names.len(), 3, "seed {}: duplicate venues", seed);

        let categories: HashSet<&str> =
            drawn.iter().map(|d| d.venue.arcana.as_str()).collect();
        assert!(
            categories.len() >= 2,
            "seed {}: surprise draw collapsed into one category",
            seed
        );
    }
}

#[test]
fn test_venue_name_query_finds_the_venue() {
    let taxonomy = load_taxonomy();
    let catalog = load_catalog();
    let drawer = AdjacencyDrawer::new(Arc::clone(&taxonomy));

    let drawn = drawer.text_matches("wilton's music hall", catalog.venues());
    assert!(!drawn.is_empty());
    assert_eq!(drawn[0].venue.name, "Wilton's Music Hall");
}

// The worked example: two folk venues, one cabaret venue, folk adjacent to
// cabaret. A folky query must return all three, the cabaret one marked
// adjacent.
#[test]
fn test_worked_example_two_folk_one_adjacent() {
    fn category(name: &str, synonyms: &[&str]) -> MoodCategory {
        MoodCategory {
            name: name.to_string(),
            description: String::new(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            vibe_notes: String::new(),
        }
    }
    fn venue(name: &str, arcana: &str) -> Venue {
        Venue {
            name: name.to_string(),
            area: "London".to_string(),
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

    let taxonomy = Arc::new(Taxonomy::new(
        vec![
            category("Folk & Intimate", &["folk", "intimate", "folky"]),
            category("Cabaret & Glitter", &["drag", "cabaret"]),
        ],
        AdjacencyGraph::from_edges(vec![("Folk & Intimate", vec!["Cabaret & Glitter"])]),
    ));
    let resolver = MoodResolver::new(Arc::clone(&taxonomy));
    let drawer = AdjacencyDrawer::new(Arc::clone(&taxonomy));

    let venues = vec![
        venue("The Harp Room", "Folk & Intimate"),
        venue("The Low Ceiling", "Folk & Intimate"),
        venue("The Sequin Door", "Cabaret & Glitter"),
    ];

    let resolution = resolver.resolve_top("something folky tonight");
    assert_eq!(resolution.mood.as_deref(), Some("Folk & Intimate"));
    assert!((resolution.confidence - 1.0).abs() < 1e-9);

    let filters = QueryFilters {
        mood: resolution.mood,
        confidence: resolution.confidence,
        ..Default::default()
    };

    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let drawn = drawer.draw_with_adjacency_with_rng(
            &filters,
            Some("something folky tonight"),
            &venues,
            &mut rng,
        );

        assert_eq!(drawn.len(), 3, "seed {}", seed);

        let names: HashSet<&str> = drawn.iter().map(|d| d.venue.name.as_str()).collect();
        assert!(names.contains("The Harp Room"), "seed {}", seed);
        assert!(names.contains("The Low Ceiling"), "seed {}", seed);
        assert!(names.contains("The Sequin Door"), "seed {}", seed);

        let adjacent: Vec<_> = drawn.iter().filter(|d| d.is_adjacent).collect();
        assert_eq!(adjacent.len(), 1, "seed {}", seed);
        assert_eq!(adjacent[0].venue.name, "The Sequin Door");
        assert_eq!(
            adjacent[0].adjacent_from.as_deref(),
            Some("Folk & Intimate")
        );
    }
}
