use std::collections::HashMap;

/// Curated emotional-proximity map: each category lists its three nearest
/// neighbours, in preference order. The relation is not symmetric.
const ADJACENCY_TABLE: &[(&str, &[&str; 3])] = &[
    (
        "Playful & Weird",
        &["Curious Encounters", "Cabaret & Glitter", "Big Night Out"],
    ),
    (
        "Curious Encounters",
        &["Playful & Weird", "Word & Voice", "Rant & Rapture"],
    ),
    (
        "Witchy & Wild",
        &[
            "Nostalgic / Vintage / Retro",
            "Grief & Grace",
            "Spiritual / Sacred / Mystical",
        ],
    ),
    (
        "Folk & Intimate",
        &["Contemplative & Meditative", "Group Energy", "Word & Voice"],
    ),
    (
        "The Thoughtful Stage",
        &[
            "Rant & Rapture",
            "Curious Encounters",
            "Spiritual / Sacred / Mystical",
        ],
    ),
    (
        "Spiritual / Sacred / Mystical",
        &["Witchy & Wild", "The Thoughtful Stage", "Wonder & Awe"],
    ),
    (
        "Cabaret & Glitter",
        &["Playful & Weird", "Comic Relief", "Folk & Intimate"],
    ),
    (
        "Big Night Out",
        &["Playful & Weird", "Cabaret & Glitter", "Late-Night Lark"],
    ),
    (
        "Punchy / Protest",
        &[
            "Rant & Rapture",
            "Body-Based / Movement-Led",
            "Melancholic Beauty",
        ],
    ),
    (
        "Contemplative & Meditative",
        &[
            "Grief & Grace",
            "Folk & Intimate",
            "Nostalgic / Vintage / Retro",
        ],
    ),
    (
        "Global Rhythms",
        &["Wonder & Awe", "Group Energy", "Word & Voice"],
    ),
    (
        "Rant & Rapture",
        &["Punchy / Protest", "The Thoughtful Stage", "Curious Encounters"],
    ),
    (
        "Body-Based / Movement-Led",
        &["Grief & Grace", "Punchy / Protest", "Melancholic Beauty"],
    ),
    (
        "Grief & Grace",
        &[
            "Contemplative & Meditative",
            "Body-Based / Movement-Led",
            "Nostalgic / Vintage / Retro",
        ],
    ),
    (
        "Word & Voice",
        &["Folk & Intimate", "Curious Encounters", "Global Rhythms"],
    ),
    (
        "Late-Night Lark",
        &["Big Night Out", "Melancholic Beauty", "Cabaret & Glitter"],
    ),
    (
        "Melancholic Beauty",
        &["Late-Night Lark", "Grief & Grace", "Body-Based / Movement-Led"],
    ),
    (
        "Wonder & Awe",
        &[
            "Nostalgic / Vintage / Retro",
            "Global Rhythms",
            "Spiritual / Sacred / Mystical",
        ],
    ),
    (
        "Nostalgic / Vintage / Retro",
        &["Wonder & Awe", "Grief & Grace", "Witchy & Wild"],
    ),
    (
        "Comic Relief",
        &["Cabaret & Glitter", "Group Energy", "Playful & Weird"],
    ),
    (
        "Group Energy",
        &["Folk & Intimate", "Comic Relief", "Global Rhythms"],
    ),
    (
        "Queer Revelry",
        &["Comic Relief", "Group Energy", "Big Night Out"],
    ),
    (
        "Romanticised London",
        &["Wonder & Awe", "Queer Revelry", "Playful & Weird"],
    ),
];

/// Directed graph of thematically neighbouring mood categories.
///
/// A category absent from the graph simply has no adjacency; lookups never
/// fail.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    edges: HashMap<String, Vec<String>>,
}

impl AdjacencyGraph {
    /// The curated built-in map.
    pub fn built_in() -> Self {
        let edges = ADJACENCY_TABLE
            .iter()
            .map(|(from, to)| {
                (
                    (*from).to_string(),
                    to.iter().map(|n| (*n).to_string()).collect(),
                )
            })
            .collect();
        Self { edges }
    }

    /// Build a graph from explicit edges (used by tests and alternate
    /// taxonomies). Self-edges are dropped.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        let edges = edges
            .into_iter()
            .map(|(from, to)| {
                let from = from.into();
                let neighbors: Vec<String> = to
                    .into_iter()
                    .map(Into::into)
                    .filter(|n: &String| *n != from)
                    .collect();
                (from, neighbors)
            })
            .collect();
        Self { edges }
    }

    /// Neighbours of a category, in curated order. Empty when unknown.
    pub fn neighbors(&self, category: &str) -> &[String] {
        self.edges.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
