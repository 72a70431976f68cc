//! Text normalization and string-similarity primitives shared by the
//! resolver, matcher, and drawer.

/// Words stripped before free-text venue search. Deliberately includes the
/// filler people type into a mood box ("something", "tonight").
pub const STOPWORDS: &[&str] = &[
    "a", "an", "the", "in", "on", "at", "for", "to", "of", "and", "or", "with", "me", "my", "i",
    "im", "is", "it", "some", "something", "somewhere", "please", "want", "need", "feel",
    "feeling", "like", "tonight", "this", "that", "what", "whats", "show", "shows", "find",
    "looking",
];

/// Lowercase, strip punctuation except internal hyphens, collapse whitespace.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let chars: Vec<char> = lowered.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c.is_alphanumeric() || c.is_whitespace() {
            out.push(c);
        } else if c == '-' {
            // Keep hyphens only between word characters ("folk-y", "stand-up").
            let prev_ok = i > 0 && chars[i - 1].is_alphanumeric();
            let next_ok = i + 1 < chars.len() && chars[i + 1].is_alphanumeric();
            if prev_ok && next_ok {
                out.push(c);
            } else {
                out.push(' ');
            }
        } else {
            out.push(' ');
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace tokens of an already-normalized string.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

/// The stem before the first hyphen, when the token is hyphenated
/// ("folk-y" → "folk").
pub fn hyphen_stem(token: &str) -> Option<&str> {
    let (stem, rest) = token.split_once('-')?;
    if stem.is_empty() || rest.is_empty() {
        None
    } else {
        Some(stem)
    }
}

/// Character-level similarity ratio in [0, 1].
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::jaro(a, b)
}

/// The dual comparison used by the fuzzy pass: a synonym is compared against
/// the whole query and against every token, and the best ratio wins. Both
/// halves matter: whole-string catches multi-word typos, token-max catches a
/// misspelled word buried in a long sentence.
pub fn best_similarity(synonym: &str, whole: &str, tokens: &[&str]) -> f64 {
    let mut best = similarity(synonym, whole);
    for token in tokens {
        let s = similarity(synonym, token);
        if s > best {
            best = s;
        }
    }
    best
}

/// Normalized tokens with stopwords removed.
pub fn content_tokens(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    normalized
        .split_whitespace()
        .filter(|t| !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Search needles for free-text venue matching: contiguous 3- and 2-word
/// phrases over the stopword-stripped tokens, then single tokens long enough
/// to be meaningful on their own.
pub fn phrase_needles(text: &str) -> Vec<String> {
    let tokens = content_tokens(text);
    let mut needles = Vec::new();

    for window in tokens.windows(3) {
        needles.push(window.join(" "));
    }
    for window in tokens.windows(2) {
        needles.push(window.join(" "));
    }
    for token in &tokens {
        if token.chars().count() >= 4 {
            needles.push(token.clone());
        }
    }

    needles
}

/// Blunt stem equality: both strings at least 8 characters and sharing the
/// same first 8. Equates "melancholic" with "melancholy"; known to be
/// imprecise for long words sharing a prefix, kept for recall.
pub fn stem8_eq(a: &str, b: &str) -> bool {
    let a8: Vec<char> = a.chars().take(8).collect();
    let b8: Vec<char> = b.chars().take(8).collect();
    a8.len() == 8 && b8.len() == 8 && a8 == b8
}
