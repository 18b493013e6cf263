//! Text normalization shared by every matching layer.
//!
//! Temporal parsing, entity resolution and intent detection all match on
//! the normalized form: lowercased, with Spanish diacritics folded to
//! their base letters.

/// Lowercase the input and fold Spanish diacritics (á→a, é→e, í→i, ó→o,
/// ú/ü→u, ñ→n). Everything else passes through unchanged.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            _ => c,
        })
        .collect()
}
