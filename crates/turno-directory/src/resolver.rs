//! Fuzzy name resolution against directory records.
//!
//! Names arrive as free text, extracted by the model or buried in the
//! message body. Resolution never guesses between plausible candidates:
//! several hits come back as a disambiguation set for the user.

use std::collections::HashSet;

use turno_core::{normalize, Customer, Service, Staff};

/// Cap on the disambiguation set surfaced to the user.
pub const MAX_CANDIDATES: usize = 5;

/// A directory record the resolver can match by display name.
pub trait NamedRecord {
    fn display_name(&self) -> &str;
    fn is_active(&self) -> bool;
}

impl NamedRecord for Staff {
    fn display_name(&self) -> &str {
        &self.name
    }
    fn is_active(&self) -> bool {
        self.active
    }
}

impl NamedRecord for Service {
    fn display_name(&self) -> &str {
        &self.name
    }
    fn is_active(&self) -> bool {
        self.active
    }
}

impl NamedRecord for Customer {
    fn display_name(&self) -> &str {
        &self.name
    }
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Outcome of resolving a fuzzy name reference.
#[derive(Debug, PartialEq)]
pub enum Resolution<'a, T> {
    /// Exactly one active record matched.
    One(&'a T),
    /// Several active records matched; at most [`MAX_CANDIDATES`].
    Many(Vec<&'a T>),
    /// Only inactive records matched.
    Inactive,
    /// Nothing matched.
    None,
}

/// Resolve a name fragment, or failing that the raw message text,
/// against a set of directory records.
///
/// Substring match on the fragment comes first: a unique hit is
/// accepted, an exact normalized name short-circuits several hits,
/// otherwise the candidates are surfaced for disambiguation. Without a
/// fragment, or with no substring hit, token overlap against the message
/// recovers names the model did not extract: every name token present as
/// a whole word, or at least two tokens for multi-token names. Inactive
/// records never resolve positively but report `Inactive` when they are
/// all that matches.
pub fn resolve_name<'a, T: NamedRecord>(
    fragment: Option<&str>,
    records: &'a [T],
    raw_message: &str,
) -> Resolution<'a, T> {
    let fragment = fragment.map(normalize).filter(|f| !f.trim().is_empty());
    let message = normalize(raw_message);
    let message_words: HashSet<&str> = message
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let (active, inactive): (Vec<&T>, Vec<&T>) = records.iter().partition(|r| r.is_active());

    if let Some(frag) = &fragment {
        let mut hits: Vec<&T> = active
            .iter()
            .copied()
            .filter(|r| normalize(r.display_name()).contains(frag.as_str()))
            .collect();
        match hits.len() {
            0 => {}
            1 => return Resolution::One(hits[0]),
            _ => {
                let exact: Vec<&T> = hits
                    .iter()
                    .copied()
                    .filter(|r| normalize(r.display_name()) == *frag)
                    .collect();
                if exact.len() == 1 {
                    return Resolution::One(exact[0]);
                }
                hits.truncate(MAX_CANDIDATES);
                return Resolution::Many(hits);
            }
        }
    }

    let mut overlap: Vec<&T> = active
        .iter()
        .copied()
        .filter(|r| tokens_match(r.display_name(), &message_words))
        .collect();
    match overlap.len() {
        0 => {}
        1 => return Resolution::One(overlap[0]),
        _ => {
            overlap.truncate(MAX_CANDIDATES);
            return Resolution::Many(overlap);
        }
    }

    // Nothing active matched; check inactive records so the caller can
    // report "found but inactive" instead of "not found".
    let inactive_by_fragment = match &fragment {
        Some(frag) => inactive
            .iter()
            .any(|r| normalize(r.display_name()).contains(frag.as_str())),
        None => false,
    };
    if inactive_by_fragment
        || inactive
            .iter()
            .any(|r| tokens_match(r.display_name(), &message_words))
    {
        return Resolution::Inactive;
    }

    Resolution::None
}

/// Whole-word token overlap between a record name and the message words.
fn tokens_match(name: &str, message_words: &HashSet<&str>) -> bool {
    let name = normalize(name);
    let tokens: Vec<&str> = name.split_whitespace().collect();
    if tokens.is_empty() {
        return false;
    }
    let present = tokens
        .iter()
        .filter(|t| message_words.contains(**t))
        .count();
    present == tokens.len() || (tokens.len() > 1 && present >= 2)
}
