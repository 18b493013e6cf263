//! Deterministic reply composition and post-processing.
//!
//! Tool outcomes carry their own Spanish sentences; the model is never
//! trusted to phrase a result. Whatever text ends up as the reply is
//! post-processed to satisfy the output contract: no markdown emphasis
//! characters and no trailing recommendation block.

use regex::Regex;
use std::sync::LazyLock;
use turno_tools::ToolOutcome;

/// Reply when three rounds produced neither text nor a tool outcome.
pub const FALLBACK_REPLY: &str =
    "No he podido completar la petición. ¿Puedes decírmelo de otra forma?";

/// Reply when the completion service is unreachable mid-turn.
pub const SERVICE_UNAVAILABLE_REPLY: &str =
    "Ahora mismo no puedo atender la petición. Inténtalo de nuevo en un momento.";

static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_`#]+").expect("Invalid emphasis regex"));

/// A trailing "Recomendación:" / "Acciones sugeridas:" / "Sugerencias:"
/// block, matched from its heading to the end of the text.
static RECOMMENDATION_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\n\s*(?:recomendaci[oó]n(?:es)?|acciones sugeridas|sugerencias?)\s*:.*$")
        .expect("Invalid recommendation regex")
});

/// Apply the output contract to a reply candidate.
pub fn post_process(text: &str) -> String {
    let stripped = EMPHASIS.replace_all(text, "");
    let trimmed = RECOMMENDATION_BLOCK.replace(&stripped, "");
    trimmed.trim().to_string()
}

/// Join the composed sentences of a batch of tool outcomes.
pub fn compose_outcomes(outcomes: &[ToolOutcome]) -> String {
    outcomes
        .iter()
        .map(|o| o.message.trim())
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
