use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::COMPILED_RULES;
use super::types::{MarkerDraft, Pointer};

static NEXT_STEP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:next:|then:|todo:|reminder:)\s*(?P<step>.+)$")
        .expect("next-step pattern is valid")
});

/// Parse quick-add text into marker fields.
///
/// ```
/// let draft = wilo::pointer::parse_marker_input("Mere Christianity page 94 next: underline quote");
/// assert_eq!(draft.title, "Mere Christianity");
/// assert_eq!(draft.pointer, "page 94");
/// assert_eq!(draft.next_step, "underline quote");
/// ```
///
/// Text without a recognizable pointer is not an error: it all becomes the title.
pub fn parse_marker_input(input: &str) -> MarkerDraft {
    let trimmed = input.trim();

    let (body, next_step) = match NEXT_STEP_RE.captures(trimmed) {
        Some(caps) => {
            let start = caps.get(0).map_or(trimmed.len(), |m| m.start());
            let step = caps.name("step").map_or("", |m| m.as_str().trim());
            (trimmed[..start].trim(), step.to_string())
        }
        None => (trimmed, String::new()),
    };

    let extracted = COMPILED_RULES.iter().find_map(|rule| rule.extract(body));

    match extracted {
        Some((title, pointer)) => MarkerDraft {
            title,
            pointer: pointer.to_string(),
            next_step,
            parsed: Some(pointer),
        },
        None => MarkerDraft {
            title: body.to_string(),
            pointer: String::new(),
            next_step,
            parsed: None,
        },
    }
}

/// Parse a stored pointer string into its structured form.
///
/// Matching is case-insensitive and uses the same priority order as
/// [`parse_marker_input`]. Unrecognized text comes back as
/// [`Pointer::Freeform`] carrying the original string.
pub fn parse_pointer(pointer: &str) -> Pointer {
    let normalized = pointer.trim().to_lowercase();
    COMPILED_RULES
        .iter()
        .find_map(|rule| rule.recognize(&normalized))
        .unwrap_or_else(|| Pointer::Freeform {
            raw: pointer.to_string(),
        })
}
