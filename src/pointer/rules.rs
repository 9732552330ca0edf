//! Ordered pointer-recognition rules.
//!
//! Each rule is a regex body with named captures plus a constructor that turns
//! the captures into a [`Pointer`]. Rules are tried in table order and the
//! first one that produces a pointer wins, so `page` beats `chapter verse`,
//! which beats bare `chapter`, and so on down to `step`.
//!
//! Every body is compiled twice: once prefixed with a lazy title capture for
//! free-text input (`"Dune page 47"`), once anchored at a word boundary for
//! standalone pointer strings (`"page 47"`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::types::{Pointer, Timestamp};

pub(crate) struct PointerRule {
    pub name: &'static str,
    body: &'static str,
    build: fn(&Captures<'_>) -> Option<Pointer>,
}

static RULES: [PointerRule; 6] = [
    PointerRule {
        name: "page",
        body: r"(?:page|pg|p\.?)\s*(?P<n>\d+)",
        build: |caps| Some(Pointer::Page { page: number(caps, "n")? }),
    },
    PointerRule {
        name: "chapter_verse",
        body: r"(?:chapter|ch\.?)\s*(?P<c>\d+)\s*(?:verse|v\.?)\s*(?P<v>\d+)",
        build: |caps| {
            Some(Pointer::ChapterVerse {
                chapter: number(caps, "c")?,
                verse: number(caps, "v")?,
            })
        },
    },
    PointerRule {
        name: "chapter",
        body: r"(?:chapter|ch\.?)\s*(?P<n>\d+)",
        build: |caps| Some(Pointer::Chapter { chapter: number(caps, "n")? }),
    },
    PointerRule {
        name: "verse",
        body: r"(?:verse|v\.?)\s*(?P<n>\d+)",
        build: |caps| Some(Pointer::Verse { verse: number(caps, "n")? }),
    },
    PointerRule {
        name: "timestamp",
        body: r"(?P<a>\d+):(?P<b>\d{2})(?::(?P<c>\d{2}))?",
        build: build_timestamp,
    },
    PointerRule {
        name: "step",
        body: r"(?:step|part|stage)\s*(?P<n>\d+)",
        build: |caps| Some(Pointer::Step { step: number(caps, "n")? }),
    },
];

pub(crate) struct CompiledRule {
    pub rule: &'static PointerRule,
    in_text: Regex,
    standalone: Regex,
}

pub(crate) static COMPILED_RULES: Lazy<Vec<CompiledRule>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|rule| CompiledRule {
            rule,
            in_text: Regex::new(&format!(r"(?i)(?P<title>.+?)\s+{}", rule.body))
                .expect("pointer rule pattern is valid"),
            standalone: Regex::new(&format!(r"(?i)\b{}", rule.body))
                .expect("pointer rule pattern is valid"),
        })
        .collect()
});

impl CompiledRule {
    /// Match `text` as `<title> <pointer>`. Returns the trimmed title and the pointer.
    pub fn extract(&self, text: &str) -> Option<(String, Pointer)> {
        let caps = self.in_text.captures(text)?;
        let pointer = (self.rule.build)(&caps)?;
        let title = caps.name("title").map(|m| m.as_str().trim()).unwrap_or_default();
        Some((title.to_string(), pointer))
    }

    /// Match a bare pointer string (no leading title).
    pub fn recognize(&self, text: &str) -> Option<Pointer> {
        let caps = self.standalone.captures(text)?;
        (self.rule.build)(&caps)
    }
}

fn number(caps: &Captures<'_>, group: &str) -> Option<u32> {
    caps.name(group)?.as_str().parse().ok()
}

fn build_timestamp(caps: &Captures<'_>) -> Option<Pointer> {
    let first = number(caps, "a")?;
    let second = number(caps, "b")?;
    let ts = match caps.name("c") {
        Some(m) => Timestamp {
            hours: Some(first),
            minutes: second,
            seconds: m.as_str().parse().ok()?,
        },
        None => Timestamp {
            hours: None,
            minutes: first,
            seconds: second,
        },
    };
    Some(Pointer::Timestamp(ts))
}
