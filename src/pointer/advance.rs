use super::parse::parse_pointer;
use super::types::{Pointer, Timestamp};

impl Pointer {
    /// Move this pointer forward (or back, for negative `amount`).
    ///
    /// Counters move by `amount` units; timestamps move by `amount` seconds.
    /// Nothing goes below zero. Returns `None` for freeform pointers, which
    /// have to be edited by hand.
    pub fn advance(&self, amount: i64) -> Option<Pointer> {
        let advanced = match self {
            Self::Page { page } => Self::Page { page: shift(*page, amount) },
            Self::Chapter { chapter } => Self::Chapter { chapter: shift(*chapter, amount) },
            Self::Verse { verse } => Self::Verse { verse: shift(*verse, amount) },
            Self::ChapterVerse { chapter, verse } => Self::ChapterVerse {
                chapter: *chapter,
                verse: shift(*verse, amount),
            },
            Self::Step { step } => Self::Step { step: shift(*step, amount) },
            Self::Timestamp(ts) => Self::Timestamp(Timestamp::from_total_seconds(
                ts.total_seconds().saturating_add(amount),
            )),
            Self::Freeform { .. } => return None,
        };
        Some(advanced)
    }
}

/// Advance a stored pointer string and return its new canonical text.
///
/// ```
/// assert_eq!(wilo::pointer::advance_pointer("page 94", 5).as_deref(), Some("page 99"));
/// assert_eq!(wilo::pointer::advance_pointer("34:22", 300).as_deref(), Some("39:22"));
/// assert_eq!(wilo::pointer::advance_pointer("the good part", 1), None);
/// ```
pub fn advance_pointer(pointer: &str, amount: i64) -> Option<String> {
    parse_pointer(pointer)
        .advance(amount)
        .map(|p| p.to_string())
}

fn shift(value: u32, amount: i64) -> u32 {
    i64::from(value)
        .saturating_add(amount)
        .clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_counters() {
        assert_eq!(advance_pointer("page 94", 5).as_deref(), Some("page 99"));
        assert_eq!(advance_pointer("chapter 3", 1).as_deref(), Some("chapter 4"));
        assert_eq!(advance_pointer("verse 9", 5).as_deref(), Some("verse 14"));
        assert_eq!(advance_pointer("step 5", 1).as_deref(), Some("step 6"));
    }

    #[test]
    fn chapter_verse_moves_only_the_verse() {
        assert_eq!(
            advance_pointer("chapter 3 verse 16", 1).as_deref(),
            Some("chapter 3 verse 17")
        );
    }

    #[test]
    fn abbreviations_come_back_canonical() {
        assert_eq!(advance_pointer("pg 10", 1).as_deref(), Some("page 11"));
        assert_eq!(advance_pointer("Part 3", 1).as_deref(), Some("step 4"));
    }

    #[test]
    fn timestamp_advances_in_seconds() {
        assert_eq!(advance_pointer("34:22", 300).as_deref(), Some("39:22"));
        assert_eq!(advance_pointer("59:30", 60).as_deref(), Some("1:00:30"));
        assert_eq!(advance_pointer("1:59:45", 30).as_deref(), Some("2:00:15"));
    }

    #[test]
    fn timestamp_drops_hours_when_they_reach_zero() {
        assert_eq!(advance_pointer("1:00:10", -30).as_deref(), Some("59:40"));
    }

    #[test]
    fn negative_amounts_saturate_at_zero() {
        assert_eq!(advance_pointer("0:10", -30).as_deref(), Some("0:00"));
        assert_eq!(advance_pointer("page 2", -5).as_deref(), Some("page 0"));
    }

    #[test]
    fn extreme_amounts_clamp_instead_of_overflowing() {
        assert_eq!(advance_pointer("page 1", i64::MAX).as_deref(), Some("page 4294967295"));
        assert_eq!(advance_pointer("page 1", i64::MIN).as_deref(), Some("page 0"));
        assert_eq!(
            advance_pointer("chapter 3 verse 16", i64::MAX).as_deref(),
            Some("chapter 3 verse 4294967295")
        );
        assert_eq!(advance_pointer("1:00", i64::MIN).as_deref(), Some("0:00"));
        assert_eq!(advance_pointer("1:00", i64::MAX).as_deref(), Some("1193046:28:15"));
    }

    #[test]
    fn freeform_cannot_advance() {
        assert_eq!(advance_pointer("the part with the dragon", 1), None);
        assert_eq!(advance_pointer("", 1), None);
    }

    #[test]
    fn advanced_pointer_reparses_to_same_variant() {
        let cases = [
            ("page 10", 3),
            ("chapter 2", 3),
            ("verse 4", 3),
            ("chapter 2 verse 4", 3),
            ("12:00", 3),
            ("step 1", 3),
        ];
        for (text, delta) in cases {
            let before = parse_pointer(text);
            let after = parse_pointer(&advance_pointer(text, delta).unwrap());
            assert_eq!(before.kind(), after.kind(), "{text}");
            assert_eq!(before.advance(delta), Some(after));
        }
    }
}
