//! PGN game tags.

/// The tag keys recognized by [`GameTags`]: the PGN Seven Tag Roster plus
/// the two ELO tags and the ECO code.
pub const TAG_KEYS: [&str; 10] = [
    "Event", "Site", "Date", "Round", "White", "Black", "Result", "WhiteElo", "BlackElo", "ECO",
];

const RESULT: usize = 6;
const VALUE_MAX_BYTES: usize = 255;

/// A fixed-key map of PGN tag values.
///
/// Only the keys in [`TAG_KEYS`] are stored; setting any other key is a
/// silent no-op and getting one yields `"?"`. The `Result` tag accepts only
/// the four legal game results and defaults to `"*"`. Values are capped at
/// 255 bytes and non-printable characters are replaced with spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTags {
    values: [String; 10],
}

impl GameTags {
    /// Creates an empty tag set with `Result` set to `"*"`.
    pub fn new() -> Self {
        let mut tags = GameTags {
            values: Default::default(),
        };
        tags.values[RESULT].push('*');
        tags
    }

    /// Clears every tag back to its default.
    pub fn reset(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
        self.values[RESULT].push('*');
    }

    /// Returns the value for `key`, `"?"` if the key is unknown or unset.
    pub fn get(&self, key: &str) -> &str {
        match Self::key_index(key) {
            Some(index) if !self.values[index].is_empty() => &self.values[index],
            _ => "?",
        }
    }

    /// Sets the value for `key`.
    ///
    /// Unknown keys are ignored, as are invalid `Result` values.
    pub fn set(&mut self, key: &str, value: &str) {
        let Some(index) = Self::key_index(key) else {
            return;
        };
        if index == RESULT {
            if matches!(value, "1-0" | "0-1" | "1/2-1/2" | "*") {
                self.values[RESULT].clear();
                self.values[RESULT].push_str(value);
            }
            return;
        }
        let destination = &mut self.values[index];
        destination.clear();
        for c in value.chars() {
            if destination.len() + c.len_utf8() > VALUE_MAX_BYTES {
                break;
            }
            destination.push(if c.is_control() { ' ' } else { c });
        }
    }

    fn key_index(key: &str) -> Option<usize> {
        TAG_KEYS.iter().position(|&k| k == key)
    }
}

impl Default for GameTags {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let tags = GameTags::new();
        assert_eq!(tags.get("Event"), "?");
        assert_eq!(tags.get("White"), "?");
        assert_eq!(tags.get("Result"), "*");
    }

    #[test]
    fn set_and_get() {
        let mut tags = GameTags::new();
        tags.set("Event", "Hungarian Super Championship");
        tags.set("White", "Tolnai, Tibor");
        assert_eq!(tags.get("Event"), "Hungarian Super Championship");
        assert_eq!(tags.get("White"), "Tolnai, Tibor");
        assert_eq!(tags.get("Black"), "?");
    }

    #[test]
    fn unknown_keys_ignored() {
        let mut tags = GameTags::new();
        tags.set("Opening", "Sicilian");
        assert_eq!(tags.get("Opening"), "?");
    }

    #[test]
    fn result_validation() {
        let mut tags = GameTags::new();
        tags.set("Result", "1-0");
        assert_eq!(tags.get("Result"), "1-0");
        tags.set("Result", "2-0");
        assert_eq!(tags.get("Result"), "1-0");
        tags.set("Result", "1/2-1/2");
        assert_eq!(tags.get("Result"), "1/2-1/2");
        tags.set("Result", "");
        assert_eq!(tags.get("Result"), "1/2-1/2");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut tags = GameTags::new();
        tags.set("Site", "Budapest HUN");
        tags.set("Result", "0-1");
        tags.reset();
        assert_eq!(tags.get("Site"), "?");
        assert_eq!(tags.get("Result"), "*");
    }

    #[test]
    fn non_printable_characters_scrubbed() {
        let mut tags = GameTags::new();
        tags.set("Event", "line\nbreak\tand\x7fdelete");
        assert_eq!(tags.get("Event"), "line break and delete");
    }

    #[test]
    fn long_values_truncated() {
        let mut tags = GameTags::new();
        let long = "x".repeat(400);
        tags.set("Site", &long);
        assert_eq!(tags.get("Site").len(), 255);
    }
}
