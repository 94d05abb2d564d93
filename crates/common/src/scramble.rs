use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::secret::{FieldValue, SecretValue};

/// Written in place of any field that is not a plain string
pub const COMPLEX_VALUE_PLACEHOLDER: &str = "Complex value replaced";

// Scrambled characters are drawn from printable ASCII, '!' through '~'
const PRINTABLE_START: u32 = 0x21;
const PRINTABLE_LEN: u32 = 94;

/// Irreversibly replaces secret values while keeping their shape.
///
/// Every character of a string field is mixed with a freshly drawn
///  random offset that is never kept, yielding a printable ASCII
///  character that always differs from the one it replaces. The
///  field names and string lengths (in characters) survive; the
///  values do not. This is for rehearsing a migration without
///  carrying real secrets along, not a cipher.
#[derive(Debug)]
pub struct Scrambler {
    rng: StdRng,
}

impl Default for Scrambler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scrambler {
    /// Scrambler seeded from the operating system, so no two runs
    ///  share a random stream
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic scrambler, for tests
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Return a string of the same character length that shares no
    ///  character position with the input
    pub fn scramble_text(&mut self, text: &str) -> String {
        text.chars().map(|c| self.scramble_char(c)).collect()
    }

    fn scramble_char(&mut self, c: char) -> char {
        let offset = self.rng.random_range(1..PRINTABLE_LEN);
        let index = (c as u32).wrapping_sub(PRINTABLE_START) % PRINTABLE_LEN;
        let mixed = PRINTABLE_START + (index + offset) % PRINTABLE_LEN;
        // mixed is always within '!'..='~'
        char::from_u32(mixed).unwrap_or('?')
    }

    /// Scramble every field of a secret in place. String fields are
    ///  scrambled, everything else becomes the fixed placeholder.
    pub fn scramble(&mut self, value: &mut SecretValue) {
        for (field, field_value) in value.iter_mut() {
            match field_value {
                FieldValue::String(text)
                | FieldValue::Other(serde_json::Value::String(text)) => {
                    *field_value = FieldValue::String(self.scramble_text(text));
                }
                FieldValue::Other(_) => {
                    tracing::warn!(
                        field = %field,
                        kind = field_value.kind(),
                        "replacing complex value"
                    );
                    *field_value = FieldValue::String(COMPLEX_VALUE_PLACEHOLDER.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scramble_text_preserves_length() {
        let mut scrambler = Scrambler::new();
        for text in ["", "a", "v2", "a much longer secret value", "ünïcødé ✓"] {
            let scrambled = scrambler.scramble_text(text);
            assert_eq!(scrambled.chars().count(), text.chars().count());
        }
    }

    #[test]
    fn test_scramble_text_changes_every_character() {
        let mut scrambler = Scrambler::new();
        let text = "!~ aZ09\t\u{7f}é✓";
        for _ in 0..100 {
            let scrambled = scrambler.scramble_text(text);
            for (a, b) in text.chars().zip(scrambled.chars()) {
                assert_ne!(a, b);
                assert!(b.is_ascii_graphic());
            }
        }
    }

    #[test]
    fn test_scramble_text_differs_between_runs() {
        let text = "correct horse battery staple 0123456789";
        let first = Scrambler::new().scramble_text(text);
        let second = Scrambler::new().scramble_text(text);
        assert_ne!(first, text);
        assert_ne!(second, text);
        assert_ne!(first, second);
    }

    #[test]
    fn test_seeded_scrambler_is_repeatable() {
        let text = "repeatable";
        let first = Scrambler::from_seed(7).scramble_text(text);
        let second = Scrambler::from_seed(7).scramble_text(text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_scramble_secret_fields() {
        let mut value = SecretValue::from_json(json!({
            "k": "v2",
            "n": 42,
            "nested": {"a": "b"},
            "list": ["x"],
        }))
        .unwrap();

        Scrambler::new().scramble(&mut value);

        assert_eq!(
            value.fields().cloned().collect::<Vec<_>>(),
            vec!["k", "list", "n", "nested"]
        );
        let k = value.get("k").unwrap().as_str().unwrap();
        assert_eq!(k.chars().count(), 2);
        assert_ne!(k, "v2");
        for field in ["n", "nested", "list"] {
            assert_eq!(
                value.get(field).unwrap().as_str(),
                Some(COMPLEX_VALUE_PLACEHOLDER)
            );
        }
    }

    #[test]
    fn test_json_string_held_as_other_is_scrambled() {
        let mut value = SecretValue::new();
        value.insert("s", FieldValue::Other(json!("hunter2")));
        assert!(value.get("s").unwrap().is_string());

        Scrambler::from_seed(3).scramble(&mut value);

        let scrambled = value.get("s").unwrap();
        assert!(matches!(scrambled, FieldValue::String(_)));
        let text = scrambled.as_str().unwrap();
        assert_ne!(text, COMPLEX_VALUE_PLACEHOLDER);
        assert_eq!(text.chars().count(), "hunter2".chars().count());
        for (a, b) in "hunter2".chars().zip(text.chars()) {
            assert_ne!(a, b);
        }
    }
}
