//! The 12-word mnemonic input buffer.

use zeroize::Zeroize;

use crate::error::WalletError;

/// Number of word slots in the buffer.
pub const WORD_COUNT: usize = 12;

/// An ordered, fixed-size buffer of exactly twelve word slots.
///
/// Slots are only ever overwritten, never removed, so the buffer always
/// holds twelve strings and word order is preserved. The buffer is wiped on
/// drop and `Debug` never prints its contents.
#[derive(Clone, PartialEq, Eq, Zeroize, zeroize::ZeroizeOnDrop)]
pub struct MnemonicWords {
    words: [String; WORD_COUNT],
}

impl Default for MnemonicWords {
    fn default() -> Self {
        Self::new()
    }
}

impl MnemonicWords {
    /// Creates a buffer with all twelve slots empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            words: std::array::from_fn(|_| String::new()),
        }
    }

    /// Overwrites slot `index` with `value`.
    ///
    /// The value is stored as-is; whitespace and case are not normalized at
    /// this layer.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::WordIndexOutOfRange`] for `index >= 12`.
    pub fn set_word(&mut self, index: usize, value: impl Into<String>) -> Result<(), WalletError> {
        let slot = self
            .words
            .get_mut(index)
            .ok_or(WalletError::WordIndexOutOfRange {
                index,
                max: WORD_COUNT,
            })?;
        *slot = value.into();
        Ok(())
    }

    /// Returns the word at `index`, or `None` when out of range.
    #[must_use]
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Replaces the whole buffer from pasted text.
    ///
    /// `text` is split on single spaces and the tokens fill slots 0..11 in
    /// order. Tokens beyond the twelfth are ignored; when fewer than twelve
    /// are pasted the remaining slots are reset to the empty string, so the
    /// twelve-slot invariant always holds.
    pub fn paste_all(&mut self, text: &str) {
        let mut tokens = text.split(' ');
        for slot in &mut self.words {
            *slot = tokens.next().unwrap_or("").to_string();
        }
    }

    /// Joins the twelve words with single spaces and trims surrounding
    /// whitespace — the exact string handed to seed derivation.
    #[must_use]
    pub fn phrase(&self) -> String {
        self.words.join(" ").trim().to_string()
    }

    /// Resets every slot to the empty string.
    pub fn clear(&mut self) {
        for slot in &mut self.words {
            slot.zeroize();
        }
    }

    /// Returns `true` when every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(String::is_empty)
    }

    /// Iterates over the slots in order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl std::fmt::Debug for MnemonicWords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MnemonicWords")
            .field("words", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str =
        "myth like bonus scare over problem client lizard pioneer submit female collect";

    #[test]
    fn test_new_buffer_has_twelve_empty_slots() {
        let words = MnemonicWords::new();
        assert!(words.is_empty());
        assert_eq!(words.iter().count(), WORD_COUNT);
        assert_eq!(words.phrase(), "");
    }

    #[test]
    fn test_set_word_overwrites_slot() {
        let mut words = MnemonicWords::new();
        words.set_word(0, "myth").unwrap();
        words.set_word(0, "like").unwrap();
        assert_eq!(words.word(0), Some("like"));
        assert_eq!(words.word(1), Some(""));
    }

    #[test]
    fn test_set_word_out_of_range() {
        let mut words = MnemonicWords::new();
        let result = words.set_word(WORD_COUNT, "extra");
        assert!(matches!(
            result,
            Err(WalletError::WordIndexOutOfRange { index: 12, max: 12 })
        ));
    }

    #[test]
    fn test_paste_fills_all_slots_in_order() {
        let mut words = MnemonicWords::new();
        words.paste_all(PHRASE);

        for (slot, expected) in words.iter().zip(PHRASE.split(' ')) {
            assert_eq!(slot, expected);
        }
        assert_eq!(words.phrase(), PHRASE);
    }

    #[test]
    fn test_paste_short_text_pads_with_empty_strings() {
        let mut words = MnemonicWords::new();
        words.set_word(11, "leftover").unwrap();
        words.paste_all("myth like bonus");

        assert_eq!(words.word(0), Some("myth"));
        assert_eq!(words.word(2), Some("bonus"));
        // Trailing slots are reset, not left holding prior values.
        assert_eq!(words.word(3), Some(""));
        assert_eq!(words.word(11), Some(""));
        assert_eq!(words.iter().count(), WORD_COUNT);
    }

    #[test]
    fn test_paste_extra_tokens_ignored() {
        let mut words = MnemonicWords::new();
        words.paste_all(&format!("{PHRASE} extra words"));
        assert_eq!(words.phrase(), PHRASE);
    }

    #[test]
    fn test_phrase_trims_surrounding_whitespace() {
        let mut words = MnemonicWords::new();
        words.set_word(0, "myth").unwrap();
        words.set_word(1, "like").unwrap();
        // Slots 2..11 stay empty; the join produces trailing spaces that
        // trim removes.
        assert_eq!(words.phrase(), "myth like");
    }

    #[test]
    fn test_clear_resets_all_slots() {
        let mut words = MnemonicWords::new();
        words.paste_all(PHRASE);
        words.clear();
        assert!(words.is_empty());
    }

    #[test]
    fn test_debug_redacts_words() {
        let mut words = MnemonicWords::new();
        words.paste_all(PHRASE);
        let rendered = format!("{words:?}");
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("myth"));
    }
}
