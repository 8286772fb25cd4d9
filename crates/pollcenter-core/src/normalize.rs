//! Booth name normalization
//!
//! Booth names and addresses carry a lot of noise that differs between booths
//! hosted at the same site: a code prefix (`PB0001 - `), parenthetical notes,
//! room/part/direction words in Latin or Devanagari, room numbers and
//! punctuation. [`Normalizer`] strips all of it in a fixed order and
//! transliterates whatever is left to Latin script:
//!
//! 1. leading `<2 letters><2+ digits> -` code prefix
//! 2. the parenthesized run `(...)`
//! 3. room/location vocabulary, `... BHAG` compounds, short trailing fragments
//!    and a trailing Devanagari vowel sign `ी`
//! 4. runs of digits, commas, periods, hyphens and spaces (collapsed to one space)
//! 5. transliteration to Latin
//! 6. trim
//!
//! Normalization never fails. Input made entirely of noise becomes `""`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::NormalizerConfig;
use crate::error::Result;
use crate::record::{BoothRecord, NormalizedBooth};

lazy_static! {
    // Code prefix like "PB0001 -"
    static ref CODE_PREFIX_REGEX: Regex = Regex::new(r"^[A-Z][A-Z][0-9]{2,} -").unwrap();

    // Greedy: spans from the first '(' to the last ')' on the line
    static ref PARENTHESIZED_REGEX: Regex = Regex::new(r"\(.*\)").unwrap();

    static ref SYMBOL_RUN_REGEX: Regex = Regex::new(r"[0-9,. -]+").unwrap();

    static ref DEFAULT_NORMALIZER: Normalizer = Normalizer::new(&NormalizerConfig::default())
        .expect("built-in room vocabulary compiles");
}

/// North/east/west + "part" compounds, e.g. `UTTARI BHAG`, `DBHAG`
const BHAG_COMPOUND_PATTERN: &str = r"(?:UTTARI|PURVI|PASHCHIMI|U|D) ?BHAG";

/// Devanagari vowel sign II left dangling at the end of a name
const TRAILING_VOWEL_SIGN_PATTERN: &str = "\u{940}$";

/// Converts text in any script to its closest Latin-alphabet form.
pub trait Transliterator: Send + Sync {
    fn transliterate(&self, text: &str) -> String;
}

/// Table-driven transliteration backed by the `unidecode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unidecode;

impl Transliterator for Unidecode {
    fn transliterate(&self, text: &str) -> String {
        unidecode::unidecode(text)
    }
}

/// Compiled name normalizer.
pub struct Normalizer {
    room_regex: Regex,
    transliterator: Box<dyn Transliterator>,
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("room_regex", &self.room_regex.as_str())
            .finish_non_exhaustive()
    }
}

impl Normalizer {
    /// Build a normalizer using [`Unidecode`] for transliteration
    pub fn new(config: &NormalizerConfig) -> Result<Self> {
        Self::with_transliterator(config, Box::new(Unidecode))
    }

    pub fn with_transliterator(
        config: &NormalizerConfig,
        transliterator: Box<dyn Transliterator>,
    ) -> Result<Self> {
        let room_regex = Regex::new(&room_pattern(config))?;
        Ok(Self {
            room_regex,
            transliterator,
        })
    }

    /// Normalize a booth name or address
    pub fn normalize(&self, text: &str) -> String {
        let text = CODE_PREFIX_REGEX.replace(text, "");

        let text = PARENTHESIZED_REGEX.replace_all(&text, "");
        let text = text.trim();

        let text = self.room_regex.replace_all(text, "");
        let text = text.trim();

        let text = SYMBOL_RUN_REGEX.replace_all(text, " ");

        let text = if text.is_ascii() {
            text.into_owned()
        } else {
            self.transliterator.transliterate(&text)
        };

        text.trim().to_string()
    }

    /// Rewrite booth names without deriving centers; addresses are ignored
    pub fn normalize_booths(&self, records: &[BoothRecord]) -> Vec<NormalizedBooth> {
        records
            .iter()
            .map(|r| NormalizedBooth {
                ward_key: r.ward_key.clone(),
                booth_key: r.booth_key.clone(),
                name: self.normalize(&r.name),
            })
            .collect()
    }
}

/// Normalize with the built-in vocabulary
pub fn normalize(text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(text)
}

/// Normalize booth names with the built-in vocabulary
pub fn normalize_booth_names(records: &[BoothRecord]) -> Vec<NormalizedBooth> {
    DEFAULT_NORMALIZER.normalize_booths(records)
}

/// Alternation of every room/location rule, leftmost-first.
fn room_pattern(config: &NormalizerConfig) -> String {
    let mut alternatives = vec![BHAG_COMPOUND_PATTERN.to_string()];

    if config.max_trailing_fragment > 0 {
        alternatives.push(format!(r" .{{1,{}}}$", config.max_trailing_fragment));
    }
    alternatives.push(TRAILING_VOWEL_SIGN_PATTERN.to_string());

    if !config.room_words.is_empty() {
        let words: Vec<String> = config
            .room_words
            .iter()
            .map(|w| regex::escape(w.trim()))
            .collect();
        alternatives.push(format!(r"\b(?:{})\b", words.join("|")));
    }

    alternatives.join("|")
}
