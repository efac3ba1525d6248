//! Diacritic-insensitive text normalization.
//!
//! Matching in the combo ignores accents: "café" matches "cafe" and
//! "Zürcher" matches "zurch". Text is decomposed to canonical decomposed form
//! (NFD) and every non-spacing mark is dropped, leaving the base letters.
//! Case is left alone by [`normalize`]; [`fold`] additionally lowercases and
//! is what comparisons use.

use icu::normalizer::DecomposingNormalizerBorrowed;
use icu::properties::props::GeneralCategory;
use icu::properties::{CodePointMapData, CodePointMapDataBorrowed};

/// Strips diacritics using compiled Unicode data.
///
/// The normalizer borrows static data, so it is free to construct and can
/// be shared across threads.
pub struct TextNormalizer {
    nfd: DecomposingNormalizerBorrowed<'static>,
    categories: CodePointMapDataBorrowed<'static, GeneralCategory>,
}

impl TextNormalizer {
    /// Create a normalizer backed by the compiled ICU data.
    pub const fn new() -> Self {
        Self {
            nfd: DecomposingNormalizerBorrowed::new_nfd(),
            categories: CodePointMapData::<GeneralCategory>::new(),
        }
    }

    /// Decompose `text` and drop all non-spacing marks.
    ///
    /// Total and idempotent; the empty string maps to itself.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_ascii() {
            return text.to_string();
        }
        self.nfd
            .normalize(text)
            .chars()
            .filter(|&c| self.categories.get(c) != GeneralCategory::NonspacingMark)
            .collect()
    }

    /// Lowercase `text`, then [`normalize`](Self::normalize) it.
    ///
    /// Lowercasing first means marks introduced by case mapping (such as the
    /// dot of a lowercased `İ`) are stripped too.
    pub fn fold(&self, text: &str) -> String {
        self.normalize(&text.to_lowercase())
    }
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer").finish_non_exhaustive()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

static NORMALIZER: TextNormalizer = TextNormalizer::new();

/// Strip diacritics from `text` with the shared normalizer.
///
/// # Example
///
/// ```
/// use horizon_combo::normalize;
///
/// assert_eq!(normalize("café"), "cafe");
/// assert_eq!(normalize("Zürcher"), "Zurcher");
/// ```
pub fn normalize(text: &str) -> String {
    NORMALIZER.normalize(text)
}

/// Case-fold and strip diacritics from `text` with the shared normalizer.
pub fn fold(text: &str) -> String {
    NORMALIZER.fold(text)
}
