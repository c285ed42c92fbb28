//! Language detection, per-language profiles and text heuristics.

mod detect;
mod model;
mod text;

pub use detect::{
    detect_or_fallback, sample_text, to_short_code, LanguageDetector, WhatlangDetector,
};
pub use model::{LanguageModel, ModelRegistry, DEFAULT_LANGUAGE};
pub use text::{
    collapse_repeated_letters, collapse_whitespace, dedup_adjacent_words, is_all_caps,
    is_full_sentence, is_short, is_spaceless_script_char, is_title_case, starts_with_bullet,
    starts_with_numbering, uppercase_ratio, BULLETS,
};
