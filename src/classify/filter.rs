//! Heading text filter.

use crate::lang::{
    is_all_caps, is_full_sentence, is_short, is_title_case, starts_with_bullet,
    starts_with_numbering, uppercase_ratio, LanguageModel,
};

use super::options::ClassifyOptions;

/// Decide whether a line of a heading size reads like a heading.
pub fn is_heading_text(
    text: &str,
    is_bold: bool,
    model: &LanguageModel,
    options: &ClassifyOptions,
) -> bool {
    let text = text.trim();
    if text.is_empty() || starts_with_bullet(text) {
        return false;
    }
    if !is_short(text, options.max_words, options.max_chars, model) {
        return false;
    }
    if is_full_sentence(text, model) {
        return false;
    }
    if !options.require_label_casing {
        return true;
    }

    is_all_caps(text, model)
        || is_title_case(text, model)
        || uppercase_ratio(text, model) > options.uppercase_ratio
        || starts_with_numbering(text)
        || is_bold
        || !model.is_cased()
}
