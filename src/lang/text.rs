//! Text heuristics used to tell label-like headings from prose.
//!
//! Case-based predicates only make sense for cased scripts; they return
//! `false` (or `0.0`) when the language profile says the script is caseless.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use super::model::LanguageModel;

/// Characters that mark a list item rather than a heading.
pub const BULLETS: &[char] = &[
    '\u{2022}', '\u{25CF}', '-', '*', '\u{25AA}', '\u{2023}', '\u{2013}', '\u{2014}',
];

static DECIMAL_NUMBERING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)*").unwrap());
static ROMAN_NUMBERING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[IVXLCDM]+\.").unwrap());
static LETTER_NUMBERING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]\)").unwrap());

/// Check if a character belongs to a script written without word spaces.
pub fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs
    (0x4E00..=0x9FFF).contains(&code)
    // Extension A
    || (0x3400..=0x4DBF).contains(&code)
    // Extensions B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana
    || (0x3040..=0x309F).contains(&code)
    // Katakana
    || (0x30A0..=0x30FF).contains(&code)
    // Halfwidth Katakana
    || (0xFF66..=0xFF9D).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether every letter is uppercase (at least one letter required).
pub fn is_all_caps(text: &str, model: &LanguageModel) -> bool {
    if !model.is_cased() {
        return false;
    }
    let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(char::is_uppercase)
}

/// Whether every purely alphabetic word is capitalized with a lowercase tail.
pub fn is_title_case(text: &str, model: &LanguageModel) -> bool {
    if !model.is_cased() {
        return false;
    }
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().all(char::is_alphabetic))
        .collect();
    if words.is_empty() {
        return false;
    }

    words.iter().all(|w| {
        let mut chars = w.chars();
        match chars.next() {
            Some(first) => first.is_uppercase() && chars.all(char::is_lowercase),
            None => false,
        }
    })
}

/// Share of letters that are uppercase.
pub fn uppercase_ratio(text: &str, model: &LanguageModel) -> f32 {
    if !model.is_cased() {
        return 0.0;
    }
    let (upper, total) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(u, t), c| {
            (u + usize::from(c.is_uppercase()), t + 1)
        });
    if total == 0 {
        0.0
    } else {
        upper as f32 / total as f32
    }
}

/// Whether the text opens with a bullet or dash.
pub fn starts_with_bullet(text: &str) -> bool {
    text.chars().next().is_some_and(|c| BULLETS.contains(&c))
}

/// Whether the text opens with `1.`, `1.2.3`, `IV.` or `A)` style numbering.
///
/// Full-width digits and letters are folded with NFKC first.
pub fn starts_with_numbering(text: &str) -> bool {
    let normalized: String = text.trim().nfkc().collect();
    DECIMAL_NUMBERING.is_match(&normalized)
        || ROMAN_NUMBERING.is_match(&normalized)
        || LETTER_NUMBERING.is_match(&normalized)
}

/// Whether the text fits the heading length limits.
///
/// Languages without word spacing are measured in characters only.
pub fn is_short(text: &str, max_words: usize, max_chars: usize, model: &LanguageModel) -> bool {
    let chars = text.chars().count();
    if !model.counts_words() {
        return chars <= max_chars;
    }
    chars <= max_chars && text.split_whitespace().count() <= max_words
}

/// Whether the text contains a complete sentence.
///
/// A sentence qualifies when it has more than two word tokens and ends with
/// a terminator of the language profile.
pub fn is_full_sentence(text: &str, model: &LanguageModel) -> bool {
    text.unicode_sentences().any(|sentence| {
        let trimmed = sentence.trim_end();
        trimmed.unicode_words().count() > 2
            && trimmed.chars().last().is_some_and(|c| model.ends_sentence(c))
    })
}

/// Collapse runs of three or more identical letters to one.
///
/// PDF generators sometimes paint the same glyph several times to fake bold,
/// which turns "Report" into "RRRReport" after extraction.
pub fn collapse_repeated_letters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }
        if c.is_alphabetic() && run >= 3 {
            out.push(c);
        } else {
            out.extend(std::iter::repeat(c).take(run));
        }
        i += run;
    }

    out
}

/// Drop words that repeat the word directly before them.
pub fn dedup_adjacent_words(text: &str) -> String {
    let mut words: Vec<&str> = Vec::new();
    for word in text.split_whitespace() {
        if words.last() != Some(&word) {
            words.push(word);
        }
    }
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ModelRegistry;

    fn en() -> LanguageModel {
        ModelRegistry::new().get("en").clone()
    }

    fn ja() -> LanguageModel {
        ModelRegistry::new().get("ja").clone()
    }

    #[test]
    fn test_is_all_caps() {
        assert!(is_all_caps("INTRODUCTION", &en()));
        assert!(is_all_caps("1. SCOPE AND PURPOSE", &en()));
        assert!(!is_all_caps("Introduction", &en()));
        assert!(!is_all_caps("123", &en()));
        assert!(!is_all_caps("概要", &ja()));
    }

    #[test]
    fn test_is_title_case() {
        assert!(is_title_case("Application Form", &en()));
        assert!(is_title_case("1. Overview", &en()));
        assert!(!is_title_case("Application form", &en()));
        assert!(!is_title_case("OVERVIEW", &en()));
        assert!(!is_title_case("2024", &en()));
    }

    #[test]
    fn test_uppercase_ratio() {
        assert!((uppercase_ratio("ABcd", &en()) - 0.5).abs() < 1e-6);
        assert_eq!(uppercase_ratio("1234", &en()), 0.0);
        assert_eq!(uppercase_ratio("ABC", &ja()), 0.0);
    }

    #[test]
    fn test_starts_with_bullet() {
        assert!(starts_with_bullet("• item"));
        assert!(starts_with_bullet("- item"));
        assert!(starts_with_bullet("– item"));
        assert!(!starts_with_bullet("Item"));
        assert!(!starts_with_bullet(""));
    }

    #[test]
    fn test_starts_with_numbering() {
        assert!(starts_with_numbering("1. Overview"));
        assert!(starts_with_numbering("1.1 Background"));
        assert!(starts_with_numbering("IV. Results"));
        assert!(starts_with_numbering("A) Appendix"));
        assert!(starts_with_numbering("２．概要"));
        assert!(!starts_with_numbering("Overview"));
        assert!(!starts_with_numbering("a) lower"));
    }

    #[test]
    fn test_is_short() {
        assert!(is_short("Short heading", 14, 80, &en()));
        let long = "word ".repeat(20);
        assert!(!is_short(&long, 14, 80, &en()));
        assert!(!is_short(&"x".repeat(81), 14, 80, &en()));
        // character count only
        assert!(is_short("これは見出しです", 1, 80, &ja()));
    }

    #[test]
    fn test_is_full_sentence() {
        assert!(is_full_sentence(
            "This is the body text of the document.",
            &en()
        ));
        assert!(!is_full_sentence("1. Overview", &en()));
        assert!(!is_full_sentence("Methods", &en()));
        assert!(!is_full_sentence("Results and discussion", &en()));
        assert!(is_full_sentence("これは本文の文章です。", &ja()));
    }

    #[test]
    fn test_collapse_repeated_letters() {
        assert_eq!(collapse_repeated_letters("RRRReport"), "Report");
        assert_eq!(collapse_repeated_letters("Proposal"), "Proposal");
        assert_eq!(collapse_repeated_letters("Book keeper"), "Book keeper");
        assert_eq!(collapse_repeated_letters("2000"), "2000");
    }

    #[test]
    fn test_dedup_adjacent_words() {
        assert_eq!(dedup_adjacent_words("Request Request for Proposal"), "Request for Proposal");
        assert_eq!(dedup_adjacent_words("a b a"), "a b a");
    }

    #[test]
    fn test_spaceless_script() {
        assert!(is_spaceless_script_char('概'));
        assert!(is_spaceless_script_char('カ'));
        assert!(is_spaceless_script_char('の'));
        assert!(!is_spaceless_script_char('a'));
        assert!(!is_spaceless_script_char('한'));
    }
}
