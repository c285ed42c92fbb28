//! Per-language text profiles.

use std::collections::HashMap;

/// Sentence terminators shared by all bundled profiles.
const TERMINATORS: &[char] = &['.', '!', '?', '。', '！', '？'];

/// Language code of the profile used when nothing better matches.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Scripts without letter case: (language code, written with word spaces).
const CASELESS_LANGUAGES: &[(&str, bool)] = &[
    ("zh", false),
    ("ko", true),
    ("th", false),
    ("ar", true),
    ("he", true),
    ("hi", true),
];

/// How text in one language is measured and segmented.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageModel {
    code: String,
    cased: bool,
    word_spaced: bool,
    terminators: Vec<char>,
}

impl LanguageModel {
    /// Create a profile for a language code.
    pub fn new(code: impl Into<String>, cased: bool, word_spaced: bool) -> Self {
        Self {
            code: code.into(),
            cased,
            word_spaced,
            terminators: TERMINATORS.to_vec(),
        }
    }

    /// Replace the sentence terminators.
    pub fn with_terminators(mut self, terminators: &[char]) -> Self {
        self.terminators = terminators.to_vec();
        self
    }

    /// Language code of this profile.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Whether the script distinguishes upper and lower case.
    pub fn is_cased(&self) -> bool {
        self.cased
    }

    /// Whether length limits count words (false: characters only).
    pub fn counts_words(&self) -> bool {
        self.word_spaced
    }

    /// Whether `c` ends a sentence.
    pub fn ends_sentence(&self, c: char) -> bool {
        self.terminators.contains(&c)
    }
}

/// Read-only set of language profiles keyed by language code.
///
/// Built once at startup and shared by reference; lookups for unknown codes
/// resolve to the default profile.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: HashMap<String, LanguageModel>,
    caseless: HashMap<String, LanguageModel>,
    default: LanguageModel,
}

impl ModelRegistry {
    /// Create a registry with the English, Spanish and Japanese profiles.
    pub fn new() -> Self {
        let default = LanguageModel::new(DEFAULT_LANGUAGE, true, true);
        let caseless = CASELESS_LANGUAGES
            .iter()
            .map(|&(code, spaced)| (code.to_string(), LanguageModel::new(code, false, spaced)))
            .collect();
        let mut registry = Self {
            models: HashMap::new(),
            caseless,
            default: default.clone(),
        };
        registry.register(default);
        registry.register(LanguageModel::new("es", true, true));
        registry.register(LanguageModel::new("ja", false, false));
        registry
    }

    /// Add or replace a profile.
    pub fn register(&mut self, model: LanguageModel) {
        self.models.insert(model.code().to_string(), model);
    }

    /// Look up the profile for a code.
    ///
    /// Codes without a dedicated profile get a generic caseless profile when
    /// their script has no letter case, and the default profile otherwise.
    pub fn get(&self, code: &str) -> &LanguageModel {
        if let Some(model) = self.models.get(code) {
            return model;
        }
        match self.caseless.get(code) {
            Some(model) => {
                log::debug!("No profile for '{}', using caseless heuristics", code);
                model
            }
            None => {
                log::debug!("No profile for '{}', using '{}'", code, self.default.code());
                &self.default
            }
        }
    }

    /// Whether a dedicated profile exists for a code.
    pub fn supports(&self, code: &str) -> bool {
        self.models.contains_key(code)
    }

    /// Registered language codes, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.models.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
