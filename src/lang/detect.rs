//! Language identification over a sample of document text.

use crate::error::{Error, Result};
use crate::model::TextSpan;

/// Identifies the language of a text sample.
pub trait LanguageDetector {
    /// Return a language code for `text`, or an error when it cannot tell.
    fn detect(&self, text: &str) -> Result<String>;
}

/// [`LanguageDetector`] backed by whatlang's trigram models.
#[derive(Debug, Clone, Default)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    /// Create a new detector.
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Detection("no text to sample".to_string()));
        }

        let info = whatlang::detect(text)
            .ok_or_else(|| Error::Detection("no language matched the sample".to_string()))?;

        if !info.is_reliable() {
            log::debug!(
                "Unreliable detection: {} ({:.2})",
                info.lang().code(),
                info.confidence()
            );
        }

        Ok(to_short_code(info.lang().code()).to_string())
    }
}

/// Map an ISO 639-3 code to ISO 639-1 where a common two-letter code exists.
pub fn to_short_code(code: &str) -> &str {
    match code {
        "eng" => "en",
        "spa" => "es",
        "jpn" => "ja",
        "fra" => "fr",
        "deu" => "de",
        "ita" => "it",
        "por" => "pt",
        "nld" => "nl",
        "rus" => "ru",
        "ukr" => "uk",
        "pol" => "pl",
        "swe" => "sv",
        "dan" => "da",
        "fin" => "fi",
        "tur" => "tr",
        "ara" => "ar",
        "heb" => "he",
        "hin" => "hi",
        "cmn" => "zh",
        "kor" => "ko",
        "vie" => "vi",
        "tha" => "th",
        "ind" => "id",
        other => other,
    }
}

/// Join the text of the first `limit` non-blank spans.
pub fn sample_text(spans: &[TextSpan], limit: usize) -> String {
    spans
        .iter()
        .filter(|s| !s.is_blank())
        .take(limit)
        .map(|s| s.text.trim())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Detect the language of a span sample, using `fallback` when detection fails.
pub fn detect_or_fallback(
    detector: &dyn LanguageDetector,
    spans: &[TextSpan],
    limit: usize,
    fallback: &str,
) -> String {
    let sample = sample_text(spans, limit);
    match detector.detect(&sample) {
        Ok(code) => code,
        Err(e) => {
            log::warn!("Language detection failed ({}), using '{}'", e, fallback);
            fallback.to_string()
        }
    }
}
