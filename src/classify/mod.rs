//! Title and heading classification.
//!
//! Works on the spans of one document. Spans are grouped into lines, line
//! font sizes are clustered and ranked largest first, the title is taken from
//! the largest text on the first page, and lines set in a size larger than
//! body text become outline entries when they read like headings.
//!
//! Classification never fails: documents without usable structure produce an
//! empty outline.

mod filter;
mod font;
mod line;
mod options;
mod title;

pub use filter::is_heading_text;
pub use font::{FontRanking, SizeCluster};
pub use line::{group_lines, TextLine};
pub use options::ClassifyOptions;
pub use title::{clean_title, title_lines, title_text};

use crate::lang::LanguageModel;
use crate::model::{DocumentResult, OutlineEntry, TextSpan};

/// A line accepted as a heading, before it is written to the outline.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Heading text
    pub text: String,
    /// Page index (0-based)
    pub page: u32,
    /// Nesting level (1 = most prominent)
    pub level: u8,
    /// Font-size rank (0 = largest)
    pub rank: usize,
    /// Top edge on the page
    pub top: f32,
}

impl From<HeadingCandidate> for OutlineEntry {
    fn from(candidate: HeadingCandidate) -> Self {
        OutlineEntry::new(candidate.text, candidate.level, candidate.page)
    }
}

/// Classifies document lines into a title and an outline.
#[derive(Debug, Clone, Default)]
pub struct HeadingClassifier {
    options: ClassifyOptions,
}

impl HeadingClassifier {
    /// Create a classifier with the given thresholds.
    pub fn new(options: ClassifyOptions) -> Self {
        Self { options }
    }

    /// Get the classifier options.
    pub fn options(&self) -> &ClassifyOptions {
        &self.options
    }

    /// Extract the title and outline of a document.
    pub fn classify(
        &self,
        spans: &[TextSpan],
        language: &str,
        model: &LanguageModel,
    ) -> DocumentResult {
        let lines = group_lines(
            spans,
            self.options.baseline_tolerance,
            self.options.column_gap,
        );
        if lines.is_empty() {
            return DocumentResult::empty(language);
        }

        let ranking = FontRanking::from_lines(&lines, self.options.size_tolerance);
        ranking.log_histogram();

        if ranking.len() < 2 {
            return DocumentResult {
                title: clean_title(&lines[0].text()),
                outline: Vec::new(),
                language: language.to_string(),
            };
        }

        let title_idx = title_lines(&lines, &ranking);
        let title = title_text(&lines, &title_idx);
        log::info!("Selected title: {:?}", title);

        let candidates = self.candidates(&lines, &ranking, &title_idx, model);
        log::debug!(
            "Outline candidates: {:?}",
            candidates.iter().map(|c| c.text.as_str()).collect::<Vec<_>>()
        );

        DocumentResult {
            title,
            outline: candidates.into_iter().map(OutlineEntry::from).collect(),
            language: language.to_string(),
        }
    }

    /// Heading candidates in reading order.
    ///
    /// The largest size is reserved for the title when every line set in it
    /// belongs to the title; levels then start at the next size down.
    pub fn candidates(
        &self,
        lines: &[TextLine],
        ranking: &FontRanking,
        title_idx: &[usize],
        model: &LanguageModel,
    ) -> Vec<HeadingCandidate> {
        let Some(body_rank) = ranking.body_rank() else {
            return Vec::new();
        };

        let title_reserved = !title_idx.is_empty()
            && lines
                .iter()
                .enumerate()
                .filter(|(_, l)| ranking.rank_of(l.font_size) == Some(0))
                .all(|(i, _)| title_idx.contains(&i));
        let first_rank = usize::from(title_reserved);
        let max_levels = usize::from(self.options.max_heading_levels);

        log::debug!(
            "Body rank {}, title reserved: {}, heading ranks from {}",
            body_rank,
            title_reserved,
            first_rank
        );

        let mut candidates = Vec::new();
        for line in lines {
            let Some(rank) = ranking.rank_of(line.font_size) else {
                continue;
            };
            if rank < first_rank || rank >= body_rank {
                continue;
            }
            let level = rank - first_rank + 1;
            if level > max_levels {
                continue;
            }

            let text = line.text();
            if !is_heading_text(&text, line.is_bold(), model, &self.options) {
                continue;
            }

            candidates.push(HeadingCandidate {
                text,
                page: line.page,
                level: level as u8,
                rank,
                top: line.top,
            });
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ModelRegistry;
    use crate::model::{BoundingBox, ASCENT, DESCENT};

    fn span(text: &str, page: u32, baseline: f32, size: f32) -> TextSpan {
        span_at(text, page, 72.0, baseline, size)
    }

    fn span_at(text: &str, page: u32, x: f32, baseline: f32, size: f32) -> TextSpan {
        TextSpan::new(
            text,
            page,
            BoundingBox::new(
                x,
                baseline - size * ASCENT,
                x + text.chars().count() as f32 * size * 0.5,
                baseline + size * DESCENT,
            ),
            size,
            "Helvetica",
        )
    }

    fn classify(spans: &[TextSpan], lang: &str) -> DocumentResult {
        let registry = ModelRegistry::new();
        HeadingClassifier::default().classify(spans, lang, registry.get(lang))
    }

    const BODY: &str = "This sentence is ordinary body text that fills the page.";

    #[test]
    fn test_empty_document() {
        let result = classify(&[], "en");
        assert_eq!(result, DocumentResult::empty("en"));
    }

    #[test]
    fn test_single_size() {
        let spans = vec![
            span("First line of text", 0, 100.0, 12.0),
            span(BODY, 0, 120.0, 12.0),
        ];
        let result = classify(&spans, "en");
        assert_eq!(result.title, "First line of text");
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_title_rank_reserved() {
        let spans = vec![
            span("Annual Report", 0, 80.0, 24.0),
            span("Summary", 0, 140.0, 16.0),
            span(BODY, 0, 170.0, 12.0),
            span(BODY, 0, 190.0, 12.0),
        ];
        let result = classify(&spans, "en");
        assert_eq!(result.title, "Annual Report");
        assert_eq!(result.outline, vec![OutlineEntry::new("Summary", 1, 0)]);
    }

    #[test]
    fn test_title_spans_whole_size_cluster() {
        let spans = vec![
            span("Annual Report", 0, 80.0, 24.0),
            span("Fiscal Year Review", 0, 110.0, 23.5),
            span(BODY, 0, 150.0, 12.0),
            span(BODY, 0, 170.0, 12.0),
        ];
        let result = classify(&spans, "en");
        assert_eq!(result.title, "Annual Report Fiscal Year Review");
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_zero_size_tolerance_keeps_title() {
        let registry = ModelRegistry::new();
        let classifier = HeadingClassifier::new(ClassifyOptions::new().with_size_tolerance(0.0));
        let spans = vec![
            span("Application Form", 0, 80.0, 24.0),
            span(BODY, 0, 150.0, 12.0),
            span(BODY, 0, 170.0, 12.0),
        ];
        let result = classifier.classify(&spans, "en", registry.get("en"));
        assert_eq!(result.title, "Application Form");
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_heading_beside_other_column() {
        let spans = vec![
            span("Annual Report", 0, 80.0, 24.0),
            span_at("2. Methods", 0, 72.0, 200.0, 18.0),
            span_at(BODY, 0, 320.0, 198.0, 12.0),
            span_at(BODY, 0, 320.0, 212.0, 12.0),
        ];
        let result = classify(&spans, "en");
        assert_eq!(result.title, "Annual Report");
        assert_eq!(result.outline, vec![OutlineEntry::new("2. Methods", 1, 0)]);
    }

    #[test]
    fn test_headings_share_title_size() {
        let spans = vec![
            span("1. Overview", 0, 80.0, 18.0),
            span("1.1 Background", 0, 120.0, 14.0),
            span(BODY, 0, 150.0, 12.0),
            span("2. Methods", 1, 80.0, 18.0),
            span(BODY, 1, 110.0, 12.0),
        ];
        let result = classify(&spans, "en");
        assert_eq!(result.title, "1. Overview");
        assert_eq!(
            result.outline,
            vec![
                OutlineEntry::new("1. Overview", 1, 0),
                OutlineEntry::new("1.1 Background", 2, 0),
                OutlineEntry::new("2. Methods", 1, 1),
            ]
        );
    }

    #[test]
    fn test_level_limit() {
        let spans = vec![
            span("Title Page", 0, 40.0, 30.0),
            span("Part One", 0, 80.0, 24.0),
            span("Chapter One", 0, 110.0, 20.0),
            span("Section One", 0, 140.0, 16.0),
            span("Subsection One", 0, 170.0, 14.0),
            span(BODY, 0, 200.0, 12.0),
            span(BODY, 0, 220.0, 12.0),
        ];
        let result = classify(&spans, "en");
        let levels: Vec<u8> = result.outline.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![1, 2, 3]);
        assert!(result.outline.iter().all(|e| e.text != "Subsection One"));
    }

    #[test]
    fn test_prose_at_heading_size_is_rejected() {
        let spans = vec![
            span("Guide", 0, 40.0, 24.0),
            span("This large print sentence is really a pull quote.", 0, 80.0, 16.0),
            span("Scope", 0, 120.0, 16.0),
            span(BODY, 0, 150.0, 12.0),
            span(BODY, 0, 170.0, 12.0),
        ];
        let result = classify(&spans, "en");
        assert_eq!(result.outline, vec![OutlineEntry::new("Scope", 1, 0)]);
    }

    #[test]
    fn test_body_larger_than_headings_yields_no_outline() {
        let spans = vec![
            span("Poster", 0, 40.0, 12.0),
            span(BODY, 0, 80.0, 20.0),
        ];
        let result = classify(&spans, "en");
        assert!(result.outline.is_empty());
        assert_eq!(result.title, clean_title(BODY));
    }

    #[test]
    fn test_japanese_headings() {
        let spans = vec![
            span("年次報告書", 0, 40.0, 24.0),
            span("概要", 0, 80.0, 16.0),
            span("これは本文の文章です。本文は長く続きます。", 0, 110.0, 10.5),
            span("これは本文の文章です。本文は長く続きます。", 0, 130.0, 10.5),
        ];
        let result = classify(&spans, "ja");
        assert_eq!(result.title, "年次報告書");
        assert_eq!(result.outline, vec![OutlineEntry::new("概要", 1, 0)]);
        assert_eq!(result.language, "ja");
    }

    #[test]
    fn test_chinese_headings_use_caseless_profile() {
        let spans = vec![
            span("年度报告", 0, 40.0, 24.0),
            span("概述", 0, 80.0, 16.0),
            span("这是正文内容，介绍项目的主要进展和结果。", 0, 110.0, 10.5),
            span("这是正文内容，介绍项目的主要进展和结果。", 0, 130.0, 10.5),
        ];
        let result = classify(&spans, "zh");
        assert_eq!(result.title, "年度报告");
        assert_eq!(result.outline, vec![OutlineEntry::new("概述", 1, 0)]);
    }
}
