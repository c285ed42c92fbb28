//! Grouping spans into visual lines.

use crate::lang::is_spaceless_script_char;
use crate::model::TextSpan;

/// Spans on one page that share a baseline.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// The spans in this line, sorted by X position
    pub spans: Vec<TextSpan>,
    /// Page index (0-based)
    pub page: u32,
    /// Top edge of the tallest span
    pub top: f32,
    /// Leftmost X position
    pub x: f32,
    /// Dominant font size in this line
    pub font_size: f32,
}

impl TextLine {
    /// Create a new text line from spans.
    pub fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.bbox.x0.total_cmp(&b.bbox.x0));

        let page = spans.first().map_or(0, |s| s.page);
        let top = spans.iter().map(|s| s.top()).fold(f32::INFINITY, f32::min);
        let x = spans.first().map_or(0.0, |s| s.bbox.x0);

        // Dominant font size, weighted by character count
        let total_chars: usize = spans.iter().map(|s| s.text.chars().count()).sum();
        let weighted: f32 = spans
            .iter()
            .map(|s| s.font_size * s.text.chars().count() as f32)
            .sum();
        let font_size = if total_chars > 0 {
            weighted / total_chars as f32
        } else {
            spans.first().map_or(0.0, |s| s.font_size)
        };

        Self {
            spans,
            page,
            top: if top.is_finite() { top } else { 0.0 },
            x,
            font_size,
        }
    }

    /// Combined text of all spans, trimmed.
    ///
    /// Spans separated by a visible gap are joined with a space, except
    /// between glyphs of scripts written without word spaces.
    pub fn text(&self) -> String {
        let mut result = String::new();

        for (i, span) in self.spans.iter().enumerate() {
            if i > 0 {
                let prev = &self.spans[i - 1];
                let gap = span.bbox.x0 - prev.bbox.x1;

                let char_count = span.text.chars().count();
                let avg_char_width = if char_count > 0 && span.bbox.width() > 0.0 {
                    span.bbox.width() / char_count as f32
                } else {
                    span.font_size * 0.5
                };

                let both_spaceless = prev.text.chars().last().is_some_and(is_spaceless_script_char)
                    && span.text.chars().next().is_some_and(is_spaceless_script_char);
                let has_space = prev.text.ends_with(char::is_whitespace)
                    || span.text.starts_with(char::is_whitespace);

                if gap > avg_char_width * 0.2 && !both_spaceless && !has_space {
                    result.push(' ');
                }
            }
            result.push_str(&span.text);
        }

        result.trim().to_string()
    }

    /// Whether more than half of the characters are set in a bold font.
    pub fn is_bold(&self) -> bool {
        let bold: usize = self
            .spans
            .iter()
            .filter(|s| s.is_bold)
            .map(|s| s.text.chars().count())
            .sum();
        let total = self.char_count();
        total > 0 && bold * 2 > total
    }

    /// Number of non-whitespace characters.
    pub fn char_count(&self) -> usize {
        self.spans
            .iter()
            .map(|s| s.text.chars().filter(|c| !c.is_whitespace()).count())
            .sum()
    }
}

/// Group spans into lines and return them in reading order.
///
/// Spans on the same page whose baselines differ by at most
/// `tolerance × font size` share a baseline. A baseline is split into
/// separate lines wherever the horizontal gap between neighbouring spans
/// exceeds `column_gap` ems, so text from adjacent columns never merges.
/// Lines are ordered by page, then top edge, then left edge.
pub fn group_lines(spans: &[TextSpan], tolerance: f32, column_gap: f32) -> Vec<TextLine> {
    let mut spans: Vec<&TextSpan> = spans.iter().filter(|s| !s.is_blank()).collect();
    spans.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then(a.baseline().total_cmp(&b.baseline()))
            .then(a.bbox.x0.total_cmp(&b.bbox.x0))
    });

    let mut rows: Vec<Vec<TextSpan>> = Vec::new();
    let mut current_key: Option<(u32, f32)> = None;

    for span in spans {
        let y_tolerance = span.font_size * tolerance;

        let same_row = current_key.is_some_and(|(page, baseline)| {
            page == span.page && (span.baseline() - baseline).abs() <= y_tolerance
        });

        match rows.last_mut() {
            Some(row) if same_row => row.push(span.clone()),
            _ => {
                current_key = Some((span.page, span.baseline()));
                rows.push(vec![span.clone()]);
            }
        }
    }

    let mut lines: Vec<TextLine> = rows
        .into_iter()
        .flat_map(|row| split_columns(row, column_gap))
        .map(TextLine::from_spans)
        .collect();

    lines.retain(|l| !l.text().is_empty());
    lines.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then(a.top.total_cmp(&b.top))
            .then(a.x.total_cmp(&b.x))
    });

    log::debug!("Grouped spans into {} lines", lines.len());
    lines
}

/// Split the spans of one baseline at wide horizontal gaps.
fn split_columns(mut row: Vec<TextSpan>, column_gap: f32) -> Vec<Vec<TextSpan>> {
    row.sort_by(|a, b| a.bbox.x0.total_cmp(&b.bbox.x0));

    let mut segments: Vec<Vec<TextSpan>> = Vec::new();
    let mut right_edge = f32::NEG_INFINITY;
    let mut em = 0.0f32;

    for span in row {
        let gap = span.bbox.x0 - right_edge;
        let em_here = em.max(span.font_size);

        match segments.last_mut() {
            Some(segment) if gap <= column_gap * em_here => {
                right_edge = right_edge.max(span.bbox.x1);
                em = em_here;
                segment.push(span);
            }
            _ => {
                if !segments.is_empty() {
                    log::debug!("Column break before {:?} (gap {:.1}pt)", span.text, gap);
                }
                right_edge = span.bbox.x1;
                em = span.font_size;
                segments.push(vec![span]);
            }
        }
    }

    segments
}
