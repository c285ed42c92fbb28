//! Title selection.

use crate::lang::{collapse_repeated_letters, collapse_whitespace, dedup_adjacent_words};

use super::font::FontRanking;
use super::line::TextLine;

/// Indices of the lines that make up the title.
///
/// These are the lines on the first page that fall in the same size cluster
/// as the largest text on that page, in reading order.
pub fn title_lines(lines: &[TextLine], ranking: &FontRanking) -> Vec<usize> {
    let first_page: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.page == 0)
        .map(|(i, _)| i)
        .collect();

    let Some(max_size) = first_page
        .iter()
        .map(|&i| lines[i].font_size)
        .max_by(f32::total_cmp)
    else {
        return Vec::new();
    };
    let Some(title_rank) = ranking.rank_of(max_size) else {
        return Vec::new();
    };

    first_page
        .into_iter()
        .filter(|&i| ranking.rank_of(lines[i].font_size) == Some(title_rank))
        .collect()
}

/// Clean up extracted title text.
///
/// Collapses faux-bold letter runs and whitespace, then drops words that
/// repeat the word before them.
pub fn clean_title(raw: &str) -> String {
    let text = collapse_repeated_letters(raw);
    let text = collapse_whitespace(&text);
    dedup_adjacent_words(&text)
}

/// Join and clean the given lines.
pub fn title_text(lines: &[TextLine], indices: &[usize]) -> String {
    let joined = indices
        .iter()
        .map(|&i| lines[i].text())
        .collect::<Vec<_>>()
        .join(" ");
    clean_title(&joined)
}
