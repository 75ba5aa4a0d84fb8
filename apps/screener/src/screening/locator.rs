//! Occurrence Locator — case-insensitive, non-overlapping skill search with
//! per-line context windows.

use serde::Serialize;

use crate::screening::extract::StructuredText;

/// One match of a skill inside a single line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occurrence {
    pub line_number: usize,
    pub estimated_page: usize,
    /// The match plus up to `radius` characters either side, clipped to the line.
    pub context: String,
}

/// Finds every occurrence of `skill` in `text`, in line order then left to right.
/// An empty (or whitespace-only) skill never matches.
pub fn find_occurrences(text: &StructuredText, skill: &str, radius: usize) -> Vec<Occurrence> {
    let needle = fold(skill);
    if needle.chars.is_empty() || skill.trim().is_empty() {
        return Vec::new();
    }

    let mut found = Vec::new();
    for line in &text.lines {
        let original: Vec<char> = line.content.chars().collect();
        let haystack = fold(&line.content);

        for (start, end) in match_spans(&haystack, &needle.chars) {
            let from = start.saturating_sub(radius);
            let to = (end + radius).min(original.len());
            found.push(Occurrence {
                line_number: line.line_number,
                estimated_page: line.estimated_page,
                context: original[from..to].iter().collect(),
            });
        }
    }
    found
}

/// Lowercased characters with, for each one, the index of the source character
/// it came from. Some characters lowercase to several, so the two differ in length.
struct Folded {
    chars: Vec<char>,
    origin: Vec<usize>,
}

fn fold(s: &str) -> Folded {
    let mut chars = Vec::with_capacity(s.len());
    let mut origin = Vec::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        for lower in c.to_lowercase() {
            chars.push(lower);
            origin.push(i);
        }
    }
    Folded { chars, origin }
}

/// Spans of `needle` in `haystack`, as `[start, end)` indices into the original
/// (unfolded) characters. Scanning resumes after each match, so spans never overlap.
fn match_spans(haystack: &Folded, needle: &[char]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let n = needle.len();
    if n == 0 || haystack.chars.len() < n {
        return spans;
    }

    let mut pos = 0;
    while pos + n <= haystack.chars.len() {
        if haystack.chars[pos..pos + n] == *needle {
            spans.push((haystack.origin[pos], haystack.origin[pos + n - 1] + 1));
            pos += n;
        } else {
            pos += 1;
        }
    }
    spans
}
