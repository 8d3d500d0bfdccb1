//! Text helpers for help output: doc string trimming and column layout.

use unicode_width::UnicodeWidthStr;

/// Trim a doc string for display.
///
/// Tabs become spaces, the first line is stripped, the common indentation
/// of the remaining lines is removed, and leading/trailing blank lines are
/// dropped.
pub fn trim_docstring(doc: &str) -> String {
    if doc.is_empty() {
        return String::new();
    }
    let expanded = doc.replace('\t', "        ");
    let lines: Vec<&str> = expanded.lines().collect();

    // Indentation is counted in chars; multi-byte whitespace is one column.
    let indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim_start().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min();

    let mut trimmed: Vec<&str> = Vec::with_capacity(lines.len());
    trimmed.push(lines.first().map(|l| l.trim()).unwrap_or_default());
    if let Some(indent) = indent {
        for line in lines.iter().skip(1) {
            let start = line.char_indices().nth(indent).map_or(line.len(), |(i, _)| i);
            trimmed.push(line[start..].trim_end());
        }
    }

    while trimmed.last().is_some_and(|l| l.is_empty()) {
        trimmed.pop();
    }
    let start = trimmed
        .iter()
        .position(|l| !l.is_empty())
        .unwrap_or(trimmed.len());
    trimmed[start..].join("\n")
}

/// Lay out `items` in as few rows as fit within `display_width` columns.
///
/// Items fill columns top to bottom; columns are separated by two spaces.
/// Each output row ends with a newline.
pub fn columnize(items: &[String], display_width: usize) -> String {
    if items.is_empty() {
        return "<empty>\n".to_string();
    }
    if items.len() == 1 {
        return format!("{}\n", items[0]);
    }

    let size = items.len();
    let mut layout = None;
    for nrows in 1..size {
        let ncols = size.div_ceil(nrows);
        let mut colwidths = Vec::with_capacity(ncols);
        let mut total: isize = -2;
        for col in 0..ncols {
            let width = (0..nrows)
                .map(|row| row + nrows * col)
                .take_while(|&i| i < size)
                .map(|i| items[i].width())
                .max()
                .unwrap_or(0);
            colwidths.push(width);
            total += width as isize + 2;
            if total > display_width as isize {
                break;
            }
        }
        if total <= display_width as isize {
            layout = Some((nrows, ncols, colwidths));
            break;
        }
    }
    let (nrows, ncols, colwidths) = layout.unwrap_or((size, 1, vec![0]));

    let mut out = String::new();
    for row in 0..nrows {
        let mut texts: Vec<&str> = (0..ncols)
            .map(|col| items.get(row + nrows * col).map_or("", String::as_str))
            .collect();
        while texts.last().is_some_and(|t| t.is_empty()) {
            texts.pop();
        }
        let cells: Vec<String> = texts
            .iter()
            .enumerate()
            .map(|(col, text)| pad_to(text, colwidths.get(col).copied().unwrap_or(0)))
            .collect();
        out.push_str(&cells.join("  "));
        out.push('\n');
    }
    out
}

fn pad_to(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}
