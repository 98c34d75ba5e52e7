//! Table and text layout helpers used by the CLI.
//! Keeps ANSI-aware width calculations, wrapping, and simple table rendering
//! in one place.

/// Render a simple text table. Column widths are auto-computed from the
/// widest cell (header or row) using display lengths that ignore ANSI color
/// codes.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let cols = headers.len();
    let mut widths: Vec<usize> =
        headers.iter().map(|h| display_len(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(display_len(cell));
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(headers, &widths));
    out.push('\n');
    out.push_str(&"=".repeat(display_len(&format_row(headers, &widths))));
    for row in rows {
        out.push('\n');
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (cell, width) in row.iter().zip(widths.iter()) {
        let plain_len = display_len(cell);
        parts.push(pad_field(cell, *width, plain_len));
    }
    parts.join(" | ")
}

/// Right-pad a field based on visible length (ignoring ANSI codes).
pub fn pad_field(display: &str, target: usize, plain_len: usize) -> String {
    let mut out = display.to_string();
    let padding = target.saturating_sub(plain_len);
    out.push_str(&" ".repeat(padding));
    out
}

/// Truncate text to a width, appending an ellipsis when needed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let len = text.chars().count();
    if len <= max_width {
        return text.to_string();
    }
    if max_width == 1 {
        return "…".to_string();
    }
    let mut out =
        text.chars().take(max_width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

/// Greedy word wrap. Words longer than the width land on their own line
/// untouched rather than being split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        if line.chars().count() + 1 + word.chars().count() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            out.push(line);
            line = word.to_string();
        }
    }
    if !line.is_empty() {
        out.push(line);
    }
    out
}

/// Compute visible length of a string, ignoring ANSI escape sequences.
pub fn display_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        len += 1;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_len_ignores_ansi() {
        assert_eq!(display_len("plain"), 5);
        assert_eq!(display_len("\x1b[1;38;2;1;2;3mtext\x1b[0m"), 4);
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("longer text", 7), "longer…");
        assert_eq!(truncate_with_ellipsis("anything", 0), "");
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn test_render_table_alignment() {
        let headers = vec!["Tag".to_string(), "Count".to_string()];
        let rows = vec![
            vec!["#news".to_string(), "3".to_string()],
            vec!["#rust".to_string(), "2".to_string()],
        ];
        let table = render_table(&headers, &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Tag"));
        assert!(lines[1].starts_with("="));
    }
}
