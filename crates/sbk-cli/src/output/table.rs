/// Narrowest a column is ever squeezed to.
const MIN_WIDTH: usize = 6;

/// Usable terminal width from `COLUMNS`, if it is set and sensible.
#[must_use]
pub fn terminal_width() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40)
}

/// Render an aligned plain-text table. Numeric cells are right-aligned.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_WIDTH])
                .max()
                .unwrap_or(MIN_WIDTH)
        })
        .collect();
    if let Some(max_width) = max_width {
        shrink(&mut widths, max_width);
    }

    let header_line = line(headers.iter().copied(), &widths);
    let divider = "-".repeat(header_line.chars().count());
    let mut lines = vec![header_line, divider];
    for row in rows {
        let cells = (0..widths.len()).map(|i| row.get(i).map_or("-", String::as_str));
        lines.push(line(cells, &widths));
    }
    lines.join("\n")
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| pad(&truncate(cell, *width), *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Take one character at a time from the widest column until the table fits.
fn shrink(widths: &mut [usize], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(_, w)| **w > MIN_WIDTH)
            .max_by_key(|(_, w)| **w)
            .map(|(i, _)| i);
        let Some(i) = widest else {
            break;
        };
        widths[i] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
}

fn pad(value: &str, width: usize) -> String {
    let fill = width.saturating_sub(value.chars().count());
    if looks_numeric(value) {
        format!("{}{value}", " ".repeat(fill))
    } else {
        format!("{value}{}", " ".repeat(fill))
    }
}

#[cfg(test)]
mod tests {
    use super::render;
    use pretty_assertions::assert_eq;

    #[test]
    fn columns_align_and_numbers_right_justify() {
        let rows = vec![
            vec!["BRG-1".to_string(), "28360.00".to_string()],
            vec!["RES-22".to_string(), "5.00".to_string()],
        ];
        let table = render(&["code", "total"], &rows, None);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[3].ends_with("    5.00"));
        assert_eq!(lines[2].find("28360.00"), lines[0].find("total"));
    }

    #[test]
    fn narrow_terminal_truncates_wide_cells() {
        let rows = vec![vec!["x".repeat(80), "short".to_string()]];
        let table = render(&["notes", "name"], &rows, Some(40));
        assert!(table.lines().all(|line| line.chars().count() <= 40));
        assert!(table.contains('…'));
    }
}
