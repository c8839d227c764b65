//! ASCII table rendering for the post-load summary.

/// Render headers and rows as a bordered ASCII table with right-aligned
/// cells, column widths sized to the longest value plus padding.
pub fn render_ascii_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths = col_widths(headers, rows);
    let mut out = String::new();
    push_border(&mut out, &widths);
    push_row(&mut out, &widths, headers);
    push_border(&mut out, &widths);
    for row in rows {
        push_row(&mut out, &widths, row);
    }
    push_border(&mut out, &widths);
    out
}

fn col_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }
    widths.into_iter().map(|w| w + 3).collect()
}

fn push_border(out: &mut String, widths: &[usize]) {
    for w in widths {
        out.push('+');
        out.push_str(&"-".repeat(w - 1));
    }
    out.push_str("+\n");
}

fn push_row(out: &mut String, widths: &[usize], cells: &[String]) {
    for (w, cell) in widths.iter().zip(cells) {
        out.push_str(&format!("|{:>width$} ", cell, width = w - 2));
    }
    out.push_str("|\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_summary_table() {
        let headers = vec!["table".to_string(), "rows".to_string()];
        let rows = vec![
            vec!["industry".to_string(), "12".to_string()],
            vec!["jobs".to_string(), "804".to_string()],
        ];
        let rendered = render_ascii_table(&headers, &rows);
        let expected = "\
+----------+------+
|    table | rows |
+----------+------+
| industry |   12 |
|     jobs |  804 |
+----------+------+
";
        assert_eq!(rendered, expected);
    }
}
