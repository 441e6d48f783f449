/// Tokens read as a missing numeric cell.
const MISSING_TOKENS: [&str; 4] = ["", "?", "NA", "NaN"];

#[inline]
pub fn strip_surrounding_quotes(s: &str) -> &str {
    let b = s.as_bytes();
    if b.len() >= 2 {
        let first = b[0];
        let last = b[b.len() - 1];
        if first == last && (first == b'\'' || first == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Splits one CSV line on commas, keeping quoted sections (and their
/// quotes) intact. Cells are trimmed; a trailing empty cell is kept.
pub fn split_csv_preserving_quotes(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes: Option<char> = None;

    for ch in line.chars() {
        match in_quotes {
            Some(q) => {
                if ch == q {
                    in_quotes = None;
                }
                cur.push(ch);
            }
            None if ch == '"' || ch == '\'' => {
                in_quotes = Some(ch);
                cur.push(ch);
            }
            None if ch == ',' => {
                out.push(cur.trim().to_string());
                cur.clear();
            }
            None => cur.push(ch),
        }
    }
    out.push(cur.trim().to_string());
    out
}

/// Parses a numeric cell.
///
/// `Some(NaN)` for a missing marker, `None` when the cell is not numeric.
pub fn parse_numeric_cell(cell: &str) -> Option<f64> {
    let cell = strip_surrounding_quotes(cell.trim()).trim();
    if MISSING_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(cell)) {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_quotes_works() {
        assert_eq!(strip_surrounding_quotes("'a,b'"), "a,b");
        assert_eq!(strip_surrounding_quotes(r#""x""#), "x");
        assert_eq!(strip_surrounding_quotes(r#""x'"#), r#""x'"#);
        assert_eq!(strip_surrounding_quotes("nq"), "nq");
    }

    #[test]
    fn split_preserving_quotes() {
        let line = r#"'sunny',85,"8,5",FALSE,no"#;
        let p = split_csv_preserving_quotes(line);
        assert_eq!(p, vec!["'sunny'", "85", "\"8,5\"", "FALSE", "no"]);
    }

    #[test]
    fn split_keeps_trailing_empty_cell() {
        assert_eq!(split_csv_preserving_quotes("1,2,"), vec!["1", "2", ""]);
    }

    #[test]
    fn numeric_cells() {
        assert_eq!(parse_numeric_cell(" 3.5 "), Some(3.5));
        assert_eq!(parse_numeric_cell("\"-2\""), Some(-2.0));
        assert!(parse_numeric_cell("?").unwrap().is_nan());
        assert!(parse_numeric_cell("").unwrap().is_nan());
        assert!(parse_numeric_cell("na").unwrap().is_nan());
        assert_eq!(parse_numeric_cell("red"), None);
    }
}
