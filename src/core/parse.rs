//! Parsing of free-text fields into structured entries

use serde::Serialize;

/// A named author
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
}

/// A labelled link parsed from a `label | uri` line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEntry {
    pub label: String,
    pub uri: String,
}

/// Parse authors separated by newlines or semicolons
///
/// Names are trimmed and empty entries dropped.
pub fn parse_authors(input: &str) -> Vec<Author> {
    input
        .split(['\n', ';'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| Author {
            name: name.to_string(),
        })
        .collect()
}

/// Parse one reference per line in the form `label | uri`
///
/// Without a pipe the label doubles as the uri. Text after a second pipe is
/// ignored. Entries with an empty label or uri are dropped.
pub fn parse_references(input: &str) -> Vec<ReferenceEntry> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut parts = line.split('|');
            let label = parts.next().unwrap_or_default().trim();
            let uri = parts.next().map(str::trim).unwrap_or(label);
            if label.is_empty() || uri.is_empty() {
                None
            } else {
                Some(ReferenceEntry {
                    label: label.to_string(),
                    uri: uri.to_string(),
                })
            }
        })
        .collect()
}

/// Parse the leading decimal integer of a value
///
/// Surrounding whitespace and an optional sign are accepted; anything after
/// the digits is ignored, so `"3.5"` reads as 3. `None` when no digit leads.
pub fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}

/// Parse a tally: leading integer, accepted only when >= 0
pub fn parse_tally(input: &str) -> Option<u64> {
    leading_integer(input).and_then(|n| u64::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_authors_mixed_separators() {
        let authors = parse_authors("Alice Smith; Bob Jones\nCarol Lee");
        let names: Vec<_> = authors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Alice Smith", "Bob Jones", "Carol Lee"]);
    }

    #[test]
    fn test_parse_authors_drops_empties() {
        assert!(parse_authors("").is_empty());
        assert!(parse_authors(" ;\n ; ").is_empty());
        assert_eq!(parse_authors(";;Dana;;").len(), 1);
    }

    #[test]
    fn test_parse_references_with_and_without_pipe() {
        let refs = parse_references("Article 1 | https://example.org/1\nArticle 2");
        assert_eq!(
            refs,
            vec![
                ReferenceEntry {
                    label: "Article 1".into(),
                    uri: "https://example.org/1".into()
                },
                ReferenceEntry {
                    label: "Article 2".into(),
                    uri: "Article 2".into()
                },
            ]
        );
    }

    #[test]
    fn test_parse_references_drops_incomplete_lines() {
        let refs = parse_references("| https://no-label.org\nNo uri |\n\n  \nOk | u");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].label, "Ok");
    }

    #[test]
    fn test_parse_references_ignores_extra_pipes() {
        let refs = parse_references("A | b | c");
        assert_eq!(refs[0].uri, "b");
    }

    #[test]
    fn test_parse_references_crlf() {
        let refs = parse_references("A | a\r\nB | b\r\n");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].uri, "a");
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer(" 42"), Some(42));
        assert_eq!(leading_integer("+5"), Some(5));
        assert_eq!(leading_integer("-3.5"), Some(-3));
        assert_eq!(leading_integer("--3"), None);
        assert_eq!(leading_integer("-"), None);
        assert_eq!(leading_integer(".5"), None);
        assert_eq!(leading_integer("99999999999999999999"), None);
    }

    #[test]
    fn test_parse_tally() {
        assert_eq!(parse_tally(" 7 "), Some(7));
        assert_eq!(parse_tally("0"), Some(0));
        assert_eq!(parse_tally("-1"), None);
        assert_eq!(parse_tally("seven"), None);
        assert_eq!(parse_tally("3.5"), Some(3));
        assert_eq!(parse_tally("12 votes"), Some(12));
        assert_eq!(parse_tally(""), None);
    }
}
