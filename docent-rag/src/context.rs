//! Formatting retrieved documents into a prompt block.
//!
//! Each document becomes one line `data<rank>: <text>//`, where `rank` is the
//! 1-based position in the result (not a document id). Line breaks inside a
//! document are folded into spaces, so the line break is the entry boundary.
//! A `//` inside the text (a URL, say) is not escaped and is not a boundary.

use crate::document::SearchResult;

/// Format search results as the context block of a grounded prompt.
///
/// Returns an empty string when `results` is empty.
pub fn format_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| format!("data{}: {}//", i + 1, single_line(&result.document.text)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn single_line(text: &str) -> String {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn result(text: &str, distance: f32) -> SearchResult {
        SearchResult { document: Document::artwork("id", text), distance }
    }

    #[test]
    fn test_three_results_three_lines_in_rank_order() {
        let results = vec![result("first", 0.1), result("second", 0.2), result("third", 0.3)];
        let context = format_context(&results);

        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(lines, vec!["data1: first//", "data2: second//", "data3: third//"]);
    }

    #[test]
    fn test_empty_results_empty_context() {
        assert_eq!(format_context(&[]), "");
    }

    #[test]
    fn test_multiline_text_is_folded() {
        let context = format_context(&[result("Oil on poplar.\n\n  Louvre, Paris.  \n", 0.0)]);
        assert_eq!(context, "data1: Oil on poplar. Louvre, Paris.//");
    }

    #[test]
    fn test_rank_not_id() {
        let results = vec![
            SearchResult { document: Document::artwork("42", "a"), distance: 0.0 },
            SearchResult { document: Document::auxiliary("7", "b"), distance: 1.0 },
        ];
        assert_eq!(format_context(&results), "data1: a//\ndata2: b//");
    }

    #[test]
    fn test_slashes_in_text_stay_on_one_line() {
        let results = vec![
            result("See https://www.louvre.fr // Salle des États", 0.0),
            result("second", 0.1),
        ];
        let context = format_context(&results);

        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(
            lines,
            vec!["data1: See https://www.louvre.fr // Salle des États//", "data2: second//"]
        );
    }
}
