//! Text normalizer: joins decoded pages into one document string.
//!
//! Line boundaries survive normalization because the segmenter and the
//! line-anchored extractors depend on them. Within a line, whitespace runs
//! collapse to a single space; runs of blank lines collapse to one.

/// Joins pages with a blank line and normalizes whitespace.
///
/// Returns `None` when the result is blank; the pipeline treats that as a
/// fatal empty document.
pub fn normalize_pages(pages: &[String]) -> Option<String> {
    let joined = pages
        .iter()
        .map(|page| normalize_page(page))
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    if joined.trim().is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn normalize_page(page: &str) -> String {
    let unified = page.replace("\r\n", "\n").replace(['\r', '\x0c'], "\n");

    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = true;
    for raw_line in unified.split('\n') {
        let line = collapse_inline_whitespace(raw_line);
        let blank = line.is_empty();
        if blank && previous_blank {
            continue;
        }
        lines.push(line);
        previous_blank = blank;
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

fn collapse_inline_whitespace(line: &str) -> String {
    line.split(|c: char| c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pages_joined_with_blank_line() {
        let text = normalize_pages(&pages(&["first page", "second page"])).unwrap();
        assert_eq!(text, "first page\n\nsecond page");
    }

    #[test]
    fn test_inline_whitespace_collapsed() {
        let text = normalize_pages(&pages(&["John \t  Smith\u{a0}\u{a0}Jr"])).unwrap();
        assert_eq!(text, "John Smith Jr");
    }

    #[test]
    fn test_line_breaks_preserved() {
        let text = normalize_pages(&pages(&["John Smith\r\njohn@example.com\rSkills"])).unwrap();
        assert_eq!(text, "John Smith\njohn@example.com\nSkills");
    }

    #[test]
    fn test_blank_line_runs_collapsed() {
        let text = normalize_pages(&pages(&["\n\nExperience\n\n\n\n   \nEducation\n\n"])).unwrap();
        assert_eq!(text, "Experience\n\nEducation");
    }

    #[test]
    fn test_blank_pages_skipped() {
        let text = normalize_pages(&pages(&["one", "   \n  ", "two"])).unwrap();
        assert_eq!(text, "one\n\ntwo");
    }

    #[test]
    fn test_whitespace_only_is_none() {
        assert!(normalize_pages(&pages(&["  \n\t", "\x0c"])).is_none());
        assert!(normalize_pages(&[]).is_none());
    }
}
