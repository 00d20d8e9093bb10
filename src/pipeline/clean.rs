//! Text cleaning: the fixed whitespace transform that skill counts are
//! defined over.
//!
//! Rules run in this order and must not be "improved": counts are only
//! reproducible against exactly this output.
//!
//! 1. Replace every space with a line break
//! 2. Collapse every run of line breaks into a single line break
//! 3. Trim leading and trailing whitespace
//!
//! A side effect of rule 1 is that a multi-word label such as
//! `"machine learning"` can never match cleaned text.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_LINE_BREAK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// Apply the cleaning rules. Idempotent.
pub fn clean_text(input: &str) -> String {
    let s = spaces_to_line_breaks(input);
    let s = collapse_line_breaks(&s);
    s.trim().to_string()
}

fn spaces_to_line_breaks(input: &str) -> String {
    input.replace(' ', "\n")
}

fn collapse_line_breaks(input: &str) -> String {
    RE_LINE_BREAK_RUNS.replace_all(input, "\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_line_breaks() {
        assert_eq!(clean_text("Python SQL Tableau"), "Python\nSQL\nTableau");
    }

    #[test]
    fn runs_collapse_to_one_line_break() {
        assert_eq!(clean_text("a\n\nb"), "a\nb");
        assert_eq!(clean_text("a\n\n\n\nb"), "a\nb");
        assert_eq!(clean_text("a  \n b"), "a\nb");
    }

    #[test]
    fn edges_are_trimmed() {
        assert_eq!(clean_text("  \n\tPython \n "), "Python");
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let samples = [
            "Python  Python   SQL",
            "\n\n Senior Data  Analyst\n\n\nSQL\r\nExcel \t Tableau  ",
            "a\n\n\nb\n \n c",
            "",
        ];
        for s in samples {
            let once = clean_text(s);
            assert_eq!(clean_text(&once), once, "input: {s:?}");
        }
    }
}
