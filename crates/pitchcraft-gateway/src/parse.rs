//! Extraction of the structured trailer from a review response.
//!
//! The two patterns are independent: a response with a readable feedback
//! block but a garbled score (or vice versa) still yields the half that
//! matched.

use std::sync::OnceLock;

use regex::Regex;

fn feedback_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?s)Feedback: "(.*?)""#).expect("feedback pattern"))
}

fn score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Score: (\d+)").expect("score pattern"))
}

/// The quoted feedback block, non-greedy, possibly spanning lines.
pub fn extract_feedback(content: &str) -> Option<String> {
    feedback_re()
        .captures(content)
        .map(|caps| caps[1].to_string())
}

/// The integer score. Absurdly long digit runs fail the parse and count
/// as no match.
pub fn extract_score(content: &str) -> Option<u32> {
    score_re()
        .captures(content)
        .and_then(|caps| caps[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_a_single_line_pair() {
        let content = "Feedback: \"Love the energy here.\"\nScore: 88";
        assert_eq!(
            extract_feedback(content).as_deref(),
            Some("Love the energy here.")
        );
        assert_eq!(extract_score(content), Some(88));
    }

    #[test]
    fn feedback_block_may_span_multiple_lines() {
        let content = "Feedback: \"Hey there, Rina here!\n\nThe headline sings.\n\"\nScore: 93";
        let feedback = extract_feedback(content).unwrap();
        assert!(feedback.starts_with("Hey there, Rina here!"));
        assert!(feedback.contains("The headline sings."));
    }

    #[test]
    fn non_greedy_stops_at_the_first_closing_quote() {
        let content = "Feedback: \"short\" trailing \"noise\"\nScore: 70";
        assert_eq!(extract_feedback(content).as_deref(), Some("short"));
    }

    #[test]
    fn either_half_may_be_missing() {
        assert_eq!(extract_feedback("Score: 42"), None);
        assert_eq!(extract_score("Feedback: \"fine\""), None);
        assert_eq!(extract_score("Score: ninety"), None);
    }

    #[test]
    fn overflowing_score_counts_as_no_match() {
        assert_eq!(extract_score("Score: 99999999999999999999"), None);
    }
}
