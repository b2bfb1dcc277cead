//! Normalization of free-text model responses into structured fields.
//!
//! These rules are deliberately crude and must stay byte-compatible with
//! existing stored records: the summary is a plain character cut, the
//! insight filter is a line-length heuristic, and the sentiment score is a
//! keyword match yielding one of exactly three values. Do not "improve"
//! them.

use sada_types::analysis::AnalysisType;

/// Maximum characters kept in the summary field.
pub const SUMMARY_MAX_CHARS: usize = 500;

/// Maximum number of key insights kept.
pub const MAX_KEY_INSIGHTS: usize = 5;

/// An insight line must be strictly longer than this after trimming.
pub const MIN_INSIGHT_CHARS: usize = 10;

/// Structured fields derived from one model response.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAnalysis {
    pub summary: String,
    pub key_insights: Vec<String>,
    pub sentiment_score: Option<f64>,
}

/// Derive all structured fields for the given analysis intent.
pub fn normalize_response(response: &str, analysis_type: AnalysisType) -> NormalizedAnalysis {
    NormalizedAnalysis {
        summary: truncate_summary(response),
        key_insights: extract_key_insights(response),
        sentiment_score: (analysis_type == AnalysisType::Sentiment)
            .then(|| score_sentiment(response)),
    }
}

/// First [`SUMMARY_MAX_CHARS`] characters of the response (character
/// positions, not bytes -- multibyte text must not be split).
pub fn truncate_summary(response: &str) -> String {
    response.chars().take(SUMMARY_MAX_CHARS).collect()
}

/// Response lines whose trimmed length exceeds [`MIN_INSIGHT_CHARS`],
/// trimmed, in order, first [`MAX_KEY_INSIGHTS`] only.
pub fn extract_key_insights(response: &str) -> Vec<String> {
    response
        .split('\n')
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_INSIGHT_CHARS)
        .take(MAX_KEY_INSIGHTS)
        .map(str::to_owned)
        .collect()
}

/// Keyword sentiment heuristic: "positive" anywhere in the lowercased
/// response wins over "negative"; anything else is neutral.
pub fn score_sentiment(response: &str) -> f64 {
    let lower = response.to_lowercase();
    if lower.contains("positive") {
        0.7
    } else if lower.contains("negative") {
        -0.7
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_summary_kept_verbatim() {
        assert_eq!(truncate_summary("Brief."), "Brief.");
    }

    #[test]
    fn test_summary_cut_at_500_chars() {
        let long = "x".repeat(800);
        let summary = truncate_summary(&long);
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS);
    }

    #[test]
    fn test_summary_cut_counts_chars_not_bytes() {
        let long = "é".repeat(600);
        let summary = truncate_summary(&long);
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS);
        assert!(summary.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_key_insights_filter_and_cap() {
        let response = "\
This document covers quarterly results.\n\
short line\n\
   Revenue grew twelve percent year over year.   \n\
\n\
Costs were flat despite headcount growth.\n\
Margins improved across all three regions.\n\
The outlook for next quarter remains strong.\n\
One more line that should be cut by the cap.";
        let insights = extract_key_insights(response);

        assert_eq!(insights.len(), MAX_KEY_INSIGHTS);
        assert_eq!(insights[0], "This document covers quarterly results.");
        // Leading/trailing whitespace is stripped before storage.
        assert_eq!(insights[1], "Revenue grew twelve percent year over year.");
        for insight in &insights {
            assert!(insight.trim().chars().count() > MIN_INSIGHT_CHARS);
        }
    }

    #[test]
    fn test_key_insights_drops_short_and_empty_lines() {
        let insights = extract_key_insights("ok\n\n  \nten chars!\nexactly_10\n");
        assert!(insights.is_empty());
    }

    #[test]
    fn test_line_of_exactly_eleven_chars_is_kept() {
        let insights = extract_key_insights("elevenchars");
        assert_eq!(insights, vec!["elevenchars".to_string()]);
    }

    #[test]
    fn test_sentiment_positive_keyword() {
        assert_eq!(score_sentiment("The tone is overwhelmingly Positive."), 0.7);
    }

    #[test]
    fn test_sentiment_negative_keyword() {
        assert_eq!(score_sentiment("a NEGATIVE review"), -0.7);
    }

    #[test]
    fn test_sentiment_positive_wins_over_negative() {
        assert_eq!(score_sentiment("positive and negative aspects"), 0.7);
    }

    #[test]
    fn test_sentiment_neutral_fallback() {
        assert_eq!(score_sentiment("the document is factual"), 0.0);
    }

    #[test]
    fn test_score_is_always_one_of_three_values() {
        for text in ["positive", "negative", "meh", "", "POSITIVE NEGATIVE"] {
            let score = score_sentiment(text);
            assert!([0.7, -0.7, 0.0].contains(&score), "unexpected score {score}");
        }
    }

    #[test]
    fn test_normalize_skips_sentiment_for_other_intents() {
        let normalized = normalize_response("a positive document", AnalysisType::Summary);
        assert!(normalized.sentiment_score.is_none());
    }

    #[test]
    fn test_normalize_sentiment_intent() {
        let normalized = normalize_response(
            "Overall the sentiment is positive.\nCustomers praise the product repeatedly.",
            AnalysisType::Sentiment,
        );
        assert_eq!(normalized.sentiment_score, Some(0.7));
        assert_eq!(normalized.key_insights.len(), 2);
        assert!(normalized.summary.starts_with("Overall"));
    }
}
