//! Advisory response parsing.
//!
//! Marker based: `SCORE:`, `REVIEW:` and `TIPS:` lines, matched
//! case-insensitively and tolerant of markdown decoration. Anything that
//! does not yield a complete advisory is a `ParseError`; there is no
//! half-parsed result.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Maximum score on the advisory scale
pub const MAX_RISK_SCORE: u8 = 10;

/// `**SCORE:** 9/10`, `## Review: ...`, `> TIPS: [...]`. List bullets are
/// not marker decoration: `- Review: ...` is a tip.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[\s*#>_]*(score|review|tips)[\s*_]*:[\s*_]*(.*)$").expect("valid marker regex")
});

/// `- tip`, `* tip`, `• tip`, `2. tip`, `3) tip`
static BULLET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+").expect("valid bullet regex")
});

static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid integer regex"));

/// Successfully parsed advisory text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAdvisory {
    pub risk_score: u8,
    pub review: String,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("response is empty")]
    Empty,

    #[error("no SCORE line")]
    MissingScore,

    #[error("SCORE line has no number: '{0}'")]
    InvalidScore(String),

    #[error("score {0} is outside 1-10")]
    ScoreOutOfRange(u64),

    #[error("no REVIEW text")]
    MissingReview,

    #[error("no TIPS")]
    MissingTips,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Score,
    Review,
    Tips,
}

/// Extract score, review and tips from the service's free text.
pub fn parse_advisory(text: &str) -> Result<ParsedAdvisory, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut score_text: Option<String> = None;
    let mut review: Vec<String> = Vec::new();
    let mut tips: Vec<String> = Vec::new();
    let mut seen: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;
    let mut inline_tips = false;

    for line in text.lines() {
        // Only the first occurrence of a marker opens its section
        if let Some((section, rest)) = split_marker(line).filter(|(s, _)| !seen.contains(s)) {
            match section {
                Section::Score => score_text = Some(rest),
                Section::Review => {
                    if !rest.is_empty() {
                        review.push(rest);
                    }
                }
                Section::Tips => {
                    tips.extend(split_inline_tips(&rest));
                    inline_tips = !tips.is_empty();
                }
            }
            seen.push(section);
            current = Some(section);
            continue;
        }

        match current {
            Some(Section::Review) => {
                let text = line.trim();
                if !text.is_empty() {
                    review.push(text.to_string());
                }
            }
            Some(Section::Tips) => {
                if line.trim().is_empty() {
                    // A blank line after the list closes it; trailing chatter is dropped
                    if !tips.is_empty() {
                        current = None;
                    }
                    continue;
                }

                let bulleted = BULLET_RE.is_match(line);
                if inline_tips && !bulleted {
                    current = None;
                    continue;
                }

                let tip = strip_bullet(line);
                if !tip.is_empty() {
                    tips.push(tip);
                }
            }
            _ => {}
        }
    }

    let score_text = score_text.ok_or(ParseError::MissingScore)?;
    let risk_score = parse_score(&score_text)?;

    let review = review.join(" ");
    if review.is_empty() {
        return Err(ParseError::MissingReview);
    }

    if tips.is_empty() {
        return Err(ParseError::MissingTips);
    }

    Ok(ParsedAdvisory {
        risk_score,
        review,
        tips,
    })
}

fn split_marker(line: &str) -> Option<(Section, String)> {
    let caps = MARKER_RE.captures(line)?;
    let section = match caps[1].to_ascii_lowercase().as_str() {
        "score" => Section::Score,
        "review" => Section::Review,
        _ => Section::Tips,
    };
    let rest = caps[2].trim().trim_end_matches(['*', '_']).trim().to_string();
    Some((section, rest))
}

/// First integer on the score line, which must fall in 1..=10
fn parse_score(text: &str) -> Result<u8, ParseError> {
    let digits = INTEGER_RE
        .find(text)
        .ok_or_else(|| ParseError::InvalidScore(text.to_string()))?;

    let value: u64 = digits
        .as_str()
        .parse()
        .map_err(|_| ParseError::InvalidScore(text.to_string()))?;

    if !(1..=u64::from(MAX_RISK_SCORE)).contains(&value) {
        return Err(ParseError::ScoreOutOfRange(value));
    }

    Ok(value as u8)
}

/// `[Tip 1, Tip 2]` on the marker line itself
fn split_inline_tips(rest: &str) -> Vec<String> {
    let inner = rest.trim().trim_start_matches('[').trim_end_matches(']');

    inner
        .split(',')
        .map(|tip| tip.trim().trim_matches('"').trim().to_string())
        .filter(|tip| !tip.is_empty())
        .collect()
}

fn strip_bullet(line: &str) -> String {
    let stripped = BULLET_RE.replace(line, "");
    stripped.trim().trim_matches(['*', '_']).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_format() {
        let text = "SCORE: 9/10\nREVIEW: Hypertension at 63 compounds risk.\nTIPS: [See a cardiologist, Stress test, Low-salt diet, Walk daily, Quit smoking]";
        let parsed = parse_advisory(text).unwrap();

        assert_eq!(parsed.risk_score, 9);
        assert_eq!(parsed.review, "Hypertension at 63 compounds risk.");
        assert_eq!(parsed.tips.len(), 5);
        assert_eq!(parsed.tips[0], "See a cardiologist");
        assert_eq!(parsed.tips[4], "Quit smoking");
    }

    #[test]
    fn test_parse_markdown_decoration() {
        let text = "Here is my assessment.\n\n**SCORE:** 8/10\n**REVIEW:** Elevated cholesterol.\n**TIPS:** Statin review, Lipid panel";
        let parsed = parse_advisory(text).unwrap();

        assert_eq!(parsed.risk_score, 8);
        assert_eq!(parsed.review, "Elevated cholesterol.");
        assert_eq!(parsed.tips, vec!["Statin review", "Lipid panel"]);
    }

    #[test]
    fn test_parse_multiline_sections() {
        let text = "score: 2 out of 10\nReview: Low risk profile.\nBlood pressure is normal.\nTips:\n- Keep exercising\n2. Annual check-up\n* Balanced diet";
        let parsed = parse_advisory(text).unwrap();

        assert_eq!(parsed.risk_score, 2);
        assert_eq!(parsed.review, "Low risk profile. Blood pressure is normal.");
        assert_eq!(parsed.tips, vec!["Keep exercising", "Annual check-up", "Balanced diet"]);
    }

    #[test]
    fn test_bullet_tip_keeps_commas() {
        let text = "SCORE: 3\nREVIEW: Fine.\nTIPS:\n- Reduce salt, sugar and fat";
        let parsed = parse_advisory(text).unwrap();
        assert_eq!(parsed.tips, vec!["Reduce salt, sugar and fat"]);
    }

    #[test]
    fn test_bulleted_marker_word_stays_a_tip() {
        let text = "SCORE: 8/10\nREVIEW: High risk.\nTIPS:\n- Stress test\n- Review: current medications with your GP\n- Low-salt diet";
        let parsed = parse_advisory(text).unwrap();

        assert_eq!(parsed.review, "High risk.");
        assert_eq!(
            parsed.tips,
            vec!["Stress test", "Review: current medications with your GP", "Low-salt diet"]
        );
    }

    #[test]
    fn test_repeated_marker_is_content() {
        let text = "SCORE: 8/10\nREVIEW: BP is high.\nReview: lipids in six weeks.\nTIPS:\n- Walk daily\n1. Score: under 2g sodium a day";
        let parsed = parse_advisory(text).unwrap();

        assert_eq!(parsed.risk_score, 8);
        assert_eq!(parsed.review, "BP is high. Review: lipids in six weeks.");
        assert_eq!(parsed.tips, vec!["Walk daily", "Score: under 2g sodium a day"]);
    }

    #[test]
    fn test_trailing_chatter_after_inline_tips_dropped() {
        let text = "SCORE: 9/10\nREVIEW: High risk.\nTIPS: [A, B, C, D, E]\n\n*Disclaimer: This is not a substitute for professional medical advice.*";
        let parsed = parse_advisory(text).unwrap();
        assert_eq!(parsed.tips, vec!["A", "B", "C", "D", "E"]);

        // No blank line: only bullets may continue an inline list
        let text = "SCORE: 9/10\nREVIEW: High risk.\nTIPS: [A, B]\n- C\n*Stay well!*";
        let parsed = parse_advisory(text).unwrap();
        assert_eq!(parsed.tips, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_blank_line_closes_bulleted_tips() {
        let text = "SCORE: 2/10\nREVIEW: Low risk.\nTIPS:\n\n- Keep exercising\n- Annual check-up\n\nLet me know if you need anything else.";
        let parsed = parse_advisory(text).unwrap();

        assert_eq!(parsed.tips, vec!["Keep exercising", "Annual check-up"]);
    }

    #[test]
    fn test_score_hint_not_enforced() {
        // A well-formed score outside the suggested band is kept as-is
        let parsed = parse_advisory("SCORE: 5/10\nREVIEW: Borderline.\nTIPS: Recheck").unwrap();
        assert_eq!(parsed.risk_score, 5);
    }

    #[test]
    fn test_missing_score() {
        let err = parse_advisory("REVIEW: Something.\nTIPS: A, B").unwrap_err();
        assert_eq!(err, ParseError::MissingScore);
    }

    #[test]
    fn test_score_without_number() {
        let err = parse_advisory("SCORE: high\nREVIEW: x\nTIPS: y").unwrap_err();
        assert!(matches!(err, ParseError::InvalidScore(_)));
    }

    #[test]
    fn test_score_out_of_range() {
        assert_eq!(
            parse_advisory("SCORE: 12/10\nREVIEW: x\nTIPS: y").unwrap_err(),
            ParseError::ScoreOutOfRange(12)
        );
        assert_eq!(
            parse_advisory("SCORE: 0/10\nREVIEW: x\nTIPS: y").unwrap_err(),
            ParseError::ScoreOutOfRange(0)
        );
    }

    #[test]
    fn test_huge_score_is_invalid_not_panic() {
        let err = parse_advisory("SCORE: 99999999999999999999999\nREVIEW: x\nTIPS: y").unwrap_err();
        assert!(matches!(err, ParseError::InvalidScore(_)));
    }

    #[test]
    fn test_missing_review_and_tips() {
        assert_eq!(
            parse_advisory("SCORE: 7\nTIPS: a").unwrap_err(),
            ParseError::MissingReview
        );
        assert_eq!(
            parse_advisory("SCORE: 7\nREVIEW: fine").unwrap_err(),
            ParseError::MissingTips
        );
        assert_eq!(
            parse_advisory("SCORE: 7\nREVIEW: fine\nTIPS: []").unwrap_err(),
            ParseError::MissingTips
        );
    }

    #[test]
    fn test_empty_response() {
        assert_eq!(parse_advisory("  \n ").unwrap_err(), ParseError::Empty);
    }

    #[test]
    fn test_free_text_without_markers() {
        let err = parse_advisory("I'm sorry, I can't help with medical questions.").unwrap_err();
        assert_eq!(err, ParseError::MissingScore);
    }
}
