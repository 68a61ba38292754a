//! Content moderation heuristic.
//!
//! Scores free-text submissions against abuse, spam and threat pattern
//! sets plus a length floor. The outcome only routes a submission into the
//! approved or flagged queue; a human stays the final arbiter for
//! rejection, and this function never blocks a submission.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::ModerationStatus;

/// Diagnostic flag for abusive-language matches.
pub const FLAG_ABUSIVE: &str = "potentially_abusive";
/// Diagnostic flag for spam matches.
pub const FLAG_SPAM: &str = "potential_spam";
/// Diagnostic flag for threat matches. Always fails the pass rule.
pub const FLAG_THREAT: &str = "potential_threat";
/// Diagnostic flag for submissions under the length floor.
pub const FLAG_TOO_SHORT: &str = "too_short";

/// Minimum acceptable text length in characters.
const MIN_TEXT_LENGTH: usize = 20;

/// Minimum run of one repeated character counted as spam-like noise.
const CHAR_RUN_LENGTH: usize = 6;

lazy_static! {
    static ref INSULT_TERMS: Regex =
        Regex::new(r"(?i)\b(idiot|stupid|dumb|hate|terrible)\b").unwrap();
    static ref CAPS_RUN: Regex = Regex::new(r"[A-Z]{10,}").unwrap();
    static ref PROMO_TERMS: Regex =
        Regex::new(r"(?i)\b(buy now|click here|free money|winner)\b").unwrap();
    static ref URL_PATTERN: Regex = Regex::new(r"https?://\S+").unwrap();
    static ref THREAT_TERMS: Regex =
        Regex::new(r"(?i)\b(threat|kill|hurt|violence|attack)\b").unwrap();
}

/// Result of the moderation heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationOutcome {
    pub passed: bool,
    /// De-duplicated diagnostic flags, in trigger order.
    pub flags: Vec<String>,
    /// Quality score clamped to `[0, 100]`.
    pub score: i32,
}

impl ModerationOutcome {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Moderation status assigned at creation time.
    pub fn initial_status(&self) -> ModerationStatus {
        if self.passed {
            ModerationStatus::Approved
        } else {
            ModerationStatus::Flagged
        }
    }
}

/// `true` when the text contains a run of `CHAR_RUN_LENGTH` identical
/// characters. The regex crate has no backreferences, so this is a scan.
fn has_char_run(text: &str) -> bool {
    let mut last: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars() {
        if Some(c) == last {
            run += 1;
            if run >= CHAR_RUN_LENGTH {
                return true;
            }
        } else {
            last = Some(c);
            run = 1;
        }
    }
    false
}

/// Scores `text` (the combined subject and description).
///
/// Starts at 100. Each abusive pattern family triggered subtracts 20, each
/// spam family 30, the threat family 50, and a sub-minimum length 10. A
/// threat flag fails the pass rule outright regardless of the score.
pub fn moderate_content(text: &str) -> ModerationOutcome {
    let mut flags: Vec<String> = Vec::new();
    let mut score: i32 = 100;

    let flag = |flags: &mut Vec<String>, name: &str| {
        if !flags.iter().any(|f| f == name) {
            flags.push(name.to_string());
        }
    };

    // Abusive-language families: insult terms, caps runs, character spam.
    for matched in [
        INSULT_TERMS.is_match(text),
        CAPS_RUN.is_match(text),
        has_char_run(text),
    ] {
        if matched {
            flag(&mut flags, FLAG_ABUSIVE);
            score -= 20;
        }
    }

    // Spam families: promotional phrases, embedded URLs.
    for matched in [PROMO_TERMS.is_match(text), URL_PATTERN.is_match(text)] {
        if matched {
            flag(&mut flags, FLAG_SPAM);
            score -= 30;
        }
    }

    if THREAT_TERMS.is_match(text) {
        flag(&mut flags, FLAG_THREAT);
        score -= 50;
    }

    if text.chars().count() < MIN_TEXT_LENGTH {
        flag(&mut flags, FLAG_TOO_SHORT);
        score -= 10;
    }

    let score = score.clamp(0, 100);
    let passed = score >= 50 && !flags.iter().any(|f| f == FLAG_THREAT);

    ModerationOutcome {
        passed,
        flags,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_passes_at_full_score() {
        let outcome = moderate_content(
            "The west parking lot is poorly lit after evening shifts and feels unsafe to walk through.",
        );
        assert!(outcome.passed);
        assert_eq!(outcome.score, 100);
        assert!(outcome.flags.is_empty());
        assert_eq!(outcome.initial_status(), ModerationStatus::Approved);
    }

    #[test]
    fn test_short_text_flagged_too_short() {
        let outcome = moderate_content("Too short");
        assert!(outcome.has_flag(FLAG_TOO_SHORT));
        assert_eq!(outcome.score, 90);
        assert!(outcome.passed); // 90 >= 50, no threat
    }

    #[test]
    fn test_insult_terms_flag_abusive() {
        let outcome = moderate_content("This policy is stupid and the rollout was terrible.");
        assert!(outcome.has_flag(FLAG_ABUSIVE));
        // Two families would be two hits; here only the insult family fires.
        assert_eq!(outcome.score, 80);
        assert!(outcome.passed);
    }

    #[test]
    fn test_caps_run_flags_abusive() {
        let outcome = moderate_content("PLEASEFIXTHIS the cafeteria is always out of food.");
        assert!(outcome.has_flag(FLAG_ABUSIVE));
        assert_eq!(outcome.score, 80);
    }

    #[test]
    fn test_char_spam_flags_abusive() {
        let outcome = moderate_content("Fix the printer pleaseeeeeee it never works for anyone.");
        assert!(outcome.has_flag(FLAG_ABUSIVE));
        assert_eq!(outcome.score, 80);
    }

    #[test]
    fn test_abusive_flag_not_duplicated() {
        let outcome = moderate_content("STUPIDSTUPIDSTUPID policy is stupid aaaaaaaa everywhere.");
        let abusive = outcome.flags.iter().filter(|f| *f == FLAG_ABUSIVE).count();
        assert_eq!(abusive, 1);
        // All three abusive families fired: 100 - 60 = 40, below the floor.
        assert_eq!(outcome.score, 40);
        assert!(!outcome.passed);
    }

    #[test]
    fn test_url_flags_spam() {
        let outcome =
            moderate_content("Check out https://example.com/deal for the supplies we need.");
        assert!(outcome.has_flag(FLAG_SPAM));
        assert_eq!(outcome.score, 70);
    }

    #[test]
    fn test_promo_and_url_both_count() {
        let outcome = moderate_content("Buy now at https://spam.example.com before it is gone!");
        assert!(outcome.has_flag(FLAG_SPAM));
        assert_eq!(outcome.score, 40);
        assert!(!outcome.passed);
    }

    #[test]
    fn test_threat_always_fails_even_at_high_score() {
        let outcome = moderate_content(
            "Someone said they would hurt a colleague if the schedule does not change soon.",
        );
        assert!(outcome.has_flag(FLAG_THREAT));
        assert_eq!(outcome.score, 50);
        // 50 >= 50, but the threat flag overrides.
        assert!(!outcome.passed);
        assert_eq!(outcome.initial_status(), ModerationStatus::Flagged);
    }

    #[test]
    fn test_score_never_negative() {
        let outcome =
            moderate_content("STUPIDIDIOTSPAM kill buy now https://x.dev aaaaaaaa hate!!");
        assert_eq!(outcome.score, 0);
        assert!(!outcome.passed);
    }

    #[test]
    fn test_score_clamped_within_bounds() {
        for text in [
            "",
            "ok",
            "completely ordinary feedback about the coffee machine being broken again",
            "THREATKILLATTACK https://spam.dev buy now idiot aaaaaaaaaa",
        ] {
            let outcome = moderate_content(text);
            assert!((0..=100).contains(&outcome.score), "score out of range for {text:?}");
        }
    }

    #[test]
    fn test_empty_text_is_short_but_scores_90() {
        let outcome = moderate_content("");
        assert!(outcome.has_flag(FLAG_TOO_SHORT));
        assert_eq!(outcome.score, 90);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let outcome = moderate_content("this is a THREAT against the whole team apparently");
        assert!(outcome.has_flag(FLAG_THREAT));
        assert!(!outcome.passed);
    }

    #[test]
    fn test_has_char_run_boundaries() {
        assert!(!has_char_run("aaaaa")); // 5 repeats
        assert!(has_char_run("aaaaaa")); // 6 repeats
        assert!(has_char_run("xx aaaaaa yy"));
        assert!(!has_char_run("abcdef"));
        assert!(!has_char_run(""));
    }
}
