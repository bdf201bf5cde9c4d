//! Draft validation rules.
//!
//! Rules run in a fixed order and short-circuit on the first violation,
//! returned as a single human-readable message. Everything here is local;
//! a draft that fails validation never reaches the network. The clock is
//! passed in explicitly so tests can pin it.

use std::collections::HashSet;

use jiff::civil;
use once_cell::sync::Lazy;
use regex::Regex;
use unicase::UniCase;

use crate::draft::{EventDraft, PollDraft, combine_date_time};
use crate::error::{BrightError, Result};

pub const EVENT_TITLE_MIN: usize = 5;
pub const EVENT_TITLE_MAX: usize = 20;
pub const EVENT_DESCRIPTION_MAX: usize = 200;
pub const EVENT_YEAR_MIN: i16 = 2024;
pub const EVENT_YEAR_MAX: i16 = 2030;

pub const POLL_QUESTION_MIN: usize = 10;
pub const POLL_QUESTION_MAX: usize = 50;
pub const POLL_DESCRIPTION_MAX: usize = 100;
pub const POLL_MIN_OPTIONS: usize = 2;

/// Minimum options on a multiple-choice question.
pub const CHOICE_MIN_OPTIONS: usize = 2;
/// Minimum characters per option, for events and polls alike.
pub const OPTION_MIN_CHARS: usize = 2;

/// A single emoji-class grapheme cluster: base emoji codepoint, optional
/// skin-tone modifier or VS-16, optional ZWJ continuations.
static EMOJI_CLUSTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^\p{Emoji}(?:\p{Emoji_Modifier}|\x{FE0F})?",
        r"(?:\x{200D}\p{Emoji}(?:\p{Emoji_Modifier}|\x{FE0F})?)*$",
    ))
    .unwrap()
});

/// Bare digits carry the Emoji property, and lone regex metacharacters
/// slip through some emoji keyboards; both are rejected outright.
static DIGIT_OR_REGEX_META: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]$|[.*+?^${}()|\[\]\\]").unwrap());

pub(crate) fn is_valid_emoji(s: &str) -> bool {
    EMOJI_CLUSTER.is_match(s) && !DIGIT_OR_REGEX_META.is_match(s)
}

fn rule_violation(message: &str) -> BrightError {
    BrightError::Validation(message.to_string())
}

/// Check an event draft against every rule, returning the first
/// violation. `now` is the caller's current civil datetime.
pub fn validate_event(draft: &EventDraft, now: civil::DateTime) -> Result<()> {
    if draft.description.is_empty()
        || draft.address.is_empty()
        || draft.emoji.is_empty()
        || draft.region.is_none()
        || draft.paid_by_brightest.is_none()
        || draft.start_date.is_empty()
        || draft.start_time.is_empty()
        || draft.title.is_empty()
    {
        return Err(rule_violation("Please fill in all required fields."));
    }

    if !draft.end_date.is_empty() && draft.end_time.is_empty() {
        return Err(rule_violation(
            "Please fill in the end time or remove the end date.",
        ));
    }

    let title_len = draft.title.chars().count();
    if title_len < EVENT_TITLE_MIN || title_len > EVENT_TITLE_MAX {
        return Err(rule_violation(
            "Event title must be between 5 and 20 characters.",
        ));
    }

    let description_len = draft.description.chars().count();
    if description_len < 1 || description_len > EVENT_DESCRIPTION_MAX {
        return Err(rule_violation(
            "Event description must be between 1 and 200 characters.",
        ));
    }

    if !is_valid_emoji(&draft.emoji) {
        return Err(rule_violation(
            "Please enter a valid emoji without numbers or special characters.",
        ));
    }

    match draft.start_date.parse::<civil::Date>() {
        Ok(d) if (EVENT_YEAR_MIN..=EVENT_YEAR_MAX).contains(&d.year()) => {}
        _ => {
            return Err(rule_violation(
                "Please enter a valid year between 2024 and 2030.",
            ));
        }
    }

    let start = match combine_date_time(&draft.start_date, &draft.start_time) {
        Some(dt) => dt,
        None => {
            return Err(rule_violation(
                "Invalid start time. Use 00:00 for midnight, not 24:00.",
            ));
        }
    };

    if !draft.end_date.is_empty() && !draft.end_time.is_empty() {
        match draft.end_date.parse::<civil::Date>() {
            Ok(d) if (EVENT_YEAR_MIN..=EVENT_YEAR_MAX).contains(&d.year()) => {}
            _ => {
                return Err(rule_violation(
                    "Please enter a valid end year between 2024 and 2030.",
                ));
            }
        }

        let end = match combine_date_time(&draft.end_date, &draft.end_time) {
            Some(dt) => dt,
            None => {
                return Err(rule_violation(
                    "Invalid end time. Use 00:00 for midnight, not 24:00.",
                ));
            }
        };

        if end < start {
            return Err(rule_violation(
                "End date/time cannot be earlier than start date/time.",
            ));
        }
    }

    if draft.address.chars().count() < 2 {
        return Err(rule_violation("Please provide a valid address."));
    }

    if start < now {
        return Err(rule_violation("The selected date must be in the future."));
    }

    let mut seen_questions = HashSet::new();

    for question in &draft.questions {
        let trimmed = question.question.trim();

        if trimmed.is_empty() {
            return Err(rule_violation("Please fill in all questions."));
        }

        if !seen_questions.insert(UniCase::new(trimmed).to_folded_case()) {
            return Err(rule_violation("Duplicate questions are not allowed."));
        }

        if question.multiple_choice {
            if question.options.len() < CHOICE_MIN_OPTIONS {
                return Err(rule_violation(
                    "Each multiple choice question must have at least two options.",
                ));
            }

            for option in &question.options {
                if option.is_empty() {
                    return Err(rule_violation("Please fill in all options."));
                }
                if option.chars().count() < OPTION_MIN_CHARS {
                    return Err(rule_violation(
                        "Option length must be 2 characters or more.",
                    ));
                }
            }
        }
    }

    Ok(())
}

/// Check a poll draft against every rule, returning the first violation.
pub fn validate_poll(draft: &PollDraft, now: civil::DateTime) -> Result<()> {
    if draft.question.is_empty() || draft.region.is_none() || draft.end_date.is_empty() {
        return Err(rule_violation("Please fill in all required fields."));
    }

    let question_len = draft.question.chars().count();
    if question_len < POLL_QUESTION_MIN || question_len > POLL_QUESTION_MAX {
        return Err(rule_violation(
            "Poll question must be between 10 and 50 characters.",
        ));
    }

    if draft.description.chars().count() > POLL_DESCRIPTION_MAX {
        return Err(rule_violation(
            "Poll description must be 100 characters or fewer.",
        ));
    }

    if draft.options.len() < POLL_MIN_OPTIONS {
        return Err(rule_violation("A poll must have at least two options."));
    }

    for option in &draft.options {
        let trimmed = option.trim();
        if trimmed.is_empty() {
            return Err(rule_violation("Please fill in all options."));
        }
        if trimmed.chars().count() < OPTION_MIN_CHARS {
            return Err(rule_violation(
                "Option length must be 2 characters or more.",
            ));
        }
    }

    let mut seen_options = HashSet::new();
    for option in &draft.options {
        if !seen_options.insert(UniCase::new(option.trim()).to_folded_case()) {
            return Err(rule_violation("Duplicate options are not allowed."));
        }
    }

    let end = match draft.end_date.parse::<civil::Date>() {
        Ok(d) => d,
        Err(_) => return Err(rule_violation("Please enter a valid end date.")),
    };

    let today = now.date();
    if end <= today {
        return Err(rule_violation("Poll end date must be in the future."));
    }
    if end > today.saturating_add(jiff::Span::new().years(1)) {
        return Err(rule_violation(
            "Poll end date must be within one year from now.",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::QuestionDraft;
    use crate::types::Region;

    fn fixed_now() -> civil::DateTime {
        civil::date(2025, 1, 15).at(12, 0, 0, 0)
    }

    fn valid_event() -> EventDraft {
        EventDraft {
            title: "Team BBQ".to_string(),
            description: "Food".to_string(),
            emoji: "🎉".to_string(),
            start_date: "2025-06-01".to_string(),
            start_time: "18:00".to_string(),
            address: "Main St".to_string(),
            region: Some(Region::All),
            paid_by_brightest: Some(true),
            ..EventDraft::default()
        }
    }

    fn valid_poll() -> PollDraft {
        PollDraft {
            question: "Where should we eat?".to_string(),
            description: String::new(),
            region: Some(Region::North),
            options: vec!["Tacos".to_string(), "Pizza".to_string()],
            end_date: "2025-06-01".to_string(),
        }
    }

    fn message(result: Result<()>) -> String {
        match result.unwrap_err() {
            BrightError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    // ========================================================================
    // Event rules
    // ========================================================================

    #[test]
    fn test_event_valid_draft_passes() {
        assert!(validate_event(&valid_event(), fixed_now()).is_ok());
    }

    #[test]
    fn test_event_missing_required_fields() {
        let mut draft = valid_event();
        draft.emoji.clear();
        assert_eq!(
            message(validate_event(&draft, fixed_now())),
            "Please fill in all required fields."
        );

        let mut draft = valid_event();
        draft.paid_by_brightest = None;
        assert_eq!(
            message(validate_event(&draft, fixed_now())),
            "Please fill in all required fields."
        );
    }

    #[test]
    fn test_event_end_date_requires_end_time() {
        let mut draft = valid_event();
        draft.end_date = "2025-06-02".to_string();
        assert_eq!(
            message(validate_event(&draft, fixed_now())),
            "Please fill in the end time or remove the end date."
        );
    }

    #[test]
    fn test_event_title_length_bounds() {
        let too_long = "x".repeat(EVENT_TITLE_MAX + 1);
        for bad in ["Four", too_long.as_str()] {
            let mut draft = valid_event();
            draft.title = bad.to_string();
            assert_eq!(
                message(validate_event(&draft, fixed_now())),
                "Event title must be between 5 and 20 characters."
            );
        }

        let at_limit = "x".repeat(EVENT_TITLE_MAX);
        for good in ["Lunch", at_limit.as_str()] {
            let mut draft = valid_event();
            draft.title = good.to_string();
            assert!(validate_event(&draft, fixed_now()).is_ok());
        }
    }

    #[test]
    fn test_event_description_length_bounds() {
        let mut draft = valid_event();
        draft.description = "d".repeat(EVENT_DESCRIPTION_MAX + 1);
        assert_eq!(
            message(validate_event(&draft, fixed_now())),
            "Event description must be between 1 and 200 characters."
        );

        let mut draft = valid_event();
        draft.description = "d".repeat(EVENT_DESCRIPTION_MAX);
        assert!(validate_event(&draft, fixed_now()).is_ok());
    }

    #[test]
    fn test_event_emoji_accepts_clusters() {
        for emoji in ["🎉", "👍🏽", "❤️", "👨‍👩‍👧"] {
            let mut draft = valid_event();
            draft.emoji = emoji.to_string();
            assert!(
                validate_event(&draft, fixed_now()).is_ok(),
                "expected {emoji} to pass"
            );
        }
    }

    #[test]
    fn test_event_emoji_rejects_digits_and_specials() {
        for bad in ["5", "a", "*", "(", "🎉🎉", "no", "\\"] {
            let mut draft = valid_event();
            draft.emoji = bad.to_string();
            assert_eq!(
                message(validate_event(&draft, fixed_now())),
                "Please enter a valid emoji without numbers or special characters.",
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_event_year_bounds() {
        for bad in ["2023-06-01", "2031-01-01", "garbage"] {
            let mut draft = valid_event();
            draft.start_date = bad.to_string();
            assert_eq!(
                message(validate_event(&draft, fixed_now())),
                "Please enter a valid year between 2024 and 2030."
            );
        }
    }

    #[test]
    fn test_event_invalid_start_time() {
        let mut draft = valid_event();
        draft.start_time = "24:00".to_string();
        assert_eq!(
            message(validate_event(&draft, fixed_now())),
            "Invalid start time. Use 00:00 for midnight, not 24:00."
        );
    }

    #[test]
    fn test_event_end_before_start_rejected() {
        let mut draft = valid_event();
        draft.end_date = "2025-06-01".to_string();
        draft.end_time = "17:59".to_string();
        assert_eq!(
            message(validate_event(&draft, fixed_now())),
            "End date/time cannot be earlier than start date/time."
        );
    }

    #[test]
    fn test_event_end_equal_to_start_accepted() {
        let mut draft = valid_event();
        draft.end_date = draft.start_date.clone();
        draft.end_time = draft.start_time.clone();
        assert!(validate_event(&draft, fixed_now()).is_ok());
    }

    #[test]
    fn test_event_short_address() {
        let mut draft = valid_event();
        draft.address = "x".to_string();
        assert_eq!(
            message(validate_event(&draft, fixed_now())),
            "Please provide a valid address."
        );
    }

    #[test]
    fn test_event_start_must_be_future() {
        let mut draft = valid_event();
        draft.start_date = "2024-12-31".to_string();
        assert_eq!(
            message(validate_event(&draft, fixed_now())),
            "The selected date must be in the future."
        );
    }

    #[test]
    fn test_event_empty_question_rejected() {
        let mut draft = valid_event();
        draft.questions.push(QuestionDraft {
            question: "   ".to_string(),
            ..QuestionDraft::default()
        });
        assert_eq!(
            message(validate_event(&draft, fixed_now())),
            "Please fill in all questions."
        );
    }

    #[test]
    fn test_event_duplicate_questions_case_insensitive() {
        let mut draft = valid_event();
        draft.questions.push(QuestionDraft {
            question: "Allergies?".to_string(),
            ..QuestionDraft::default()
        });
        draft.questions.push(QuestionDraft {
            question: "  ALLERGIES?  ".to_string(),
            ..QuestionDraft::default()
        });
        assert_eq!(
            message(validate_event(&draft, fixed_now())),
            "Duplicate questions are not allowed."
        );
    }

    #[test]
    fn test_event_choice_needs_two_options() {
        let mut draft = valid_event();
        draft.questions.push(QuestionDraft {
            question: "Drink?".to_string(),
            multiple_choice: true,
            options: vec!["Beer".to_string()],
        });
        assert_eq!(
            message(validate_event(&draft, fixed_now())),
            "Each multiple choice question must have at least two options."
        );
    }

    #[test]
    fn test_event_choice_option_rules() {
        let mut draft = valid_event();
        draft.questions.push(QuestionDraft {
            question: "Drink?".to_string(),
            multiple_choice: true,
            options: vec!["Beer".to_string(), String::new()],
        });
        assert_eq!(
            message(validate_event(&draft, fixed_now())),
            "Please fill in all options."
        );

        let mut draft = valid_event();
        draft.questions.push(QuestionDraft {
            question: "Drink?".to_string(),
            multiple_choice: true,
            options: vec!["Beer".to_string(), "W".to_string()],
        });
        assert_eq!(
            message(validate_event(&draft, fixed_now())),
            "Option length must be 2 characters or more."
        );
    }

    #[test]
    fn test_event_free_text_question_with_no_options_is_valid() {
        let mut draft = valid_event();
        draft.questions.push(QuestionDraft {
            question: "Allergies?".to_string(),
            multiple_choice: false,
            options: Vec::new(),
        });
        assert!(validate_event(&draft, fixed_now()).is_ok());
    }

    // ========================================================================
    // Poll rules
    // ========================================================================

    #[test]
    fn test_poll_valid_draft_passes() {
        assert!(validate_poll(&valid_poll(), fixed_now()).is_ok());
    }

    #[test]
    fn test_poll_question_length_bounds() {
        let too_long = "q".repeat(POLL_QUESTION_MAX + 1);
        for bad in ["Too short", too_long.as_str()] {
            let mut draft = valid_poll();
            draft.question = bad.to_string();
            assert_eq!(
                message(validate_poll(&draft, fixed_now())),
                "Poll question must be between 10 and 50 characters."
            );
        }
    }

    #[test]
    fn test_poll_description_optional_but_capped() {
        let mut draft = valid_poll();
        draft.description = String::new();
        assert!(validate_poll(&draft, fixed_now()).is_ok());

        draft.description = "d".repeat(POLL_DESCRIPTION_MAX + 1);
        assert_eq!(
            message(validate_poll(&draft, fixed_now())),
            "Poll description must be 100 characters or fewer."
        );
    }

    #[test]
    fn test_poll_needs_two_options() {
        let mut draft = valid_poll();
        draft.options = vec!["Tacos".to_string()];
        assert_eq!(
            message(validate_poll(&draft, fixed_now())),
            "A poll must have at least two options."
        );
    }

    #[test]
    fn test_poll_duplicate_options_after_trim_and_fold() {
        let mut draft = valid_poll();
        draft.options = vec!["Yes".to_string(), " yes ".to_string()];
        assert_eq!(
            message(validate_poll(&draft, fixed_now())),
            "Duplicate options are not allowed."
        );
    }

    #[test]
    fn test_poll_end_date_window() {
        // Today or earlier: rejected.
        let mut draft = valid_poll();
        draft.end_date = "2025-01-15".to_string();
        assert_eq!(
            message(validate_poll(&draft, fixed_now())),
            "Poll end date must be in the future."
        );

        // Exactly one year out: accepted (inclusive bound).
        let mut draft = valid_poll();
        draft.end_date = "2026-01-15".to_string();
        assert!(validate_poll(&draft, fixed_now()).is_ok());

        // Past the window: rejected.
        let mut draft = valid_poll();
        draft.end_date = "2026-01-16".to_string();
        assert_eq!(
            message(validate_poll(&draft, fixed_now())),
            "Poll end date must be within one year from now."
        );
    }

    #[test]
    fn test_poll_unparsable_end_date() {
        let mut draft = valid_poll();
        draft.end_date = "soon".to_string();
        assert_eq!(
            message(validate_poll(&draft, fixed_now())),
            "Please enter a valid end date."
        );
    }
}
