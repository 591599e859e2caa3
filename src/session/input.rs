//! Answer preparation at the driver boundary
//!
//! Everything the user submits passes through `prepare_answer` before it
//! reaches a navigator. Required steps, option membership and the format
//! checks an input element would apply are enforced here; the engine takes
//! whatever `Answer` it is given as valid and final.

use chrono::NaiveDate;
use regex::Regex;

use crate::errors::{IntakeError, Result};
use crate::schemas::{Answer, InputKind, Step};

lazy_static::lazy_static! {
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9 ().-]+$").unwrap();

    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();

    static ref ZIPCODE_REGEX: Regex = Regex::new(r"^\d{5}(-\d{4})?$").unwrap();
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Raw value submitted by the rendering layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    /// Typed text or a picked single option value
    Text(String),
    /// Picked option values of a multi-select
    Choices(Vec<String>),
    /// Uploaded file or photo
    Attachment {
        name: String,
        media_type: Option<String>,
    },
    /// "Skip for now"
    Skip,
}

impl RawInput {
    pub fn text(value: impl Into<String>) -> Self {
        RawInput::Text(value.into())
    }

    pub fn choices<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RawInput::Choices(values.into_iter().map(Into::into).collect())
    }

    pub fn attachment(name: impl Into<String>) -> Self {
        RawInput::Attachment {
            name: name.into(),
            media_type: None,
        }
    }
}

/// Re-submitting a stored answer yields the same answer
impl From<&Answer> for RawInput {
    fn from(answer: &Answer) -> Self {
        match answer {
            Answer::Text(value) => RawInput::Text(value.clone()),
            Answer::Choices(values) => RawInput::Choices(values.clone()),
            Answer::Attachment { name, media_type } => RawInput::Attachment {
                name: name.clone(),
                media_type: media_type.clone(),
            },
            Answer::Skipped => RawInput::Skip,
        }
    }
}

fn invalid(step: &Step, reason: impl Into<String>) -> IntakeError {
    IntakeError::InvalidAnswer {
        step_id: step.id.clone(),
        reason: reason.into(),
    }
}

/// Nothing was given: the skip marker for optional steps, a rejection otherwise
fn empty_answer(step: &Step) -> Result<Answer> {
    if step.required {
        return Err(IntakeError::MissingAnswer(step.id.clone()));
    }
    Ok(Answer::Skipped)
}

fn check_option(step: &Step, value: &str) -> Result<()> {
    if step.option(value).is_none() {
        return Err(invalid(step, format!("'{}' is not one of the options", value)));
    }
    Ok(())
}

fn check_format(step: &Step, value: &str) -> Result<()> {
    match step.input_type {
        InputKind::Phone => {
            let digits = value.chars().filter(char::is_ascii_digit).count();
            if !PHONE_REGEX.is_match(value) || !(7..=15).contains(&digits) {
                return Err(invalid(step, "expected a phone number"));
            }
        }
        InputKind::Email => {
            if !EMAIL_REGEX.is_match(value) {
                return Err(invalid(step, "expected an email address"));
            }
        }
        InputKind::Zipcode => {
            if !ZIPCODE_REGEX.is_match(value) {
                return Err(invalid(step, "expected a 5-digit ZIP code"));
            }
        }
        InputKind::Date => {
            let parsed = DATE_FORMATS
                .iter()
                .any(|format| NaiveDate::parse_from_str(value, format).is_ok());
            if !parsed {
                return Err(invalid(step, "expected a date (YYYY-MM-DD)"));
            }
        }
        InputKind::Number => {
            if value.parse::<f64>().is_err() {
                return Err(invalid(step, "expected a number"));
            }
        }
        _ => {}
    }
    Ok(())
}

fn prepare_text(step: &Step, value: &str) -> Result<Answer> {
    let value = value.trim();
    if value.is_empty() {
        return empty_answer(step);
    }

    match step.input_type {
        InputKind::SingleSelect => {
            check_option(step, value)?;
            Ok(Answer::text(value))
        }
        InputKind::MultiSelect => {
            check_option(step, value)?;
            Ok(Answer::choices([value]))
        }
        kind if kind.is_attachment() => Err(invalid(step, "expected an upload")),
        _ => {
            check_format(step, value)?;
            Ok(Answer::text(value))
        }
    }
}

fn prepare_choices(step: &Step, values: Vec<String>) -> Result<Answer> {
    let mut picked: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim().to_string();
        if !value.is_empty() && !picked.contains(&value) {
            picked.push(value);
        }
    }

    if picked.is_empty() {
        return empty_answer(step);
    }

    match step.input_type {
        InputKind::MultiSelect => {
            for value in &picked {
                check_option(step, value)?;
            }
            Ok(Answer::Choices(picked))
        }
        InputKind::SingleSelect if picked.len() == 1 => {
            check_option(step, &picked[0])?;
            Ok(Answer::Text(picked.remove(0)))
        }
        InputKind::SingleSelect => Err(invalid(step, "expected exactly one option")),
        _ => Err(invalid(step, "does not take a selection")),
    }
}

/// Turn raw input for `step` into the answer stored for it
pub fn prepare_answer(step: &Step, raw: RawInput) -> Result<Answer> {
    match raw {
        RawInput::Skip => empty_answer(step),
        RawInput::Text(value) => prepare_text(step, &value),
        RawInput::Choices(values) => prepare_choices(step, values),
        RawInput::Attachment { name, media_type } => {
            if !step.input_type.is_attachment() {
                return Err(invalid(step, "does not take an upload"));
            }
            let name = name.trim().to_string();
            if name.is_empty() {
                return empty_answer(step);
            }
            Ok(Answer::Attachment { name, media_type })
        }
    }
}

/// Text shown for an answer in a transcript, with option labels substituted
pub fn display_value(step: &Step, answer: &Answer) -> String {
    match answer {
        Answer::Text(value) => step.label_for(value).to_string(),
        Answer::Choices(values) => values
            .iter()
            .map(|v| step.label_for(v))
            .collect::<Vec<_>>()
            .join(", "),
        Answer::Attachment { name, .. } => format!("📎 {}", name),
        Answer::Skipped => "Skipped".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::SelectOption;

    fn step(kind: InputKind, required: bool) -> Step {
        Step::new("field", "Field?", kind, required)
    }

    fn urgency() -> Step {
        Step::new("urgency", "Urgent?", InputKind::SingleSelect, true).with_options(vec![
            SelectOption::new("urgent", "Yes, urgent"),
            SelectOption::new("not-urgent", "Not urgent"),
        ])
    }

    fn topics(required: bool) -> Step {
        Step::new("topics", "Topics?", InputKind::MultiSelect, required).with_options(vec![
            SelectOption::new("billing", "Billing"),
            SelectOption::new("coverage", "Coverage"),
        ])
    }

    #[test]
    fn test_required_step_rejects_empty() {
        let s = step(InputKind::Text, true);
        let err = prepare_answer(&s, RawInput::text("   ")).unwrap_err();
        assert!(matches!(err, IntakeError::MissingAnswer(ref id) if id == "field"));
        assert!(prepare_answer(&s, RawInput::Skip).is_err());
    }

    #[test]
    fn test_optional_step_empty_becomes_skipped() {
        let s = step(InputKind::Text, false);
        assert_eq!(prepare_answer(&s, RawInput::text("")).unwrap(), Answer::Skipped);
        assert_eq!(prepare_answer(&s, RawInput::Skip).unwrap(), Answer::Skipped);
        assert_eq!(
            prepare_answer(&topics(false), RawInput::Choices(vec![])).unwrap(),
            Answer::Skipped
        );
    }

    #[test]
    fn test_text_is_trimmed() {
        let s = step(InputKind::Text, true);
        assert_eq!(
            prepare_answer(&s, RawInput::text("  my claim was denied ")).unwrap(),
            Answer::text("my claim was denied")
        );
    }

    #[test]
    fn test_single_select_checks_options() {
        assert_eq!(
            prepare_answer(&urgency(), RawInput::text("urgent")).unwrap(),
            Answer::text("urgent")
        );
        let err = prepare_answer(&urgency(), RawInput::text("soon")).unwrap_err();
        assert_eq!(err.code(), "INVALID_ANSWER");
        assert_eq!(
            prepare_answer(&urgency(), RawInput::choices(["not-urgent"])).unwrap(),
            Answer::text("not-urgent")
        );
        assert!(prepare_answer(&urgency(), RawInput::choices(["urgent", "not-urgent"])).is_err());
    }

    #[test]
    fn test_multi_select_dedupes_and_checks_options() {
        assert_eq!(
            prepare_answer(&topics(true), RawInput::choices(["billing", "coverage", "billing"]))
                .unwrap(),
            Answer::choices(["billing", "coverage"])
        );
        assert!(prepare_answer(&topics(true), RawInput::choices(["dental"])).is_err());
        assert!(matches!(
            prepare_answer(&topics(true), RawInput::Choices(vec![])).unwrap_err(),
            IntakeError::MissingAnswer(_)
        ));
    }

    #[test]
    fn test_attachment_rules() {
        let upload = step(InputKind::PhotoUpload, true);
        assert_eq!(
            prepare_answer(&upload, RawInput::attachment("card.jpg")).unwrap(),
            Answer::attachment("card.jpg")
        );
        assert!(prepare_answer(&upload, RawInput::text("card.jpg")).is_err());
        assert!(prepare_answer(&step(InputKind::Text, true), RawInput::attachment("a.pdf")).is_err());
        assert_eq!(
            prepare_answer(&step(InputKind::FileUpload, false), RawInput::Skip).unwrap(),
            Answer::Skipped
        );
    }

    #[test]
    fn test_format_checks() {
        let phone = step(InputKind::Phone, true);
        assert!(prepare_answer(&phone, RawInput::text("(555) 123-4567")).is_ok());
        assert!(prepare_answer(&phone, RawInput::text("+1 555 123 4567")).is_ok());
        assert!(prepare_answer(&phone, RawInput::text("call me")).is_err());
        assert!(prepare_answer(&phone, RawInput::text("123")).is_err());

        let email = step(InputKind::Email, true);
        assert!(prepare_answer(&email, RawInput::text("pat@example.com")).is_ok());
        assert!(prepare_answer(&email, RawInput::text("pat@example")).is_err());

        let zip = step(InputKind::Zipcode, true);
        assert!(prepare_answer(&zip, RawInput::text("94110")).is_ok());
        assert!(prepare_answer(&zip, RawInput::text("94110-1234")).is_ok());
        assert!(prepare_answer(&zip, RawInput::text("9411")).is_err());

        let date = step(InputKind::Date, true);
        assert!(prepare_answer(&date, RawInput::text("1990-02-28")).is_ok());
        assert!(prepare_answer(&date, RawInput::text("02/28/1990")).is_ok());
        assert!(prepare_answer(&date, RawInput::text("1990-02-30")).is_err());

        let number = step(InputKind::Number, true);
        assert!(prepare_answer(&number, RawInput::text("42")).is_ok());
        assert!(prepare_answer(&number, RawInput::text("forty-two")).is_err());

        let location = step(InputKind::Location, true);
        assert!(prepare_answer(&location, RawInput::text("near the park")).is_ok());
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&urgency(), &Answer::text("urgent")), "Yes, urgent");
        assert_eq!(
            display_value(&topics(true), &Answer::choices(["billing", "coverage"])),
            "Billing, Coverage"
        );
        assert_eq!(
            display_value(&step(InputKind::FileUpload, false), &Answer::attachment("eob.pdf")),
            "📎 eob.pdf"
        );
        assert_eq!(display_value(&step(InputKind::Text, false), &Answer::Skipped), "Skipped");
    }

    #[test]
    fn test_stored_answer_resubmits_unchanged() {
        let urgency = urgency();
        let stored = prepare_answer(&urgency, RawInput::text("urgent")).unwrap();
        assert_eq!(prepare_answer(&urgency, RawInput::from(&stored)).unwrap(), stored);

        let upload = step(InputKind::PhotoUpload, true);
        let stored = Answer::attachment("card.jpg");
        assert_eq!(prepare_answer(&upload, RawInput::from(&stored)).unwrap(), stored);
    }
}
