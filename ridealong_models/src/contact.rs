use nutype::nutype;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::email_address::EmailAddress;

/// A validated message from the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: EmailAddress,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}

#[nutype(
    validate(len_char_min = 2, len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    validate(len_char_min = 5, len_char_max = 200),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactSubject(String);

#[nutype(
    validate(len_char_min = 10, len_char_max = 5000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessage(String);

/// Describes why a single field of a submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Dotted path of the offending field, empty for the whole input.
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Outcome of one submission as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Accepted { message: String },
    ValidationFailed { violations: Vec<Violation> },
    RelayFailed,
}

impl ContactSubmission {
    /// Validates untyped input against the contact form rules.
    ///
    /// All fields are checked, so the returned violations cover every invalid
    /// field, in the order `name`, `email`, `subject`, `message`.
    pub fn validate(input: &Value) -> Result<Self, Vec<Violation>> {
        let Some(object) = input.as_object() else {
            return Err(vec![Violation::new("", "Expected object")]);
        };

        let mut violations = Vec::new();

        let name = check(object, "name", &mut violations, |value| {
            ContactName::try_new(value.to_owned()).map_err(|err| match err {
                ContactNameError::LenCharMinViolated => "Name must be at least 2 characters",
                ContactNameError::LenCharMaxViolated => "Name must be at most 100 characters",
            })
        });

        let email = check(object, "email", &mut violations, |value| {
            value
                .parse::<EmailAddress>()
                .map_err(|_| "Invalid email address")
        });

        let subject = check(object, "subject", &mut violations, |value| {
            ContactSubject::try_new(value.to_owned()).map_err(|err| match err {
                ContactSubjectError::LenCharMinViolated => "Subject must be at least 5 characters",
                ContactSubjectError::LenCharMaxViolated => {
                    "Subject must be at most 200 characters"
                }
            })
        });

        let message = check(object, "message", &mut violations, |value| {
            ContactMessage::try_new(value.to_owned()).map_err(|err| match err {
                ContactMessageError::LenCharMinViolated => {
                    "Message must be at least 10 characters"
                }
                ContactMessageError::LenCharMaxViolated => {
                    "Message must be at most 5000 characters"
                }
            })
        });

        match (name, email, subject, message) {
            (Some(name), Some(email), Some(subject), Some(message)) => Ok(Self {
                name,
                email,
                subject,
                message,
            }),
            _ => Err(violations),
        }
    }
}

fn check<T>(
    object: &Map<String, Value>,
    path: &str,
    violations: &mut Vec<Violation>,
    parse: impl FnOnce(&str) -> Result<T, &'static str>,
) -> Option<T> {
    let result = match object.get(path) {
        None | Some(Value::Null) => Err("Required"),
        Some(Value::String(value)) => parse(value),
        Some(_) => Err("Expected string"),
    };

    result
        .map_err(|message| violations.push(Violation::new(path, message)))
        .ok()
}
