use ridealong_models::contact::Violation;
use serde::Serialize;

/// Raw values of the form's input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    /// A submission is in flight and the submit control is disabled.
    Pending,
    Resolved(Banner),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success {
        message: String,
    },
    Error {
        message: String,
        /// Field level problems reported by the server, if any.
        violations: Vec<Violation>,
    },
}

impl FormState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn banner(&self) -> Option<&Banner> {
        match self {
            Self::Resolved(banner) => Some(banner),
            Self::Idle | Self::Pending => None,
        }
    }
}
