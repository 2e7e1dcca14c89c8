//! Contact form
//!
//! Submissions are validated and logged; nothing is stored or mailed.

use serde::{Deserialize, Serialize};

/// Longest accepted name, in characters
pub const MAX_NAME_CHARS: usize = 100;
/// Longest accepted message, in characters
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// Raw form fields, echoed back into the form when invalid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// One rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ContactForm {
    /// Trim and check every field; all problems are reported at once
    pub fn validate(&self) -> Result<ContactMessage, Vec<FieldError>> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();
        let mut errors = Vec::new();

        if name.is_empty() {
            errors.push(FieldError {
                field: "name",
                message: "Please enter your name.",
            });
        } else if name.chars().count() > MAX_NAME_CHARS {
            errors.push(FieldError {
                field: "name",
                message: "Name is too long.",
            });
        }

        if !is_plausible_email(email) {
            errors.push(FieldError {
                field: "email",
                message: "Please enter a valid email address.",
            });
        }

        if message.is_empty() {
            errors.push(FieldError {
                field: "message",
                message: "Please enter a message.",
            });
        } else if message.chars().count() > MAX_MESSAGE_CHARS {
            errors.push(FieldError {
                field: "message",
                message: "Message is too long.",
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}

/// `local@domain.tld` with no whitespace
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}
