//! Client-side form validation.
//!
//! Everything here runs before any network call; a form that fails never
//! reaches the API.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::access::Visibility;
use crate::error::DomainError;

static RE_USERNAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w{6,20}$").unwrap());
static RE_DISPLAY_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\s-]{6,20}$").unwrap());
static RE_PASSWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S{6,20}$").unwrap());
static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w\-.]+@([\w-]+\.)+[\w-]{2,4}$").unwrap());

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

fn no_edge_whitespace(value: &str) -> Result<(), ValidationError> {
    if value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace) {
        return Err(ValidationError::new("edge_whitespace"));
    }
    Ok(())
}

/// Registration form.
#[derive(Debug, Clone, Validate)]
pub struct RegistrationForm {
    /// 6-20 word characters.
    #[validate(regex(path = *RE_USERNAME, message = "Username must be 6-20 characters long and contain only letters, numbers, and underscores."))]
    pub username: String,

    /// 6-20 letters, numbers, hyphens, underscores and spaces, not starting
    /// or ending with a space.
    #[validate(
        regex(path = *RE_DISPLAY_NAME, message = "Display name must be 6-20 characters long and contain only letters, numbers, hyphens, underscores, and spaces."),
        custom(function = no_edge_whitespace, message = "Display name cannot start or end with a space.")
    )]
    pub display_name: String,

    /// 6-20 characters, no spaces.
    #[validate(regex(path = *RE_PASSWORD, message = "Password must be 6-20 characters long and cannot contain spaces."))]
    pub password: String,

    pub confirm_password: String,

    #[validate(regex(path = *RE_EMAIL, message = "Enter a valid e-mail address."))]
    pub email: String,
}

impl RegistrationForm {
    /// Field validation plus the password/confirmation match check.
    pub fn validate_all(&self) -> Result<(), DomainError> {
        self.validate()?;
        if self.password != self.confirm_password {
            return Err(DomainError::ValidationError("Passwords do not match.".into()));
        }
        Ok(())
    }
}

/// Sign-in form. The server decides whether the credentials are valid;
/// the client only refuses empty submissions.
#[derive(Debug, Clone, Validate)]
pub struct SignInForm {
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Group create/edit form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GroupDraft {
    #[validate(
        length(min = 1, max = 100, message = "Group name must be between 1 and 100 characters."),
        custom(function = not_blank, message = "Group name cannot be blank.")
    )]
    pub name: String,
    pub about: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub visibility: Visibility,
}

impl GroupDraft {
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate().map_err(DomainError::from)
    }
}

/// Event create/edit form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventDraft {
    #[validate(custom(function = not_blank, message = "Title cannot be empty."))]
    pub title: String,
    pub description: String,
    pub start_time: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub location: Option<String>,
    pub visibility: Visibility,
    pub group_id: gather_shared::types::EntityId,
    #[validate(range(min = 0.0, message = "Price cannot be negative."))]
    pub price: f64,
    pub pay_what_you_want: bool,
    #[serde(default)]
    pub google_link: Option<String>,
}

impl EventDraft {
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate().map_err(DomainError::from)
    }
}

/// Reject a payment amount below the event's minimum price before any
/// payment-intent call is made.
pub fn check_payment_amount(amount: f64, minimum: f64) -> Result<(), DomainError> {
    if amount < minimum {
        return Err(DomainError::AmountBelowMinimum { minimum });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            username: "walker_22".into(),
            display_name: "Hill Walker".into(),
            password: "tr0users".into(),
            confirm_password: "tr0users".into(),
            email: "walker@example.com".into(),
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(form().validate_all().is_ok());
    }

    #[test]
    fn test_short_password_rejected() {
        let mut form = form();
        form.password = "abc".into();
        form.confirm_password = "abc".into();
        assert!(form.validate_all().is_err());
    }

    #[test]
    fn test_short_username_rejected() {
        let mut form = form();
        form.username = "ab".into();
        assert!(form.validate_all().is_err());
    }

    #[test]
    fn test_password_with_space_rejected() {
        let mut form = form();
        form.password = "tro users".into();
        form.confirm_password = "tro users".into();
        assert!(form.validate_all().is_err());
    }

    #[test]
    fn test_password_mismatch_rejected() {
        let mut form = form();
        form.confirm_password = "different1".into();
        assert!(form.validate_all().is_err());
    }

    #[test]
    fn test_display_name_edge_space_rejected() {
        let mut form = form();
        form.display_name = " Hill Walker".into();
        assert!(form.validate_all().is_err());
        form.display_name = "Hill Walker ".into();
        assert!(form.validate_all().is_err());
    }

    #[test]
    fn test_malformed_email_rejected() {
        let mut form = form();
        form.email = "not-an-email".into();
        assert!(form.validate_all().is_err());
    }

    #[test]
    fn test_empty_sign_in_fields_rejected() {
        let form = SignInForm { username: String::new(), password: "tr0users".into() };
        assert!(form.validate().is_err());
        let form = SignInForm { username: "walker_22".into(), password: String::new() };
        assert!(form.validate().is_err());
        let form = SignInForm { username: "walker_22".into(), password: "tr0users".into() };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_blank_event_title_rejected() {
        let draft = EventDraft {
            title: "   ".into(),
            description: String::new(),
            start_time: chrono::Utc::now(),
            location: None,
            visibility: Visibility::Public,
            group_id: 1,
            price: 0.0,
            pay_what_you_want: false,
            google_link: None,
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_payment_amount_below_minimum_rejected() {
        assert!(check_payment_amount(4.99, 5.0).is_err());
        assert!(check_payment_amount(5.0, 5.0).is_ok());
        assert!(check_payment_amount(7.5, 5.0).is_ok());
    }
}
