// Input validation for the login and registration forms.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::config::SecretString;
use crate::error::{ApiError, FieldErrors};
use crate::users::CustomerProfile;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_NAME_LEN: usize = 50;
pub const MAX_PHONE_LEN: usize = 20;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[\d\s-]{10,}$").expect("phone pattern"));

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct Registration {
    pub credentials: Credentials,
    pub profile: CustomerProfile,
}

impl Registration {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.profile.first_name, self.profile.last_name)
    }
}

#[derive(Default)]
struct Errors(FieldErrors);

impl Errors {
    fn add(&mut self, field: &str, message: &str) {
        self.0.entry(field.to_string()).or_default().push(message.to_string());
    }

    fn finish<T>(self, value: T) -> Result<T, ApiError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(ApiError::validation_error("Validation failed", self.0))
        }
    }
}

impl LoginRequest {
    pub fn validate(self) -> Result<Credentials, ApiError> {
        let mut errors = Errors::default();
        let credentials = check_credentials(&mut errors, &self.email, &self.password);
        errors.finish(credentials)
    }
}

impl RegisterRequest {
    pub fn validate(self) -> Result<Registration, ApiError> {
        let mut errors = Errors::default();
        let credentials = check_credentials(&mut errors, &self.email, &self.password);

        let first_name = self.first_name.trim().to_string();
        check_name(&mut errors, "first_name", "First name", &first_name);
        let last_name = self.last_name.trim().to_string();
        check_name(&mut errors, "last_name", "Last name", &last_name);

        let phone_number = non_empty(self.phone_number);
        if let Some(phone) = &phone_number {
            if !PHONE_RE.is_match(phone) {
                errors.add("phone_number", "Invalid phone number format");
            }
            if phone.chars().count() > MAX_PHONE_LEN {
                errors.add("phone_number", "Phone number must be less than 20 characters");
            }
        }

        let registration = Registration {
            credentials,
            profile: CustomerProfile {
                first_name,
                last_name,
                phone_number,
                address: non_empty(self.address),
                city: non_empty(self.city),
            },
        };
        errors.finish(registration)
    }
}

fn check_credentials(errors: &mut Errors, email: &str, password: &str) -> Credentials {
    let email = email.trim();
    if !EMAIL_RE.is_match(email) {
        errors.add("email", "Invalid email address");
    }

    let password = password.trim();
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", "Password must be at least 8 characters");
    }

    Credentials {
        email: email.to_string(),
        password: SecretString::new(password),
    }
}

fn check_name(errors: &mut Errors, field: &str, label: &str, value: &str) {
    let len = value.chars().count();
    if len == 0 {
        errors.add(field, &format!("{} is required", label));
    } else if len > MAX_NAME_LEN {
        errors.add(field, &format!("{} must be less than 50 characters", label));
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
