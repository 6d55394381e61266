use common::accounts::{validate_password, validate_username};
use serde::Deserialize;

use super::form::{MultipartForm, UploadedFile};

/// Loose shape check: one `@`, a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    const MESSAGE: &str = "Enter a valid email address.";

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(MESSAGE);
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return Err(MESSAGE);
    };
    if local.is_empty()
        || local.contains('@')
        || !domain.contains('.')
        || domain.split('.').any(str::is_empty)
    {
        return Err(MESSAGE);
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

impl RegisterForm {
    pub fn normalize(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_string();
        self
    }

    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Err(e) = validate_username(&self.username) {
            errors.push(e.to_string());
        }
        if let Err(e) = validate_email(&self.email) {
            errors.push(e.to_string());
        }
        if self.password1 != self.password2 {
            errors.push("The two password fields didn't match.".to_string());
        } else if let Err(e) = validate_password(&self.password1) {
            errors.push(e.to_string());
        }
        errors
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: String,
}

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Username/email edit plus an optional new avatar.
pub struct ProfileForm {
    pub username: String,
    pub email: String,
    pub image: Option<UploadedFile>,
}

impl ProfileForm {
    pub fn from_multipart(mut form: MultipartForm) -> Self {
        Self {
            username: form.text("username").trim().to_string(),
            email: form.text("email").trim().to_string(),
            image: form.take_file("image"),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        [
            validate_username(&self.username),
            validate_email(&self.email),
        ]
        .into_iter()
        .filter_map(Result::err)
        .map(str::to_string)
        .collect()
    }
}
