//! Form validation run before any network call.
//!
//! Failures are shown inline next to the form and never reach the backend.

use crate::error::ValidationErrors;

pub const MIN_PASSWORD_LENGTH: usize = 8;

const INVALID_EMAIL: &str = "Adresse email invalide";
const PASSWORD_TOO_SHORT: &str = "Le mot de passe doit contenir au moins 8 caractères";
const PASSWORD_MISMATCH: &str = "Les mots de passe ne correspondent pas";
const NAME_REQUIRED: &str = "Le nom est requis";
const PASSWORD_REQUIRED: &str = "Le mot de passe est requis";

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_email(&mut errors, email);
    if password.is_empty() {
        errors.add("password", PASSWORD_REQUIRED);
    }
    errors.into_result()
}

pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirmation: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if name.trim().is_empty() {
        errors.add("name", NAME_REQUIRED);
    }
    check_email(&mut errors, email);
    check_new_password(&mut errors, password, confirmation);
    errors.into_result()
}

pub fn validate_password_reset(password: &str, confirmation: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_new_password(&mut errors, password, confirmation);
    errors.into_result()
}

pub fn validate_email(email: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_email(&mut errors, email);
    errors.into_result()
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    let valid = match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid {
        errors.add("email", INVALID_EMAIL);
    }
}

fn check_new_password(errors: &mut ValidationErrors, password: &str, confirmation: &str) {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add("password", PASSWORD_TOO_SHORT);
    }
    if password != confirmation {
        errors.add("password_confirmation", PASSWORD_MISMATCH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration("Ana", "ana@example.com", "hortensia", "hortensia").is_ok());
    }

    #[test]
    fn test_registration_collects_every_problem() {
        let errors = validate_registration(" ", "nope", "short", "other").unwrap_err();
        assert!(errors.has("name"));
        assert!(errors.has("email"));
        assert!(errors.has("password"));
        assert!(errors.has("password_confirmation"));
    }

    #[test]
    fn test_password_length_counts_characters() {
        assert!(validate_password_reset("éééééééé", "éééééééé").is_ok());
        let errors = validate_password_reset("1234567", "1234567").unwrap_err();
        assert!(errors.has("password"));
        assert!(!errors.has("password_confirmation"));
    }

    #[test]
    fn test_password_mismatch() {
        let errors = validate_password_reset("longpassword", "longpassw0rd").unwrap_err();
        assert_eq!(errors.fields.len(), 1);
        assert!(errors.has("password_confirmation"));
    }

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("a@b.fr").is_ok());
        assert!(validate_email("@b.fr").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a@b@c").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_login_requires_password() {
        let errors = validate_login("a@b.fr", "").unwrap_err();
        assert!(errors.has("password"));
        assert!(validate_login("a@b.fr", "x").is_ok());
    }
}
