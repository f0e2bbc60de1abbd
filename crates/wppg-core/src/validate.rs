//! Answer validators used by the modules' questions

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Rejection message shown to the user before re-prompting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Validator applied to each raw answer
pub type Validator = fn(&str) -> Result<(), ValidationError>;

/// Minimum password length for the WordPress admin account
pub const PASSWORD_MIN_LENGTH: usize = 12;

/// Symbols accepted as the "special character" of a password
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()-_=+{};:,<.>[]";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    )
    .expect("email pattern is valid")
});

pub fn non_empty(answer: &str) -> Result<(), ValidationError> {
    if answer.trim().is_empty() {
        return Err(ValidationError::new("A value is required."));
    }
    Ok(())
}

pub fn email(answer: &str) -> Result<(), ValidationError> {
    let answer = answer.trim();
    let local_ok = answer
        .split_once('@')
        .is_some_and(|(local, _)| local.len() <= 64);
    if answer.len() > 254 || !local_ok || !EMAIL_RE.is_match(answer) {
        return Err(ValidationError::new("The email address seems invalid."));
    }
    Ok(())
}

pub fn password(answer: &str) -> Result<(), ValidationError> {
    let long_enough = answer.chars().count() >= PASSWORD_MIN_LENGTH;
    let has_lower = answer.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = answer.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = answer.chars().any(|c| c.is_ascii_digit());
    let has_symbol = answer.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    if !(long_enough && has_lower && has_upper && has_digit && has_symbol) {
        return Err(ValidationError::new(format!(
            "The password must contain at least {} characters: 1 lowercase letter [a-z], \
             1 uppercase letter [A-Z], 1 number [0-9] and 1 special symbol [{}].",
            PASSWORD_MIN_LENGTH, PASSWORD_SYMBOLS
        )));
    }
    Ok(())
}

pub fn port(answer: &str) -> Result<(), ValidationError> {
    parse_port(answer).map(|_| ())
}

/// Parse a port number in (0, 65535]
pub fn parse_port(answer: &str) -> Result<u16, ValidationError> {
    match answer.trim().parse::<i64>() {
        Ok(n) if n > 0 && n <= i64::from(u16::MAX) => Ok(n as u16),
        _ => Err(ValidationError::new("Invalid port number!")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_rules() {
        assert!(password("Aa1!aaaaaaaa").is_ok());
        // 11 characters
        assert!(password("Aa1!aaaaaaa").is_err());
        // no digit
        assert!(password("Aa!aaaaaaaaa").is_err());
        // no uppercase
        assert!(password("aa1!aaaaaaaa").is_err());
        // no lowercase
        assert!(password("AA1!AAAAAAAA").is_err());
        // symbol outside the accepted set
        assert!(password("Aa1~aaaaaaaa").is_err());
    }

    #[test]
    fn test_port_bounds() {
        for rejected in ["0", "65536", "-1", "", "http", "80a"] {
            assert!(port(rejected).is_err(), "{rejected:?} should be rejected");
        }
        assert_eq!(parse_port("1").unwrap(), 1);
        assert_eq!(parse_port("65535").unwrap(), 65535);
        assert_eq!(parse_port(" 8080 ").unwrap(), 8080);
    }

    #[test]
    fn test_email() {
        assert!(email("adminwp@example.com").is_ok());
        assert!(email("first.last+tag@sub.example.org").is_ok());
        assert!(email("no-at-sign.example.com").is_err());
        assert!(email("user@localhost").is_err());
        assert!(email(".user@example.com").is_err());
        assert!(email("us..er@example.com").is_err());
        assert!(email("user@-example.com").is_err());
    }

    #[test]
    fn test_non_empty() {
        assert!(non_empty("x").is_ok());
        assert!(non_empty("   ").is_err());
    }
}
