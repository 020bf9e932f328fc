use chrono::Utc;

use super::entity::User;
use crate::domain::{DomainError, DomainResult};

/// Validates all User invariants. The name-defaults-to-login rule is applied
/// by the service before validation, so a valid User always has a name.
pub fn validate_user(user: &User) -> DomainResult<()> {
    validate_email(&user.email)?;
    validate_login(&user.login)?;
    validate_birthday(user)?;
    Ok(())
}

fn validate_email(email: &str) -> DomainResult<()> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(DomainError::InvariantViolation(format!(
            "Invalid email: {:?}",
            email
        )));
    }
    Ok(())
}

/// Login must be non-blank and free of embedded whitespace
fn validate_login(login: &str) -> DomainResult<()> {
    if login.is_empty() || login.chars().any(char::is_whitespace) {
        return Err(DomainError::InvariantViolation(format!(
            "Invalid login: {:?}",
            login
        )));
    }
    Ok(())
}

fn validate_birthday(user: &User) -> DomainResult<()> {
    if user.birthday > Utc::now().date_naive() {
        return Err(DomainError::InvariantViolation(
            "Birthday cannot be in the future".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn user() -> User {
        User {
            id: 0,
            email: "neo@matrix.io".to_string(),
            login: "neo".to_string(),
            name: "Thomas Anderson".to_string(),
            birthday: NaiveDate::from_ymd_opt(1964, 9, 13).unwrap(),
        }
    }

    #[test]
    fn test_valid_user() {
        assert!(validate_user(&user()).is_ok());
    }

    #[test]
    fn test_email_without_at_fails() {
        let mut u = user();
        u.email = "neo.matrix.io".to_string();
        assert!(validate_user(&u).is_err());
    }

    #[test]
    fn test_login_with_whitespace_fails() {
        let mut u = user();
        u.login = "the one".to_string();
        assert!(validate_user(&u).is_err());
    }

    #[test]
    fn test_future_birthday_fails() {
        let mut u = user();
        u.birthday = Utc::now().date_naive() + Duration::days(1);
        assert!(validate_user(&u).is_err());
    }
}
