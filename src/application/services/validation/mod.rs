use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_TITLE_LEN: usize = 255;
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("email is not valid")]
    InvalidEmail,
}

pub fn require_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

pub fn require_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required("email"));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "email",
            max: MAX_NAME_LEN,
        });
    }
    if !EMAIL_RE.is_match(value) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn require_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required("password"));
    }
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}

pub fn require_note_title(title: &str) -> Result<(), ValidationError> {
    require_text("title", title, MAX_TITLE_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(require_email("alice@example.com").is_ok());
        assert!(require_email("a.b+tag@mail.example.org").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert_eq!(require_email(""), Err(ValidationError::Required("email")));
        for bad in ["alice", "alice@", "@example.com", "alice@example", "a b@example.com"] {
            assert_eq!(require_email(bad), Err(ValidationError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn password_length_counts_characters() {
        assert_eq!(
            require_password("12345"),
            Err(ValidationError::PasswordTooShort(6))
        );
        assert!(require_password("123456").is_ok());
        assert!(require_password("пароль").is_ok());
    }

    #[test]
    fn blank_title_is_missing() {
        assert_eq!(
            require_note_title("   "),
            Err(ValidationError::Required("title"))
        );
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        assert_eq!(
            require_note_title(&long),
            Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN
            })
        );
        assert!(require_note_title(&"x".repeat(MAX_TITLE_LEN)).is_ok());
    }
}
