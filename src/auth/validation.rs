//! Registration form checks, reported with the backend's error codes so the
//! same error map entries apply.

use std::collections::BTreeMap;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;
const EMAIL_MAX: usize = 100;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 64;

pub fn validate_username(username: &str) -> Option<&'static str> {
    let len = username.chars().count();
    if len == 0 {
        Some("required")
    } else if len < USERNAME_MIN {
        Some("username_length_less_than_3")
    } else if len > USERNAME_MAX {
        Some("username_length_more_than_32")
    } else if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some("username_contains_invalid_characters")
    } else {
        None
    }
}

pub fn validate_email(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        return Some("required");
    }
    if email.chars().count() > EMAIL_MAX || !plausible_email(email) {
        return Some("invalid_email");
    }
    None
}

fn plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

pub fn validate_password(password: &str) -> Option<&'static str> {
    let len = password.chars().count();
    if len == 0 {
        return Some("required");
    }
    if len < PASSWORD_MIN {
        return Some("password_length_less_than_8");
    }
    if len > PASSWORD_MAX {
        return Some("password_length_more_than_64");
    }
    let lower = password.chars().any(|c| c.is_lowercase());
    let upper = password.chars().any(|c| c.is_uppercase());
    let digit = password.chars().any(|c| c.is_numeric());
    let special = password.chars().any(|c| !c.is_alphanumeric());
    if lower && upper && digit && special {
        None
    } else {
        Some("password_strength")
    }
}

/// Check a registration form. Keys are field names, values the failing
/// codes; empty when the form is acceptable.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
) -> BTreeMap<String, Vec<String>> {
    [
        ("username", validate_username(username)),
        ("email", validate_email(email)),
        ("password", validate_password(password)),
    ]
    .into_iter()
    .filter_map(|(field, code)| code.map(|c| (field.to_string(), vec![c.to_string()])))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert_eq!(validate_username(""), Some("required"));
        assert_eq!(validate_username("al"), Some("username_length_less_than_3"));
        assert_eq!(validate_username(&"a".repeat(33)), Some("username_length_more_than_32"));
        assert_eq!(validate_username("al ice"), Some("username_contains_invalid_characters"));
        assert_eq!(validate_username("alice_01.x-y"), None);
    }

    #[test]
    fn email_rules() {
        assert_eq!(validate_email("alice@example.com"), None);
        assert_eq!(validate_email("alice"), Some("invalid_email"));
        assert_eq!(validate_email("alice@localhost"), Some("invalid_email"));
        assert_eq!(validate_email("@example.com"), Some("invalid_email"));
        let long = format!("{}@example.com", "a".repeat(95));
        assert_eq!(validate_email(&long), Some("invalid_email"));
    }

    #[test]
    fn password_rules() {
        assert_eq!(validate_password("Ab1!"), Some("password_length_less_than_8"));
        assert_eq!(validate_password(&"Ab1!".repeat(17)), Some("password_length_more_than_64"));
        assert_eq!(validate_password("abcdefgh1!"), Some("password_strength"));
        assert_eq!(validate_password("Correct-Horse-9"), None);
    }

    #[test]
    fn any_script_numeral_counts_as_a_digit() {
        assert_eq!(validate_password("Abcdefg\u{663}!"), None);
        assert_eq!(validate_password("Abcdefg\u{2163}!"), None);
    }

    #[test]
    fn registration_collects_every_failing_field() {
        let errors = validate_registration("al", "alice@example.com", "weak");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["username"], vec!["username_length_less_than_3"]);
        assert_eq!(errors["password"], vec!["password_length_less_than_8"]);
        assert!(validate_registration("alice", "alice@example.com", "Correct-Horse-9").is_empty());
    }
}
