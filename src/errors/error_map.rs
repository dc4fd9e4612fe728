/// How an error code is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorDescriptor {
    /// Localization key of the toast title.
    pub title: &'static str,
    /// Localization key of the toast body.
    pub message: &'static str,
    /// Prefer the server-supplied message over `message` when one exists.
    pub set_message: bool,
    /// Append the request correlation id as a footer.
    pub set_footer: bool,
}

const fn entry(title: &'static str, message: &'static str) -> ErrorDescriptor {
    ErrorDescriptor {
        title,
        message,
        set_message: false,
        set_footer: false,
    }
}

const UNKNOWN: ErrorDescriptor = ErrorDescriptor {
    title: "errors.unknown",
    message: "errors.unknown",
    set_message: true,
    set_footer: true,
};

/// Look up the descriptor for `code`; `None` for codes outside the vocabulary.
pub fn lookup(code: &str) -> Option<ErrorDescriptor> {
    let descriptor = match code {
        // Detected client-side.
        "NET_ERR" => entry("errors.net_err", "errors.net_err_msg"),
        "LOG_IN_AGAIN" => ErrorDescriptor {
            set_message: true,
            ..entry("errors.unauthorized", "errors.log_in_again")
        },
        "MISSING_TOKEN" => entry("errors.missing_token", "errors.missing_token_msg"),
        "required" => entry("errors.invalid_form", "errors.required"),

        // Backend vocabulary.
        "bad_request" => ErrorDescriptor {
            set_message: true,
            ..entry("errors.bad_request", "errors.bad_request_msg")
        },
        "account_not_found" => entry("errors.account_not_found", "errors.account_not_found_msg"),
        "invalid_credentials" => {
            entry("errors.invalid_credentials", "errors.invalid_credentials_msg")
        }
        "username_length_less_than_3" => {
            entry("errors.invalid_username", "errors.username_too_short")
        }
        "username_length_more_than_32" => {
            entry("errors.invalid_username", "errors.username_too_long")
        }
        "username_contains_invalid_characters" => {
            entry("errors.invalid_username", "errors.username_contains_invalid_chars")
        }
        "username_already_exists" => entry("errors.invalid_username", "errors.username_in_use"),
        "password_length_less_than_8" => {
            entry("errors.invalid_password", "errors.password_too_short")
        }
        "password_length_more_than_64" => {
            entry("errors.invalid_password", "errors.password_too_long")
        }
        "password_similarity" => entry("errors.invalid_password", "errors.password_too_similar"),
        "password_strength" => entry("errors.invalid_password", "errors.password_too_weak"),
        "invalid_email" => entry("errors.invalid_email", "errors.invalid_email_msg"),
        "email_already_exists" => entry("errors.invalid_email", "errors.email_in_use"),
        "email_not_verified" => entry("errors.email_not_verified", "errors.email_not_verified_msg"),
        "email_already_verified" => entry("errors.already_verified", ""),
        "cannot_send_verification_email" => {
            entry("errors.error_sending_email", "errors.cannot_send_verification_email")
        }
        "mail_not_enabled" => entry("errors.error_sending_email", "errors.mail_not_enabled"),
        "cannot_send_password_reset_email" => {
            entry("errors.error_sending_email", "errors.cannot_send_password_reset_email")
        }
        "password_reset_token_expired" => {
            entry("errors.token_expired", "errors.password_reset_token_expired")
        }
        "invalid_jwt" => entry("errors.invalid_token", "errors.invalid_jwt"),
        "invalid_password_reset_token" => {
            entry("errors.invalid_token", "errors.invalid_password_reset_token")
        }
        "invalid_verification_token" => {
            entry("errors.invalid_token", "errors.invalid_verification_token")
        }
        "unknown_error" => UNKNOWN,
        _ => return None,
    };
    Some(descriptor)
}

/// Descriptor for `code`, falling through to the `unknown_error` entry.
pub fn describe(code: &str) -> ErrorDescriptor {
    lookup(code).unwrap_or(UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_already_exists_has_no_overrides() {
        let d = describe("username_already_exists");
        assert_eq!(d.title, "errors.invalid_username");
        assert_eq!(d.message, "errors.username_in_use");
        assert!(!d.set_message);
        assert!(!d.set_footer);
    }

    #[test]
    fn unknown_codes_fall_through() {
        assert!(lookup("something_new").is_none());
        let d = describe("something_new");
        assert_eq!(d, describe("unknown_error"));
        assert!(d.set_message && d.set_footer);
    }

    #[test]
    fn log_in_again_prefers_server_message() {
        let d = describe("LOG_IN_AGAIN");
        assert!(d.set_message);
        assert!(!d.set_footer);
        assert_eq!(d.title, "errors.unauthorized");
    }
}
