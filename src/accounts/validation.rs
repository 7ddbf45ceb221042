//! Length checks applied to submitted credentials before anything touches storage.
//!
//! Lengths are counted in characters, not bytes. Neither check looks at the
//! format of the email or the complexity of the password.

/// An email must be strictly shorter than this many characters.
pub const EMAIL_MAX_LEN: usize = 50;
/// A password must be strictly longer than this many characters.
pub const PASSWORD_MIN_LEN: usize = 6;

pub const EMAIL_AND_PASSWORD_INVALID: &str = "Email is too long and password is too short";
pub const EMAIL_INVALID: &str = "Email is too long";
pub const PASSWORD_INVALID: &str = "Password is too short";

pub fn validate_email_length(email: &str) -> bool {
    email.chars().count() < EMAIL_MAX_LEN
}

pub fn validate_password_length(password: &str) -> bool {
    password.chars().count() > PASSWORD_MIN_LEN
}

/// Message shown to the user for a pair of check results. Empty when both passed.
pub fn describe_validation_failure(email_ok: bool, password_ok: bool) -> &'static str {
    match (email_ok, password_ok) {
        (false, false) => EMAIL_AND_PASSWORD_INVALID,
        (false, true) => EMAIL_INVALID,
        (true, false) => PASSWORD_INVALID,
        (true, true) => "",
    }
}

pub fn check_credentials(email: &str, password: &str) -> Result<(), &'static str> {
    let email_ok = validate_email_length(email);
    let password_ok = validate_password_length(password);
    if email_ok && password_ok {
        Ok(())
    } else {
        Err(describe_validation_failure(email_ok, password_ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_must_exceed_six_chars() {
        for len in 0..=PASSWORD_MIN_LEN {
            assert!(!validate_password_length(&"p".repeat(len)), "len {len}");
        }
        for len in PASSWORD_MIN_LEN + 1..PASSWORD_MIN_LEN + 20 {
            assert!(validate_password_length(&"p".repeat(len)), "len {len}");
        }
    }

    #[test]
    fn email_must_stay_under_fifty_chars() {
        for len in 0..EMAIL_MAX_LEN {
            assert!(validate_email_length(&"e".repeat(len)), "len {len}");
        }
        for len in EMAIL_MAX_LEN..EMAIL_MAX_LEN + 20 {
            assert!(!validate_email_length(&"e".repeat(len)), "len {len}");
        }
    }

    #[test]
    fn empty_email_passes_the_length_check() {
        assert!(validate_email_length(""));
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 7 chars, 14 bytes
        assert!(validate_password_length("пароль1"));
        // 49 chars, 98 bytes
        assert!(validate_email_length(&"ж".repeat(49)));
    }

    #[test]
    fn describe_covers_every_combination() {
        assert_eq!(describe_validation_failure(false, false), EMAIL_AND_PASSWORD_INVALID);
        assert_eq!(describe_validation_failure(false, true), EMAIL_INVALID);
        assert_eq!(describe_validation_failure(true, false), PASSWORD_INVALID);
        assert_eq!(describe_validation_failure(true, true), "");

        for email_ok in [false, true] {
            for password_ok in [false, true] {
                assert_eq!(
                    describe_validation_failure(email_ok, password_ok),
                    describe_validation_failure(email_ok, password_ok)
                );
            }
        }
    }

    #[test]
    fn check_credentials_reports_combined_message() {
        let long_email = format!("{}@example.com", "a".repeat(60));
        assert_eq!(
            check_credentials(&long_email, "short"),
            Err(EMAIL_AND_PASSWORD_INVALID)
        );
        assert_eq!(check_credentials("a@b.io", "short"), Err(PASSWORD_INVALID));
        assert_eq!(check_credentials(&long_email, "long-enough"), Err(EMAIL_INVALID));
        assert_eq!(check_credentials("a@b.io", "long-enough"), Ok(()));
    }
}
