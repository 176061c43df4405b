use phonenumber::Mode;
use regex::Regex;

/// Reserved placeholder shown by the UI for an already-verified SSN.
/// Sending it on update would overwrite the stored value with the mask, so
/// the user service drops it from outgoing payloads (see
/// `UserService::update_user_data`). The 999 area number is never issued.
pub const UNKNOWN_VALID_SSN: &str = "999-99-9999";

/// Validate email address format.
///
/// Checks for minimum length, the presence of `@` and a dot, and a
/// simplified RFC 5322 shape.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 5 || !email.contains('@') || !email.contains('.') {
        return false;
    }

    // RFC 5322 simplified email regex, matches local@domain.tld
    let email_regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();

    if !email_regex.is_match(email) {
        tracing::debug!("Invalid email format: {}", email);
        return false;
    }

    true
}

/// Validate an SSN in `AAA-GG-SSSS` or bare 9-digit form. All-zero area,
/// group, or serial parts are never issued.
pub fn is_valid_ssn(ssn: &str) -> bool {
    let ssn_regex = Regex::new(r"^\d{3}-?\d{2}-?\d{4}$").unwrap();
    if !ssn_regex.is_match(ssn) {
        return false;
    }
    let digits: String = ssn.chars().filter(|c| c.is_ascii_digit()).collect();
    &digits[0..3] != "000" && &digits[3..5] != "00" && &digits[5..9] != "0000"
}

/// Validate and normalize a phone number to E.164 using the country
/// calling code from the phone data point (`-1` means unset, in which case
/// the raw value must already carry its own `+` prefix).
///
/// Returns `None` when the number cannot be parsed or is not valid.
pub fn normalize_phone(country_code: i32, raw: &str) -> Option<String> {
    if raw.trim().is_empty() || raw.len() < 5 {
        return None;
    }
    let candidate = if country_code > 0 && !raw.trim_start().starts_with('+') {
        format!("+{}{}", country_code, raw)
    } else {
        raw.to_string()
    };
    match phonenumber::parse(None, &candidate) {
        Ok(number) if phonenumber::is_valid(&number) => {
            let formatted = number.format().mode(Mode::E164).to_string();
            tracing::debug!("Normalized phone {} to {}", raw, formatted);
            Some(formatted)
        }
        Ok(_) => {
            tracing::debug!("Invalid phone number: {}", raw);
            None
        }
        Err(e) => {
            tracing::debug!("Failed to parse phone '{}': {:?}", raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("test.user+tag@subdomain.example.co.uk"));
        assert!(is_valid_email("valid_email-2023@company.org"));
    }

    #[test]
    fn invalid_emails() {
        assert!(!is_valid_email("not_an_email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn ssn_formats() {
        assert!(is_valid_ssn("123-45-6789"));
        assert!(is_valid_ssn("123456789"));
        assert!(is_valid_ssn(UNKNOWN_VALID_SSN));
        assert!(!is_valid_ssn("000-45-6789"));
        assert!(!is_valid_ssn("123-00-6789"));
        assert!(!is_valid_ssn("123-45-0000"));
        assert!(!is_valid_ssn("12-345-6789"));
        assert!(!is_valid_ssn("123456"));
    }

    #[test]
    fn phone_normalization() {
        assert_eq!(
            normalize_phone(1, "6502530000").as_deref(),
            Some("+16502530000")
        );
        assert_eq!(
            normalize_phone(-1, "+16502530000").as_deref(),
            Some("+16502530000")
        );
        assert_eq!(normalize_phone(1, "123"), None);
        assert_eq!(normalize_phone(-1, ""), None);
    }
}
