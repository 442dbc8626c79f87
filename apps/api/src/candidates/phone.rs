//! Phone number validation. Candidates are stored with a normalized E.164
//! number or not at all.

use crate::errors::AppError;

/// Parses and validates `raw` as an international number, returning the
/// normalized E.164 form. Numbers without a leading `+` are rejected since
/// no default region is assumed.
pub fn to_e164(raw: &str) -> Result<String, AppError> {
    let parsed = phonenumber::parse(None, raw)
        .map_err(|_| AppError::Validation(format!("'{raw}' is not a parseable phone number")))?;

    if !phonenumber::is_valid(&parsed) {
        return Err(AppError::Validation(format!(
            "'{raw}' is not a valid E.164 phone number"
        )));
    }

    Ok(parsed.format().mode(phonenumber::Mode::E164).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_number_passes_through() {
        assert_eq!(to_e164("+919876543210").unwrap(), "+919876543210");
    }

    #[test]
    fn test_formatting_noise_is_normalized_away() {
        assert_eq!(to_e164("+91 98765 43210").unwrap(), "+919876543210");
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(to_e164("not-a-phone"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_too_short_number_is_rejected() {
        assert!(matches!(to_e164("+1234"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_number_without_country_code_is_rejected() {
        assert!(matches!(to_e164("9876543210"), Err(AppError::Validation(_))));
    }
}
