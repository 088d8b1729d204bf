use std::fmt;

use thiserror::Error;

/// A phone number as captured by a form: international calling code and the
/// subscriber number, kept separate until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    country_code: String,
    number: String,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PhoneParseError {
    #[error("El teléfono es requerido")]
    Empty,
    #[error("El teléfono contiene caracteres inválidos")]
    InvalidCharacters,
    #[error("El teléfono debe tener al menos {} dígitos", PhoneNumber::MIN_DIGITS)]
    TooShort,
    #[error("El teléfono no puede superar los {} dígitos", PhoneNumber::MAX_DIGITS)]
    TooLong,
}

impl PhoneNumber {
    pub const MIN_DIGITS: usize = 8;
    pub const MAX_DIGITS: usize = 15;

    /// Validates the subscriber number: only digits, whitespace, dashes,
    /// plus signs and parentheses are accepted, and the digit count must
    /// lie within `MIN_DIGITS..=MAX_DIGITS`.
    pub fn new(country_code: &str, number: &str) -> Result<Self, PhoneParseError> {
        let number = number.trim();
        if number.is_empty() {
            return Err(PhoneParseError::Empty);
        }
        if !number
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || "-+()".contains(c))
        {
            return Err(PhoneParseError::InvalidCharacters);
        }
        let digits = number.chars().filter(char::is_ascii_digit).count();
        if digits < Self::MIN_DIGITS {
            return Err(PhoneParseError::TooShort);
        }
        if digits > Self::MAX_DIGITS {
            return Err(PhoneParseError::TooLong);
        }
        Ok(Self {
            country_code: country_code.trim().trim_start_matches('+').to_owned(),
            number: number.to_owned(),
        })
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// The flattened wire representation: calling code followed by the
    /// subscriber digits, e.g. `541123456789`.
    pub fn full_number(&self) -> String {
        let digits: String = self.number.chars().filter(|c| c.is_ascii_digit()).collect();
        format!("{}{}", self.country_code, digits)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "+{} {}", self.country_code, self.number)
    }
}

/// Pretty-prints a flattened number for display: `+CC AA NUMBER`, assuming
/// a two-digit calling code and a two-digit area code. Numbers too short to
/// split are returned unchanged.
pub fn format_argentine_phone(full_number: &str) -> String {
    let digits: String = full_number
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.len() < 5 {
        return full_number.to_owned();
    }
    format!("+{} {} {}", &digits[..2], &digits[2..4], &digits[4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_empty_number() {
        assert_eq!(PhoneNumber::new("54", "  "), Err(PhoneParseError::Empty));
    }

    #[test]
    fn reject_invalid_characters() {
        assert_eq!(
            PhoneNumber::new("54", "11-2345-678x"),
            Err(PhoneParseError::InvalidCharacters)
        );
    }

    #[test]
    fn digit_count_bounds() {
        assert_eq!(PhoneNumber::new("54", "1234567"), Err(PhoneParseError::TooShort));
        assert_eq!(
            PhoneNumber::new("54", "1234567890123456"),
            Err(PhoneParseError::TooLong)
        );
        assert!(PhoneNumber::new("54", "12345678").is_ok());
    }

    #[test]
    fn punctuation_is_stripped_from_the_wire_form() {
        let phone = PhoneNumber::new("+54", "(11) 2345-6789").unwrap();
        assert_eq!(phone.full_number(), "541123456789");
    }

    #[test]
    fn format_for_display() {
        assert_eq!(format_argentine_phone("541123456789"), "+54 11 23456789");
        assert_eq!(format_argentine_phone("123"), "123");
    }
}
