//! Hybrid-36 encoding of fixed-width identifier fields.
//!
//! Legacy structure formats store atom and residue numbers in fixed-width
//! decimal columns, which overflow for large systems. The hybrid-36
//! convention extends such a field without changing its width: values that
//! fit in plain decimal are written as decimal, larger values continue in
//! base 36 first with upper-case digits (`A`–`Z` as 10–35), then with
//! lower-case digits. A `width`-character field thereby holds
//! `10^width - 1 + 2 * 26 * 36^(width - 1)` distinct non-negative values.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Hybrid36Error {
    #[error("cannot encode negative number {0} in hybrid-36 notation")]
    Negative(i64),
    #[error("number {number} exceeds the hybrid-36 capacity {max} of a width-{width} field")]
    Overflow { number: i64, width: usize, max: i64 },
    #[error("'{0}' is not a valid hybrid-36 field")]
    InvalidField(String),
    #[error("hybrid-36 field width must be positive")]
    ZeroWidth,
}

const UPPER_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The largest integer encodable in a `width`-character hybrid-36 field.
///
/// The decimal range contributes `10^width` values and each letter case
/// contributes `26 * 36^(width - 1)` more. For the common structure-format
/// widths this yields 2436111 (width 4) and 87440031 (width 5).
pub fn max_hybrid36_number(width: usize) -> i64 {
    if width == 0 {
        return 0;
    }
    let width = width as u32;
    10i64.pow(width) - 1 + 2 * 26 * 36i64.pow(width - 1)
}

/// Encodes a non-negative number as a fixed-width hybrid-36 field.
///
/// Numbers below `10^width` are written as zero-padded decimal; larger
/// numbers use the upper-case digit range, then the lower-case range.
///
/// # Errors
///
/// Returns [`Hybrid36Error::Negative`] for negative input,
/// [`Hybrid36Error::Overflow`] if the number exceeds
/// [`max_hybrid36_number`], and [`Hybrid36Error::ZeroWidth`] for a
/// zero-width field.
pub fn encode_hybrid36(number: i64, width: usize) -> Result<String, Hybrid36Error> {
    if width == 0 {
        return Err(Hybrid36Error::ZeroWidth);
    }
    if number < 0 {
        return Err(Hybrid36Error::Negative(number));
    }

    let decimal_limit = 10i64.pow(width as u32);
    if number < decimal_limit {
        return Ok(format!("{:0width$}", number, width = width));
    }

    // Offset into the letter ranges; each starts at 10 * 36^(width-1) so the
    // leading character is a letter, never a digit.
    let range_size = 26 * 36i64.pow(width as u32 - 1);
    let first_letter_value = 10 * 36i64.pow(width as u32 - 1);

    let past_decimal = number - decimal_limit;
    if past_decimal < range_size {
        return Ok(encode_base36(
            past_decimal + first_letter_value,
            width,
            UPPER_DIGITS,
        ));
    }

    let past_upper = past_decimal - range_size;
    if past_upper < range_size {
        return Ok(encode_base36(
            past_upper + first_letter_value,
            width,
            LOWER_DIGITS,
        ));
    }

    Err(Hybrid36Error::Overflow {
        number,
        width,
        max: max_hybrid36_number(width),
    })
}

/// Decodes a hybrid-36 field back into its number.
///
/// Surrounding whitespace is ignored, so both zero-padded and space-padded
/// fields decode; the field width is the trimmed length. Plain decimal
/// fields (including negative ones, which occur in legacy residue-number
/// columns) parse as decimal.
///
/// # Errors
///
/// Returns [`Hybrid36Error::InvalidField`] for empty, mixed-case or
/// otherwise malformed input.
pub fn decode_hybrid36(string: &str) -> Result<i64, Hybrid36Error> {
    let field = string.trim();
    let invalid = || Hybrid36Error::InvalidField(string.to_string());

    let first = field.chars().next().ok_or_else(invalid)?;
    let width = field.len() as u32;

    if first.is_ascii_digit() || first == '-' {
        return field.parse::<i64>().map_err(|_| invalid());
    }
    if first.is_ascii_uppercase() {
        let value = parse_base36(field, |c| {
            c.to_digit(36).filter(|_| !c.is_ascii_lowercase())
        })
        .ok_or_else(invalid)?;
        return Ok(value - 10 * 36i64.pow(width - 1) + 10i64.pow(width));
    }
    if first.is_ascii_lowercase() {
        let value = parse_base36(field, |c| {
            c.to_digit(36).filter(|_| !c.is_ascii_uppercase())
        })
        .ok_or_else(invalid)?;
        return Ok(value - 10 * 36i64.pow(width - 1)
            + 10i64.pow(width)
            + 26 * 36i64.pow(width - 1));
    }
    Err(invalid())
}

fn encode_base36(mut value: i64, width: usize, digits: &[u8; 36]) -> String {
    let mut field = vec![digits[0]; width];
    for slot in field.iter_mut().rev() {
        *slot = digits[(value % 36) as usize];
        value /= 36;
    }
    field.iter().map(|&b| b as char).collect()
}

fn parse_base36(field: &str, digit_value: impl Fn(char) -> Option<u32>) -> Option<i64> {
    let mut value: i64 = 0;
    for c in field.chars() {
        value = value.checked_mul(36)? + digit_value(c)? as i64;
    }
    Some(value)
}
