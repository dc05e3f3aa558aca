//! Boot-time parser.
//!
//! Accepts exactly `H:M:S` with one or more ASCII digits per field. Minutes
//! and seconds must be below 60; hours are not range checked, so elapsed
//! times past midnight (`26:00:00`) are accepted.

use crate::error::JigError;

/// Parse an operator-entered `HH:MM:SS` into seconds since midnight.
///
/// Leading zeros are optional (`"7:5:9"` equals `"07:05:09"`). Any other
/// character, a missing or extra field, or a value that does not fit in a
/// `u32` yields [`JigError::InvalidFormat`].
pub fn parse_boot_time(input: &str) -> Result<u32, JigError> {
    let mut fields = input.split(':');

    let hours = parse_field(fields.next())?;
    let minutes = parse_field(fields.next())?;
    let seconds = parse_field(fields.next())?;

    if fields.next().is_some() || minutes >= 60 || seconds >= 60 {
        return Err(JigError::InvalidFormat);
    }

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or(JigError::InvalidFormat)
}

fn parse_field(field: Option<&str>) -> Result<u32, JigError> {
    let field = field.ok_or(JigError::InvalidFormat)?;
    if field.is_empty() {
        return Err(JigError::InvalidFormat);
    }

    field
        .bytes()
        .try_fold(0u32, |acc, b| {
            if !b.is_ascii_digit() {
                return None;
            }
            acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))
        })
        .ok_or(JigError::InvalidFormat)
}
