//! Ticket quantity parsing and validation

use crate::types::TicketSelection;

/// Parse a selected quantity with integer-prefix semantics
///
/// Leading whitespace is skipped, an optional sign is accepted, and the
/// leading run of ASCII digits is read. Trailing garbage is ignored
/// (`"4abc"` is 4); a value with no leading digits is unparsable.
pub fn parse_quantity(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    // Only overflow can fail here: clamp like a float-backed parse would
    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Whether any selected quantity is a positive integer
pub fn has_any_ticket(selection: &TicketSelection) -> bool {
    selection
        .iter()
        .any(|(_, value)| parse_quantity(value).is_some_and(|q| q > 0))
}
