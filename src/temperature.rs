/// Longest legal temperature literal, `-99.9`.
pub const MAX_TEMPERATURE_LEN: usize = 5;

/// Parses a `-?\d{1,2}\.\d` literal into tenths of a degree, `None` otherwise.
#[inline]
pub fn parse_temperature(input: &[u8]) -> Option<i32> {
    let (negative, digits) = match input.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, input),
    };
    let (integer, fraction) = match digits {
        [integer @ .., b'.', fraction] => (integer, *fraction),
        _ => return None,
    };
    if integer.is_empty() || integer.len() > 2 || !fraction.is_ascii_digit() {
        return None;
    }

    let mut value = 0i32;
    for &byte in integer {
        if !byte.is_ascii_digit() {
            return None;
        }
        value = value * 10 + (byte - b'0') as i32;
    }
    value = value * 10 + (fraction - b'0') as i32;

    Some(if negative { -value } else { value })
}
