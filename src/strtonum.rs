// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::ParseError;

/// Split off a `0x`/`0X` (hex) or leading `0` (octal) prefix.
fn split_radix(s: &str) -> (&str, u32) {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    }
}

/**
Converts a string to an unsigned number within the inclusive bounds `min..=max`.

The base is taken from the prefix of the string, the way C's `strtoull()` does
with base 0: `0x` or `0X` means hexadecimal, a leading `0` octal and anything
else decimal. The whole string must be consumed: no sign, no whitespace and
no trailing garbage.

# Arguments

* `s`: the string to parse.
* `min`: the smallest accepted value.
* `max`: the largest accepted value, `0` meaning "up to [u64::MAX]".

# Errors
 * [ParseError::InvalidNumber] if the string is not a number in its base
 * [ParseError::OutOfRange] if the number overflows or falls outside the bounds.
   Without an explicit `max` the reported upper bound is [u64::MAX].
*/
pub fn str_to_number(s: &str, min: u64, max: u64) -> Result<u64, ParseError> {
    let (digits, radix) = split_radix(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ParseError::InvalidNumber(s.to_string()));
    }

    let upper: u64 = if max == 0 { u64::MAX } else { max };
    let out_of_range = || ParseError::OutOfRange {
        val: s.to_string(),
        min,
        max: upper,
    };

    // only overflow is left as a failure mode after the digit check above
    let num: u64 = u64::from_str_radix(digits, radix).map_err(|_| out_of_range())?;
    if num < min || num > upper {
        return Err(out_of_range());
    }
    Ok(num)
}

/**
Convert a string to a `u32` within `min..=max`.

Wrapper around [str_to_number]; `max = 0` means [u32::MAX] here, so the
result never needs truncating.
*/
pub fn str_to_u32(s: &str, min: u32, max: u32) -> Result<u32, ParseError> {
    let max: u32 = if max == 0 { u32::MAX } else { max };
    str_to_number(s, min.into(), max.into()).map(|n: u64| n as u32)
}

/// Convert a string to a `u16` within `min..=max`; `max = 0` means [u16::MAX].
pub fn str_to_u16(s: &str, min: u16, max: u16) -> Result<u16, ParseError> {
    let max: u16 = if max == 0 { u16::MAX } else { max };
    str_to_number(s, min.into(), max.into()).map(|n: u64| n as u16)
}

/// Convert a string to a `u8` within `min..=max`; `max = 0` means [u8::MAX].
pub fn str_to_u8(s: &str, min: u8, max: u8) -> Result<u8, ParseError> {
    let max: u8 = if max == 0 { u8::MAX } else { max };
    str_to_number(s, min.into(), max.into()).map(|n: u64| n as u8)
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    #[test]
    fn test_bases() {
        let tests: Vec<(&str, u64)> = vec![
            ("0",           0),
            ("42",          42),
            ("0x2a",        42),
            ("0X2A",        42),
            ("052",         42),
            ("00",          0),
            ("65535",       65535),
            ("0xffffffff",  u32::MAX as u64),
        ];
        for (input, expected) in tests {
            assert_eq!(str_to_number(input, 0, 0), Ok(expected), "Failed: '{input}'");
        }
    }

    #[test]
    fn test_invalid() {
        for input in ["", "12a", "0x", "08", "-1", "+1", " 1", "1 ", "0x+1", "ten"] {
            assert_eq!(
                str_to_number(input, 0, 0),
                Err(ParseError::InvalidNumber(input.to_string())),
                "Failed: '{input}'"
            );
        }
    }

    #[test]
    fn test_bounds() {
        assert_eq!(str_to_number("5", 5, 10), Ok(5));
        assert_eq!(str_to_number("10", 5, 10), Ok(10));
        let err: ParseError = str_to_number("11", 5, 10).unwrap_err();
        assert_eq!(err.to_string(), "Syntax error: '11' is out of range 5-10");
        assert!(str_to_number("4", 5, 10).is_err());
    }

    #[test]
    fn test_overflow_reports_max() {
        let err: ParseError = str_to_number("18446744073709551616", 0, 0).unwrap_err();
        assert_eq!(
            err,
            ParseError::OutOfRange {
                val: "18446744073709551616".into(),
                min: 0,
                max: u64::MAX
            }
        );
        assert_eq!(str_to_number("18446744073709551615", 0, 0), Ok(u64::MAX));
    }

    #[test]
    fn test_narrow() {
        assert_eq!(str_to_u8("255", 0, 0), Ok(255));
        assert!(matches!(
            str_to_u8("256", 0, 0),
            Err(ParseError::OutOfRange { max: 255, .. })
        ));
        assert_eq!(str_to_u16("0xffff", 0, 0), Ok(65535));
        assert!(str_to_u16("65536", 0, 65535).is_err());
        assert_eq!(str_to_u32("4294967295", 0, 0), Ok(u32::MAX));
        assert!(matches!(
            str_to_u32("4294967296", 0, 0),
            Err(ParseError::OutOfRange { max: 4294967295, .. })
        ));
    }
}
