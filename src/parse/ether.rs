// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{strings::*, Opt, ParseError, Value};
use crate::Session;
use lazy_static::lazy_static;
use regex::Regex;

/// Octets in an ethernet address.
pub const ETH_ALEN: usize = 6;

lazy_static! {
    static ref ETHER: Regex =
        Regex::new(r"^[0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5}$").expect("ethernet address regex");
}

/**
Parse the `xx:xx:xx:xx:xx:xx` form of an ethernet address: exactly six
two-digit hex groups separated by colons, 17 characters in total.
*/
pub fn ether_octets(s: &str) -> Result<[u8; ETH_ALEN], ParseError> {
    let invalid = || ParseError::InvalidEther(s.to_string());
    if s.len() != ETH_ALEN * 3 - 1 || !ETHER.is_match(s) {
        return Err(invalid());
    }

    let mut ether: [u8; ETH_ALEN] = [0; ETH_ALEN];
    for (octet, group) in ether.iter_mut().zip(s.split(ETHER_SEPARATOR)) {
        *octet = u8::from_str_radix(group, 16).map_err(|_| invalid())?;
    }
    Ok(ether)
}

/// Parse an ethernet address into the `Ether` option.
pub fn parse_ether(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    debug_assert!(opt == Opt::Ether);
    let res = ether_octets(s).and_then(|ether: [u8; ETH_ALEN]| {
        session
            .data_set(opt, Value::Ether(ether))
            .map_err(ParseError::from)
    });
    session.record(res)
}

/* -------------------------------------------------------------------------- */
