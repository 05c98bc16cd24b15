// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{strings::*, Opt, ParseError, Value};
use crate::{session::owned_name, Session, MAXNAMELEN};

/// Set names hold at most `MAXNAMELEN - 1` characters.
pub(crate) fn check_setname(name: &str) -> Result<(), ParseError> {
    if name.len() > MAXNAMELEN - 1 {
        return Err(ParseError::NameTooLong {
            name: name.to_string(),
            max: MAXNAMELEN - 1,
        });
    }
    Ok(())
}

fn store_name(session: &mut Session, opt: Opt, name: &str) -> Result<(), ParseError> {
    check_setname(name)?;
    let name: String = owned_name(name)?;
    session.data_set(opt, Value::Name(name))?;
    Ok(())
}

/**
`setname` or `setname,before|after,setname`.

Each name is checked and stored in turn: a bad reference name leaves the
first one stored.
*/
fn name_ref(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    if opt == Opt::SetName2 {
        return store_name(session, opt, s);
    }

    let mut parts = s.splitn(3, ELEM_SEPARATOR);
    let name: &str = parts.next().unwrap_or(s);
    let reference: Option<(&str, bool)> = match (parts.next(), parts.next()) {
        (None, _) => None,
        (Some(pos), Some(other)) if pos == BEFORE || pos == AFTER => Some((other, pos == BEFORE)),
        _ => return Err(ParseError::NamePattern(s.into())),
    };

    store_name(session, opt, name)?;
    if let Some((other, before)) = reference {
        store_name(session, Opt::NameRef, other)?;
        session.data_set(Opt::Before, Value::Bool(before))?;
    }
    Ok(())
}

/**
Parse a set name as an element, recognizing `setname,before|after,setname`.

With `Opt::Name` the first name goes to `Name`, the reference to `NameRef`
and the position to `Before`. With `Opt::SetName2` the whole string is a
plain set name.
*/
pub fn parse_name(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    debug_assert!(matches!(opt, Opt::Name | Opt::SetName2));
    let res = name_ref(session, opt, s);
    session.record(res)
}

/// Parse the name of the set the command works on.
pub fn parse_setname(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    debug_assert!(opt == Opt::SetName);
    let res = store_name(session, opt, s);
    session.record(res)
}

/* -------------------------------------------------------------------------- */
