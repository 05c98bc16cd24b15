// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Family, Opt, ParseError, Value};
use crate::{
    session::owned_name,
    settypes::TypeSchema,
    strtonum::{str_to_u32, str_to_u8},
    OutputMode, Session, MAXNAMELEN,
};
use std::sync::Arc;
use tracing::debug;

/// Parse an address family name: `inet`/`ipv4`/`-4`, `inet6`/`ipv6`/`-6` or `any`/`unspec`.
pub fn parse_family(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    debug_assert!(opt == Opt::Family);
    let res = match s {
        "inet" | "ipv4" | "-4" => Ok(Family::V4),
        "inet6" | "ipv6" | "-6" => Ok(Family::V6),
        "any" | "unspec" => Ok(Family::Any),
        _ => Err(ParseError::UnknownFamily(s.into())),
    }
    .and_then(|fam: Family| session.data_set(opt, Value::Family(fam)).map_err(ParseError::from));
    session.record(res)
}

/**
Parse a netmask length. The bounds depend on the family, which is fixed to
IPv4 if nothing set it yet: `1..=31` for IPv4 and `4..=124` for IPv6.
*/
pub fn parse_netmask(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    debug_assert!(opt == Opt::Netmask);
    let (min, max) = session.infer_family().netmask_bounds();
    let res = str_to_u8(s, min, max)
        .map_err(|_| ParseError::Netmask {
            val: s.into(),
            min,
            max,
        })
        .and_then(|mask: u8| session.data_set(opt, Value::U8(mask)).map_err(ParseError::from));
    session.record(res)
}

/// Parse an output mode name (`plain`, `save` or `xml`) and switch the session to it.
pub fn parse_output(session: &mut Session, _opt: Opt, s: &str) -> Result<(), ParseError> {
    let mode: OutputMode = match s {
        "plain" => OutputMode::Plain,
        "save" => OutputMode::Save,
        "xml" => OutputMode::Xml,
        _ => return session.record(Err(ParseError::UnknownOutput(s.into()))),
    };
    session.set_output(mode);
    Ok(())
}

/// Record the presence of a flag option. The string is ignored.
pub fn parse_flag(session: &mut Session, opt: Opt, _s: &str) -> Result<(), ParseError> {
    let res = session.data_set(opt, Value::Flag).map_err(ParseError::from);
    session.record(res)
}

/// Parse an unsigned 8-bit number.
pub fn parse_uint8(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    let res = str_to_u8(s, 0, 255).and_then(|n: u8| session.data_set(opt, Value::U8(n)).map_err(ParseError::from));
    session.record(res)
}

/// Parse an unsigned 32-bit number.
pub fn parse_uint32(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    let res = str_to_u32(s, 0, 0).and_then(|n: u32| session.data_set(opt, Value::U32(n)).map_err(ParseError::from));
    session.record(res)
}

fn typename(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    if s.len() > MAXNAMELEN - 1 {
        return Err(ParseError::TypeNameTooLong {
            name: s.into(),
            max: MAXNAMELEN - 1,
        });
    }
    let ty: Arc<TypeSchema> = session
        .registry()
        .get(s)
        .ok_or_else(|| ParseError::UnknownType(s.into()))?;
    debug!("typename {s} -> {} revision {}", ty.name, ty.revision);

    let fam: Family = session.family();
    if ty.family != Family::Any && fam != Family::Any && fam != ty.family {
        return Err(ParseError::TypeFamily {
            typename: ty.name,
            fam,
        });
    }

    session.data_set(opt, Value::Name(owned_name(ty.name)?))?;
    session.bind_type(ty);
    Ok(())
}

/**
Parse a set type name, old (`portmap`) or new (`bitmap:port`) style.

The type is looked up in the registry of the session, the canonical name is
stored under `TypeName` and the type is bound to the session, which makes
[parse_elem](crate::parse_elem) usable.
*/
pub fn parse_typename(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    debug_assert!(opt == Opt::TypeName);
    let res = typename(session, opt, s);
    session.record(res)
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, StoreError};

    #[rustfmt::skip]
    #[test]
    fn test_family() {
        let tests: Vec<(&str, Family)> = vec![
            ("inet", Family::V4),   ("ipv4", Family::V4),   ("-4", Family::V4),
            ("inet6", Family::V6),  ("ipv6", Family::V6),   ("-6", Family::V6),
            ("any", Family::Any),   ("unspec", Family::Any),
        ];
        for (input, expected) in tests {
            let mut s: Session = Session::new();
            parse_family(&mut s, Opt::Family, input).unwrap();
            assert_eq!(s.family(), expected, "Failed: '{input}'");
            assert!(s.data().is_set(Opt::Family));
        }
    }

    #[test]
    fn test_family_unknown() {
        let mut s: Session = Session::new();
        for input in ["INET", "inet4", ""] {
            let err: ParseError = parse_family(&mut s, Opt::Family, input).unwrap_err();
            assert_eq!(err, ParseError::UnknownFamily(input.into()));
        }
        assert_eq!(
            s.report().errors().next(),
            Some("Syntax error: unknown INET family: 'INET'")
        );
    }

    #[test]
    fn test_netmask_v4() {
        let mut s: Session = Session::new();
        for input in ["0", "32"] {
            let err: ParseError = parse_netmask(&mut s, Opt::Netmask, input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Range);
            assert_eq!(
                err.to_string(),
                format!("Syntax error: netmask is out of the inclusive range of 1-31: '{input}'")
            );
        }
        // defaulted on first use
        assert_eq!(s.family(), Family::V4);

        parse_netmask(&mut s, Opt::Netmask, "31").unwrap();
        assert_eq!(s.data().u8(Opt::Netmask), Some(31));
        assert!(parse_netmask(&mut s, Opt::Netmask, "abc").is_err());
    }

    #[test]
    fn test_netmask_v6() {
        let mut s: Session = Session::new();
        parse_family(&mut s, Opt::Family, "inet6").unwrap();
        assert!(parse_netmask(&mut s, Opt::Netmask, "3").is_err());
        assert!(parse_netmask(&mut s, Opt::Netmask, "125").is_err());
        parse_netmask(&mut s, Opt::Netmask, "64").unwrap();
        assert_eq!(s.data().u8(Opt::Netmask), Some(64));
    }

    #[test]
    fn test_output() {
        let mut s: Session = Session::new();
        assert_eq!(s.output(), OutputMode::None);
        parse_output(&mut s, Opt::SetName, "xml").unwrap();
        assert_eq!(s.output(), OutputMode::Xml);
        parse_output(&mut s, Opt::SetName, "save").unwrap();
        assert_eq!(s.output(), OutputMode::Save);
        assert_eq!(
            parse_output(&mut s, Opt::SetName, "json"),
            Err(ParseError::UnknownOutput("json".into()))
        );
        assert_eq!(s.output(), OutputMode::Save);
    }

    #[test]
    fn test_flag() {
        let mut s: Session = Session::new();
        parse_flag(&mut s, Opt::Exist, "whatever").unwrap();
        assert_eq!(s.data().get(Opt::Exist), Some(&Value::Flag));
        let err: ParseError = parse_flag(&mut s, Opt::Port, "").unwrap_err();
        assert!(matches!(err, ParseError::Store(StoreError::Mismatch { .. })));
        assert_eq!(err.kind(), ErrorKind::Store);
    }

    #[test]
    fn test_uints() {
        let mut s: Session = Session::new();
        parse_uint8(&mut s, Opt::Probes, "0x10").unwrap();
        assert_eq!(s.data().u8(Opt::Probes), Some(16));
        assert!(parse_uint8(&mut s, Opt::Probes, "256").is_err());

        parse_uint32(&mut s, Opt::Timeout, "600").unwrap();
        assert_eq!(s.data().u32(Opt::Timeout), Some(600));
        parse_uint32(&mut s, Opt::Timeout, "4294967295").unwrap();
        let err: ParseError = parse_uint32(&mut s, Opt::Timeout, "4294967296").unwrap_err();
        assert_eq!(err.to_string(), "Syntax error: '4294967296' is out of range 0-4294967295");
        assert_eq!(s.data().u32(Opt::Timeout), Some(u32::MAX));
    }

    #[test]
    fn test_typename() {
        let mut s: Session = Session::new();
        parse_typename(&mut s, Opt::TypeName, "portmap").unwrap();
        assert_eq!(s.data().name(Opt::TypeName), Some("bitmap:port"));
        assert_eq!(s.type_schema().map(|ty| ty.name), Some("bitmap:port"));

        parse_typename(&mut s, Opt::TypeName, "hash:ip,port").unwrap();
        assert_eq!(s.type_schema().map(|ty| ty.name), Some("hash:ip,port"));
    }

    #[test]
    fn test_typename_errors() {
        let mut s: Session = Session::new();
        assert_eq!(
            parse_typename(&mut s, Opt::TypeName, "hash:nothing"),
            Err(ParseError::UnknownType("hash:nothing".into()))
        );
        let long: String = "x".repeat(MAXNAMELEN);
        assert!(matches!(
            parse_typename(&mut s, Opt::TypeName, &long),
            Err(ParseError::TypeNameTooLong { max: 31, .. })
        ));
        assert!(s.type_schema().is_none());
    }

    #[test]
    fn test_typename_family() {
        let mut s: Session = Session::new();
        parse_typename(&mut s, Opt::TypeName, "macipmap").unwrap();
        assert_eq!(s.family(), Family::V4);

        // a family-neutral type leaves the family alone
        let mut s: Session = Session::new();
        parse_typename(&mut s, Opt::TypeName, "hash:ip").unwrap();
        assert_eq!(s.family(), Family::Any);

        let mut s: Session = Session::new();
        parse_family(&mut s, Opt::Family, "inet6").unwrap();
        let err: ParseError = parse_typename(&mut s, Opt::TypeName, "bitmap:ip,mac").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax error: settype bitmap:ip,mac does not support family inet6"
        );
        assert!(s.type_schema().is_none());
        assert_eq!(s.family(), Family::V6);
    }
}
