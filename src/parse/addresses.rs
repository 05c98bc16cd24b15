// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{resolve_first, strings::*, Family, Opt, ParseError, Value};
use crate::{strtonum::str_to_u8, Session};
use std::net::IpAddr;
use tracing::debug;

/// Which textual forms an address field accepts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AddrMode {
    /// address, address/prefix or address-address
    Any,
    /// address only
    Plain,
    /// address/prefix only
    Net,
    /// address-address only
    Range,
}

/**
Parse an address, a network or a range, in the forms `mode` allows:
- Single address or host name: 10.10.10.1
- CIDR: 10.10.10.0/28
- Range: 10.10.10.1-10.10.10.10

If the session has no family yet, IPv4 is assumed and stored. Host names are
resolved; when one resolves to several addresses only the first is used.

The address goes to `opt`, the prefix length to `Cidr2` for `Ip2` and to
`Cidr` otherwise, the end of a range to `IpTo`.
*/
fn parse_addr(session: &mut Session, opt: Opt, s: &str, mode: AddrMode) -> Result<(), ParseError> {
    let fam: Family = session.infer_family();
    let has_cidr: bool = s.contains(CIDR_SEPARATOR);
    let has_range: bool = s.contains(RANGE_SEPARATOR);

    match mode {
        AddrMode::Plain if has_cidr || has_range => return Err(ParseError::NotPlain(s.into())),
        AddrMode::Net if !has_cidr || has_range => return Err(ParseError::NotNet(s.into())),
        AddrMode::Range if !has_range || has_cidr => return Err(ParseError::NotRange(s.into())),
        AddrMode::Any if has_cidr && has_range => return Err(ParseError::Ambiguous(s.into())),
        _ => {}
    }

    if let Some((addr, prefix)) = s.split_once(CIDR_SEPARATOR) {
        let cidr_opt: Opt = if opt == Opt::Ip2 { Opt::Cidr2 } else { Opt::Cidr };
        let prefix: u8 = str_to_u8(prefix, 0, fam.bits())?;
        session.data_set(cidr_opt, Value::U8(prefix))?;
        store_resolved(session, opt, addr, fam)
    } else if let Some((beg, end)) = s.split_once(RANGE_SEPARATOR) {
        debug!("range {beg} - {end}");
        store_resolved(session, opt, beg, fam)?;
        store_resolved(session, Opt::IpTo, end, fam)
    } else {
        store_resolved(session, opt, s, fam)
    }
}

#[inline]
fn store_resolved(session: &mut Session, opt: Opt, host: &str, fam: Family) -> Result<(), ParseError> {
    let addr: IpAddr = resolve_first(session, host, fam)?;
    session.data_set(opt, Value::Addr(addr))?;
    Ok(())
}

/// Parse an address, network or range, see [AddrMode].
pub fn parse_ip_mode(session: &mut Session, opt: Opt, s: &str, mode: AddrMode) -> Result<(), ParseError> {
    let res = parse_addr(session, opt, s, mode);
    session.record(res)
}

/// Parse an address, `address/prefix` network or `address-address` range.
pub fn parse_ip(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    debug_assert!(matches!(opt, Opt::Ip | Opt::Ip2));
    parse_ip_mode(session, opt, s, AddrMode::Any)
}

/// Parse a single address or host name; networks and ranges are refused.
pub fn parse_single_ip(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    debug_assert!(matches!(opt, Opt::Ip | Opt::IpTo | Opt::Ip2));
    parse_ip_mode(session, opt, s, AddrMode::Plain)
}

/// Parse an `address/prefix` network.
pub fn parse_net(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    debug_assert!(matches!(opt, Opt::Ip | Opt::Ip2));
    parse_ip_mode(session, opt, s, AddrMode::Net)
}

/// Parse an `address-address` range. The start always goes to `Ip`.
pub fn parse_range(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    debug_assert!(opt == Opt::Ip);
    parse_ip_mode(session, Opt::Ip, s, AddrMode::Range)
}

/// Parse either a network or a range, when the caller cannot tell which one applies.
pub fn parse_netrange(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    debug_assert!(opt == Opt::Ip);
    if !(s.contains(RANGE_SEPARATOR) || s.contains(CIDR_SEPARATOR)) {
        return session.record(Err(ParseError::NotNetOrRange(s.into())));
    }
    parse_ip_mode(session, opt, s, AddrMode::Any)
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, StaticResolver};
    use ipnet::IpNet;
    use std::net::{Ipv4Addr, Ipv6Addr};

    const TEST_1: &str = "192.168.1.1";
    const CIDR_1: &str = "192.168.1.0/30";
    const RANGE_1: &str = "10.0.0.1-10.0.0.5";
    const RANGE_NAMED: &str = "gw-10.0.0.5";
    const CIDR_V6: &str = "2001:db8::/64";
    const RANGE_V6: &str = "::1-::5";

    fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(a, b, c, d))
    }

    fn v6_session() -> Session {
        let mut session: Session = Session::new();
        session.data_set(Opt::Family, Value::Family(Family::V6)).unwrap();
        session
    }

    #[test]
    fn test_plain_defaults_family() {
        let mut s: Session = Session::new();
        parse_single_ip(&mut s, Opt::Ip, TEST_1).unwrap();
        assert_eq!(s.family(), Family::V4);
        assert_eq!(s.data().addr(Opt::Ip), Some(v4(192, 168, 1, 1)));
        assert!(!s.data().is_set(Opt::Cidr));
    }

    #[test]
    fn test_cidr() {
        let mut s: Session = Session::new();
        parse_net(&mut s, Opt::Ip, CIDR_1).unwrap();
        assert_eq!(s.data().addr(Opt::Ip), Some(v4(192, 168, 1, 0)));
        assert_eq!(s.data().u8(Opt::Cidr), Some(30));
        assert_eq!(s.data().net(Opt::Ip), Some(CIDR_1.parse::<IpNet>().unwrap()));

        let mut s: Session = Session::new();
        let err: ParseError = parse_single_ip(&mut s, Opt::Ip, CIDR_1).unwrap_err();
        assert_eq!(err, ParseError::NotPlain(CIDR_1.into()));
        assert_eq!(
            s.report().to_string(),
            "Syntax error: plain IP address must be supplied: 192.168.1.0/30"
        );
    }

    #[test]
    fn test_cidr_second_dimension() {
        let mut s: Session = Session::new();
        parse_ip(&mut s, Opt::Ip2, "10.0.0.0/8").unwrap();
        assert_eq!(s.data().u8(Opt::Cidr2), Some(8));
        assert!(!s.data().is_set(Opt::Cidr));
        assert_eq!(s.data().net(Opt::Ip2), Some("10.0.0.0/8".parse::<IpNet>().unwrap()));
    }

    #[test]
    fn test_cidr_bounds() {
        let mut s: Session = Session::new();
        parse_ip(&mut s, Opt::Ip, "0.0.0.0/0").unwrap();
        assert_eq!(s.data().u8(Opt::Cidr), Some(0));
        parse_ip(&mut s, Opt::Ip, "10.0.0.1/32").unwrap();

        let err: ParseError = parse_ip(&mut s, Opt::Ip, "10.0.0.0/33").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.to_string(), "Syntax error: '33' is out of range 0-32");

        let mut s: Session = v6_session();
        parse_net(&mut s, Opt::Ip, CIDR_V6).unwrap();
        assert_eq!(s.data().u8(Opt::Cidr), Some(64));
        assert!(parse_net(&mut s, Opt::Ip, "2001:db8::/129").is_err());
    }

    #[test]
    fn test_range() {
        let mut s: Session = Session::new();
        parse_range(&mut s, Opt::Ip, RANGE_1).unwrap();
        assert_eq!(s.data().addr(Opt::Ip), Some(v4(10, 0, 0, 1)));
        assert_eq!(s.data().addr(Opt::IpTo), Some(v4(10, 0, 0, 5)));

        let mut s: Session = Session::new();
        assert_eq!(
            parse_net(&mut s, Opt::Ip, RANGE_1),
            Err(ParseError::NotNet(RANGE_1.into()))
        );
        assert_eq!(
            parse_range(&mut s, Opt::Ip, CIDR_1),
            Err(ParseError::NotRange(CIDR_1.into()))
        );
    }

    #[test]
    fn test_range_v6() {
        let mut s: Session = v6_session();
        parse_ip(&mut s, Opt::Ip, RANGE_V6).unwrap();
        assert_eq!(s.data().addr(Opt::Ip), Some(IpAddr::V6(Ipv6Addr::LOCALHOST)));
        assert_eq!(s.data().addr(Opt::IpTo), Some(IpAddr::V6(Ipv6Addr::from(5u128))));
    }

    #[test]
    fn test_range_with_names() {
        let mut s: Session =
            Session::new().with_resolver(StaticResolver::new().with("gw", &[v4(10, 0, 0, 1)]));
        parse_range(&mut s, Opt::Ip, RANGE_NAMED).unwrap();
        assert_eq!(s.data().addr(Opt::Ip), Some(v4(10, 0, 0, 1)));
        assert_eq!(s.data().addr(Opt::IpTo), Some(v4(10, 0, 0, 5)));
    }

    #[test]
    fn test_family_is_not_inferred_from_v6_literal() {
        let mut s: Session = Session::new();
        let err: ParseError = parse_ip(&mut s, Opt::Ip, "::1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
        assert_eq!(s.family(), Family::V4);
        assert!(!s.data().is_set(Opt::Ip));
    }

    #[test]
    fn test_netrange() {
        let mut s: Session = Session::new();
        parse_netrange(&mut s, Opt::Ip, CIDR_1).unwrap();
        parse_netrange(&mut s, Opt::Ip, RANGE_1).unwrap();
        let err: ParseError = parse_netrange(&mut s, Opt::Ip, TEST_1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax error: IP/net or IP-IP range must be specified: 192.168.1.1"
        );
        assert_eq!(
            parse_ip(&mut s, Opt::Ip, "10.0.0.0/8-10.0.0.9"),
            Err(ParseError::Ambiguous("10.0.0.0/8-10.0.0.9".into()))
        );
    }

    #[test]
    fn test_overwrite() {
        let mut s: Session = Session::new();
        parse_ip(&mut s, Opt::Ip, TEST_1).unwrap();
        parse_ip(&mut s, Opt::Ip, RANGE_1).unwrap();
        assert_eq!(s.data().addr(Opt::Ip), Some(v4(10, 0, 0, 1)));
    }
}
