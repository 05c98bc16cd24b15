// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{strings::*, Family, ParseError};
use crate::Session;
use std::{
    collections::HashMap,
    io,
    net::{IpAddr, ToSocketAddrs},
};
use tracing::{debug, warn};

/**
Turns a host name or address literal into addresses.

`fam` is a hint; implementations may return addresses of any family, the
caller filters. Resolution may block the calling thread (DNS) and carries
no timeout of its own.
*/
pub trait Resolve {
    fn resolve(&self, host: &str, fam: Family) -> io::Result<Vec<IpAddr>>;
}

/// Address literals are parsed directly, anything else goes to the platform resolver.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn resolve(&self, host: &str, _fam: Family) -> io::Result<Vec<IpAddr>> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![ip]);
        }
        Ok((host, 0u16).to_socket_addrs()?.map(|sa| sa.ip()).collect())
    }
}

/// Fixed host table, in the spirit of `/etc/hosts`. Literals are always accepted.
#[derive(Clone, Debug, Default)]
pub struct StaticResolver {
    hosts: HashMap<String, Vec<IpAddr>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the addresses of `host`, in resolver order.
    pub fn with(mut self, host: impl Into<String>, addrs: &[IpAddr]) -> Self {
        self.hosts.insert(host.into(), addrs.to_vec());
        self
    }
}

impl Resolve for StaticResolver {
    fn resolve(&self, host: &str, _fam: Family) -> io::Result<Vec<IpAddr>> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![ip]);
        }
        self.hosts
            .get(host)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "unknown host"))
    }
}

/**
Resolve `host` to a single address of family `fam`.

When several addresses of the family come back, the first one is used and
a warning goes to the session report.
*/
pub(crate) fn resolve_first(
    session: &mut Session,
    host: &str,
    fam: Family,
) -> Result<IpAddr, ParseError> {
    let addrs: Vec<IpAddr> = session
        .resolver()
        .resolve(host, fam)
        .map_err(|e| ParseError::Unresolvable {
            host: host.to_string(),
            fam,
            reason: e.to_string(),
        })?;

    let mut matching = addrs.into_iter().filter(|addr| fam.matches(addr));
    let first: IpAddr = matching.next().ok_or_else(|| ParseError::NoAddress {
        host: host.to_string(),
        fam,
    })?;

    if matching.next().is_some() {
        warn!("{host} {WARN_MULTI_ADDR}");
        session.warn(format!("{host} {WARN_MULTI_ADDR}"));
    }
    debug!("resolved {host} to {first}");
    Ok(first)
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use std::net::{Ipv4Addr, Ipv6Addr};

    const HOST_A: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 1, 1, 1));
    const HOST_B: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 1, 1, 2));
    const HOST_6: IpAddr = IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1));

    fn session() -> Session {
        Session::new().with_resolver(
            StaticResolver::new()
                .with("single", &[HOST_A])
                .with("multi", &[HOST_A, HOST_B])
                .with("dual", &[HOST_6, HOST_B])
                .with("v6only", &[HOST_6]),
        )
    }

    #[test]
    fn test_literal() {
        let mut s: Session = session();
        assert_eq!(resolve_first(&mut s, "10.1.1.1", Family::V4), Ok(HOST_A));
        assert_eq!(SystemResolver.resolve("::1", Family::V6).unwrap(), vec![IpAddr::V6(Ipv6Addr::LOCALHOST)]);
    }

    #[test]
    fn test_single_name() {
        let mut s: Session = session();
        assert_eq!(resolve_first(&mut s, "single", Family::V4), Ok(HOST_A));
        assert!(s.report().is_empty());
    }

    #[test]
    fn test_multiple_uses_first_and_warns() {
        let mut s: Session = session();
        assert_eq!(resolve_first(&mut s, "multi", Family::V4), Ok(HOST_A));
        let warnings: Vec<&str> = s.report().warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("multi resolves to multiple addresses"));
        assert_eq!(s.report().errors().count(), 0);
    }

    #[test]
    fn test_family_filter() {
        let mut s: Session = session();
        // one address per family: no warning
        assert_eq!(resolve_first(&mut s, "dual", Family::V4), Ok(HOST_B));
        assert_eq!(resolve_first(&mut s, "dual", Family::V6), Ok(HOST_6));
        assert!(s.report().is_empty());

        let err: ParseError = resolve_first(&mut s, "v6only", Family::V4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
        assert_eq!(
            err.to_string(),
            "Syntax error: cannot parse v6only: IPv4 address could not be resolved"
        );
    }

    #[test]
    fn test_unknown_host() {
        let mut s: Session = session();
        let err: ParseError = resolve_first(&mut s, "nowhere", Family::V4).unwrap_err();
        assert!(matches!(err, ParseError::Unresolvable { .. }));
        assert_eq!(err.kind(), ErrorKind::Resolution);
        assert!(err.to_string().contains("cannot resolve 'nowhere' to an IPv4 address"));
    }
}
