// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{strings::*, Opt, ParseError, Value};
use crate::{strtonum::str_to_u16, Session};
use lazy_static::lazy_static;
use regex::Regex;
use std::{collections::HashMap, fs};
use tracing::debug;

static SERVICES_PATH: &str = "/etc/services";

#[rustfmt::skip]
static WELL_KNOWN: &[(&str, u16)] = &[
    ("ftp-data", 20),   ("ftp", 21),        ("ssh", 22),        ("telnet", 23),
    ("smtp", 25),       ("domain", 53),     ("http", 80),       ("www", 80),
    ("kerberos", 88),   ("pop3", 110),      ("sunrpc", 111),    ("ntp", 123),
    ("imap", 143),      ("bgp", 179),       ("ldap", 389),      ("https", 443),
    ("microsoft-ds", 445), ("submission", 587), ("ldaps", 636), ("imaps", 993),
    ("pop3s", 995),     ("mysql", 3306),    ("postgresql", 5432),
];

// Service name table, loaded once per program execution.
lazy_static! {
    static ref SERVICE_LINE: Regex =
        Regex::new(r"^(\S+)\s+(\d+)/tcp(?:\s+(.*))?$").expect("service line regex");
    static ref SERVICES: HashMap<String, u16> = load_services();
}

/// TCP entries of the services database, first entry wins, over the built-in table.
fn load_services() -> HashMap<String, u16> {
    let mut m: HashMap<String, u16> = HashMap::new();
    if let Ok(text) = fs::read_to_string(SERVICES_PATH) {
        for line in text.lines() {
            let line: &str = line.split('#').next().unwrap_or_default().trim();
            let Some(caps) = SERVICE_LINE.captures(line) else {
                continue;
            };
            let Ok(port) = caps[2].parse::<u16>() else {
                continue;
            };
            m.entry(caps[1].to_string()).or_insert(port);
            if let Some(aliases) = caps.get(3) {
                for alias in aliases.as_str().split_whitespace() {
                    m.entry(alias.to_string()).or_insert(port);
                }
            }
        }
    }
    for (name, port) in WELL_KNOWN {
        m.entry(name.to_string()).or_insert(*port);
    }
    m
}

/// Look up the TCP port of a service name.
pub fn service_port(name: &str) -> Option<u16> {
    SERVICES.get(name).copied()
}

/// Number first, service name second. Clears the report once a port is stored.
fn single_port(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    let port: u16 = match str_to_u16(s, 0, 65535) {
        Ok(port) => port,
        Err(_) => service_port(s).ok_or_else(|| ParseError::InvalidPort(s.into()))?,
    };
    session.data_set(opt, Value::U16(port))?;
    debug!("port {s} -> {port}");
    session.report_reset();
    Ok(())
}

/// Parse a single TCP port number or service name.
pub fn parse_single_port(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    debug_assert!(matches!(opt, Opt::Port | Opt::PortTo));
    let res = single_port(session, opt, s);
    session.record(res)
}

/// Parse a TCP port, or a `port-port` range whose end goes to `PortTo`.
pub fn parse_port(session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
    debug_assert!(opt == Opt::Port);
    let res = match s.split_once(RANGE_SEPARATOR) {
        Some((beg, end)) => {
            single_port(session, Opt::PortTo, end).and_then(|_| single_port(session, opt, beg))
        }
        None => single_port(session, opt, s),
    };
    session.record(res)
}

/* -------------------------------------------------------------------------- */
