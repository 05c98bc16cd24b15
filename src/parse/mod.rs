// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parser entry points: addresses, networks, ranges, ports, ethernet addresses,
//! set names, small option values and compound elements.
//!
//! Every entry point has the same shape, `(session, opt, str)`, stores what it
//! parsed into the data store of the session and appends the message of any
//! error it returns to the session report.

mod addresses;
mod elem;
mod ether;
mod names;
mod options;
mod ports;
mod resolve;
mod strings;
mod structs;

use crate::settypes::Dim;
use std::{error, fmt};
use strings::*;

pub use addresses::*;
pub use elem::{parse_command_elem, parse_elem};
pub use ether::{ether_octets, parse_ether, ETH_ALEN};
pub use names::{parse_name, parse_setname};
pub use options::*;
pub use ports::{parse_port, parse_single_port, service_port};
pub use resolve::{Resolve, StaticResolver, SystemResolver};
pub use strings::{CIDR_SEPARATOR, ELEM_SEPARATOR, NAME_SEPARATOR, RANGE_SEPARATOR};
pub use structs::{Family, Opt, Value, ValueKind};

pub(crate) use resolve::resolve_first;

/// Broad classification of a [ParseError].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// input is not syntactically valid for the target type
    Format,
    /// numeric value outside the allowed bounds
    Range,
    /// name lookup found no matching address
    Resolution,
    /// scratch allocation failed
    Alloc,
    /// the active type schema is incomplete; never caused by user input
    Schema,
    /// wrong number of element separators for the type's dimension
    Arity,
    /// the data store refused the value
    Store,
}

#[rustfmt::skip]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    InvalidNumber(String),
    OutOfRange  { val: String, min: u64, max: u64 },
    Netmask     { val: String, min: u8, max: u8 },
    NotPlain(String),
    NotNet(String),
    NotRange(String),
    NotNetOrRange(String),
    /// both a CIDR and a range separator are present
    Ambiguous(String),
    /// the resolver failed outright
    Unresolvable { host: String, fam: Family, reason: String },
    /// the resolver succeeded but returned nothing of the wanted family
    NoAddress   { host: String, fam: Family },
    InvalidPort(String),
    InvalidEther(String),
    UnknownFamily(String),
    UnknownOutput(String),
    NameTooLong { name: String, max: usize },
    NamePattern(String),
    TypeNameTooLong { name: String, max: usize },
    UnknownType(String),
    /// the type is bound to the other family than the session's
    TypeFamily  { typename: &'static str, fam: Family },
    NoCompound  { elem: String, typename: &'static str },
    TooManyForOne { elem: String, typename: &'static str },
    TooManyForTwo { elem: String, typename: &'static str },
    MissingSecond(String),
    MissingThird(String),
    /// no type schema is bound to the session
    NoType,
    NoParser    { typename: &'static str, dim: Dim },
    Alloc(String),
    Store(StoreError),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        use ParseError::*;
        match self {
            OutOfRange { .. } | Netmask { .. } => ErrorKind::Range,
            Unresolvable { .. } | NoAddress { .. } => ErrorKind::Resolution,
            NoCompound { .. } | TooManyForOne { .. } | TooManyForTwo { .. } => ErrorKind::Arity,
            MissingSecond(_) | MissingThird(_) => ErrorKind::Arity,
            NoType | NoParser { .. } => ErrorKind::Schema,
            Alloc(_) => ErrorKind::Alloc,
            Store(_) => ErrorKind::Store,
            _ => ErrorKind::Format,
        }
    }

    /// Whether the error was caused by the user's input.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Format | ErrorKind::Range | ErrorKind::Resolution | ErrorKind::Arity
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_syntax() {
            write!(f, "{ERR_SYNTAX}: ")?;
        }
        match self {
            ParseError::InvalidNumber(val) => write!(f, "'{val}' {ERR_NUM_INVALID}"),
            ParseError::OutOfRange { val, min, max } => {
                write!(f, "'{val}' {ERR_NUM_RANGE} {min}-{max}")
            }
            ParseError::Netmask { val, min, max } => write!(f, "{ERR_NETMASK} {min}-{max}: '{val}'"),
            ParseError::NotPlain(s) => write!(f, "{ERR_NOT_PLAIN}: {s}"),
            ParseError::NotNet(s) => write!(f, "{ERR_NOT_NET}: {s}"),
            ParseError::NotRange(s) => write!(f, "{ERR_NOT_RANGE}: {s}"),
            ParseError::NotNetOrRange(s) => write!(f, "{ERR_NOT_NETRANGE}: {s}"),
            ParseError::Ambiguous(s) => write!(f, "{ERR_AMBIGUOUS}: {s}"),
            ParseError::Unresolvable { host, fam, reason } => {
                write!(f, "{ERR_RESOLVE} '{host}' to an {} address: {reason}", fam.label())
            }
            ParseError::NoAddress { host, fam } => {
                write!(f, "cannot parse {host}: {} {ERR_NO_ADDR}", fam.label())
            }
            ParseError::InvalidPort(s) => write!(f, "{ERR_PORT}: '{s}'"),
            ParseError::InvalidEther(s) => write!(f, "{ERR_ETHER}: '{s}'"),
            ParseError::UnknownFamily(s) => write!(f, "{ERR_FAMILY}: '{s}'"),
            ParseError::UnknownOutput(s) => write!(f, "{ERR_OUTPUT}: '{s}'"),
            ParseError::NameTooLong { name, max } => {
                write!(f, "setname '{name}' {ERR_NAME_LEN} {max} characters")
            }
            ParseError::NamePattern(s) => write!(f, "{ERR_NAME_PATTERN}: '{s}'"),
            ParseError::TypeNameTooLong { name, max } => {
                write!(f, "typename '{name}' {ERR_NAME_LEN} {max} characters")
            }
            ParseError::UnknownType(s) => write!(f, "{ERR_TYPE_UNKNOWN}: '{s}'"),
            ParseError::TypeFamily { typename, fam } => {
                write!(f, "settype {typename} {ERR_TYPE_FAMILY} {fam}")
            }
            ParseError::NoCompound { elem, typename } => {
                write!(f, "elem separator in {elem}, but settype {typename} {ERR_ELEM_NONE}")
            }
            ParseError::TooManyForOne { elem, typename } => {
                write!(f, "two elem separators in {elem}, but settype {typename} {ERR_ELEM_ONE}")
            }
            ParseError::TooManyForTwo { elem, typename } => {
                write!(f, "three elem separators in {elem}, but settype {typename} {ERR_ELEM_TWO}")
            }
            ParseError::MissingSecond(elem) => write!(f, "{ERR_ELEM_SECOND} {elem}"),
            ParseError::MissingThird(elem) => write!(f, "{ERR_ELEM_THIRD} {elem}"),
            ParseError::NoType => write!(f, "{ERR_INTERNAL}: {ERR_NO_TYPE}"),
            ParseError::NoParser { typename, dim } => {
                write!(f, "{ERR_INTERNAL}: {ERR_NO_PARSER} {typename} (dimension {dim})")
            }
            ParseError::Alloc(s) => write!(f, "{ERR_ALLOC} '{s}'"),
            ParseError::Store(e) => write!(f, "{e}"),
        }
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ParseError::Store(e) => Some(e),
            _ => None,
        }
    }
}

/* ---------------------------------- */

/// Errors reported by the data store setter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// the value is not of the kind the option holds
    Mismatch { opt: Opt, expected: ValueKind, got: ValueKind },
    /// an address of the other family than the one fixed for the session
    FamilyMismatch { opt: Opt, addr: std::net::IpAddr, fam: Family },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Mismatch { opt, expected, got } => {
                write!(f, "{ERR_STORE_KIND} {opt:?}: expected {expected}, got {got}")
            }
            StoreError::FamilyMismatch { opt, addr, fam } => {
                write!(f, "{ERR_STORE_FAMILY} ({fam}) for {opt:?}: {addr}")
            }
        }
    }
}

impl error::Error for StoreError {}

impl From<StoreError> for ParseError {
    fn from(e: StoreError) -> Self {
        ParseError::Store(e)
    }
}
