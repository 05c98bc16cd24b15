// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::{fmt, net::IpAddr};

pub(crate) const IPV4_BITS: u8 = 32;
pub(crate) const IPV6_BITS: u8 = 128;

/// Address family of a session. Fixed as soon as an address-bearing field is parsed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Family {
    #[default]
    Any,
    V4,
    V6,
}

impl Family {
    /// Number of address bits, IPv4 for an unspecified family.
    pub fn bits(self) -> u8 {
        match self {
            Family::V6 => IPV6_BITS,
            _ => IPV4_BITS,
        }
    }

    /// Inclusive bounds accepted by the `netmask` option.
    pub fn netmask_bounds(self) -> (u8, u8) {
        match self {
            Family::V6 => (4, 124),
            _ => (1, 31),
        }
    }

    /// Whether `addr` belongs to this family. Everything matches [Family::Any].
    pub fn matches(self, addr: &IpAddr) -> bool {
        match (self, addr) {
            (Family::Any, _) => true,
            (Family::V4, IpAddr::V4(_)) | (Family::V6, IpAddr::V6(_)) => true,
            _ => false,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Family::V6 => "IPv6",
            _ => "IPv4",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Family::Any => "unspec",
            Family::V4 => "inet",
            Family::V6 => "inet6",
        })
    }
}

/* -------------------------------------------------------------------------- */

/// Identifies the slot of the data store a parsed value goes to.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Opt {
    SetName, TypeName, Family,
    Ip, IpTo, Cidr, Ip2, Cidr2,
    Port, PortTo,
    Timeout, Gc, HashSize, MaxElem, Size,
    Netmask, Probes, Resize,
    Ether,
    Name, NameRef, Before, SetName2,
    Exist, Resolve, Quiet, Sorted,
}

impl Opt {
    #[rustfmt::skip]
    pub const ALL: [Opt; 27] = [
        Opt::SetName, Opt::TypeName, Opt::Family,
        Opt::Ip, Opt::IpTo, Opt::Cidr, Opt::Ip2, Opt::Cidr2,
        Opt::Port, Opt::PortTo,
        Opt::Timeout, Opt::Gc, Opt::HashSize, Opt::MaxElem, Opt::Size,
        Opt::Netmask, Opt::Probes, Opt::Resize,
        Opt::Ether,
        Opt::Name, Opt::NameRef, Opt::Before, Opt::SetName2,
        Opt::Exist, Opt::Resolve, Opt::Quiet, Opt::Sorted,
    ];

    /// Single-bit mask of this option, for the mandatory/full bitsets of a type.
    pub const fn flag(self) -> u64 {
        1u64 << self as u8
    }

    /// Bitwise OR of the flags of `opts`.
    pub const fn flags(opts: &[Opt]) -> u64 {
        let mut mask: u64 = 0;
        let mut i: usize = 0;
        while i < opts.len() {
            mask |= opts[i].flag();
            i += 1;
        }
        mask
    }

    /// The kind of [Value] this option holds.
    pub fn kind(self) -> ValueKind {
        match self {
            Opt::Family => ValueKind::Family,
            Opt::Ip | Opt::IpTo | Opt::Ip2 => ValueKind::Addr,
            Opt::Cidr | Opt::Cidr2 | Opt::Netmask | Opt::Probes | Opt::Resize => ValueKind::U8,
            Opt::Port | Opt::PortTo => ValueKind::U16,
            Opt::Timeout | Opt::Gc | Opt::HashSize | Opt::MaxElem | Opt::Size => ValueKind::U32,
            Opt::Ether => ValueKind::Ether,
            Opt::SetName | Opt::TypeName | Opt::Name | Opt::NameRef | Opt::SetName2 => {
                ValueKind::Name
            }
            Opt::Before => ValueKind::Bool,
            Opt::Exist | Opt::Resolve | Opt::Quiet | Opt::Sorted => ValueKind::Flag,
        }
    }
}

/* -------------------------------------------------------------------------- */

/// A parsed value, as kept in the data store.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Family(Family),
    Addr(IpAddr),
    U8(u8),
    U16(u16),
    U32(u32),
    Ether([u8; 6]),
    Name(String),
    Bool(bool),
    /// presence only
    Flag,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Family(_) => ValueKind::Family,
            Value::Addr(_) => ValueKind::Addr,
            Value::U8(_) => ValueKind::U8,
            Value::U16(_) => ValueKind::U16,
            Value::U32(_) => ValueKind::U32,
            Value::Ether(_) => ValueKind::Ether,
            Value::Name(_) => ValueKind::Name,
            Value::Bool(_) => ValueKind::Bool,
            Value::Flag => ValueKind::Flag,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueKind {
    Family,
    Addr,
    U8,
    U16,
    U32,
    Ether,
    Name,
    Bool,
    Flag,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Family => "address family",
            ValueKind::Addr => "IP address",
            ValueKind::U8 => "8-bit number",
            ValueKind::U16 => "16-bit number",
            ValueKind::U32 => "32-bit number",
            ValueKind::Ether => "ethernet address",
            ValueKind::Name => "name",
            ValueKind::Bool => "boolean",
            ValueKind::Flag => "flag",
        })
    }
}

/* -------------------------------------------------------------------------- */
