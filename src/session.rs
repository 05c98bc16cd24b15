// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    settypes::{TypeRegistry, TypeSchema},
    Family, Opt, ParseError, Resolve, StoreError, SystemResolver, Value,
};
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, net::IpAddr, sync::Arc};
use tracing::debug;

/// Rendering mode selected with the `-output` option.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum OutputMode {
    #[default]
    None,
    Plain,
    Save,
    Xml,
}

/* -------------------------------------------------------------------------- */

/// Option-keyed store of parsed values.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Data {
    values: BTreeMap<Opt, Value>,
}

impl Data {
    /**
    Store `value` under `opt`, replacing any earlier value.

    ## Errors
    - [StoreError::Mismatch] if the value is not of the kind `opt` holds
    - [StoreError::FamilyMismatch] if an address does not belong to the
      family already fixed for the data
    */
    pub fn set(&mut self, opt: Opt, value: Value) -> Result<(), StoreError> {
        if value.kind() != opt.kind() {
            return Err(StoreError::Mismatch {
                opt,
                expected: opt.kind(),
                got: value.kind(),
            });
        }
        if let Value::Addr(addr) = value {
            let fam: Family = self.family();
            if !fam.matches(&addr) {
                return Err(StoreError::FamilyMismatch { opt, addr, fam });
            }
        }
        self.values.insert(opt, value);
        Ok(())
    }

    pub fn get(&self, opt: Opt) -> Option<&Value> {
        self.values.get(&opt)
    }

    pub fn is_set(&self, opt: Opt) -> bool {
        self.values.contains_key(&opt)
    }

    /// Bitset of the options holding a value, see [Opt::flag].
    pub fn flags(&self) -> u64 {
        self.values.keys().fold(0, |acc: u64, opt: &Opt| acc | opt.flag())
    }

    /// The address family, [Family::Any] until something fixes it.
    pub fn family(&self) -> Family {
        match self.values.get(&Opt::Family) {
            Some(Value::Family(fam)) => *fam,
            _ => Family::Any,
        }
    }

    pub(crate) fn set_family(&mut self, fam: Family) {
        self.values.insert(Opt::Family, Value::Family(fam));
    }

    pub fn addr(&self, opt: Opt) -> Option<IpAddr> {
        match self.values.get(&opt) {
            Some(Value::Addr(addr)) => Some(*addr),
            _ => None,
        }
    }

    pub fn u8(&self, opt: Opt) -> Option<u8> {
        match self.values.get(&opt) {
            Some(Value::U8(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn port(&self, opt: Opt) -> Option<u16> {
        match self.values.get(&opt) {
            Some(Value::U16(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn u32(&self, opt: Opt) -> Option<u32> {
        match self.values.get(&opt) {
            Some(Value::U32(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn ether(&self) -> Option<[u8; 6]> {
        match self.values.get(&Opt::Ether) {
            Some(Value::Ether(e)) => Some(*e),
            _ => None,
        }
    }

    pub fn name(&self, opt: Opt) -> Option<&str> {
        match self.values.get(&opt) {
            Some(Value::Name(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    /// `Some(true)` for a "before" reference, `Some(false)` for "after".
    pub fn before(&self) -> Option<bool> {
        match self.values.get(&Opt::Before) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /**
    The network made of the address stored under `opt` (`Ip` or `Ip2`) and
    the matching CIDR option (`Cidr` or `Cidr2`). A plain address without a
    prefix length is a host network (/32 or /128).
    */
    pub fn net(&self, opt: Opt) -> Option<IpNet> {
        let addr: IpAddr = self.addr(opt)?;
        let cidr: Opt = if opt == Opt::Ip2 { Opt::Cidr2 } else { Opt::Cidr };
        let prefix: u8 = self.u8(cidr).unwrap_or(match addr {
            IpAddr::V4(_) => Family::V4.bits(),
            IpAddr::V6(_) => Family::V6.bits(),
        });
        IpNet::new(addr, prefix).ok()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/* -------------------------------------------------------------------------- */

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    Error,
    Warning,
}

/// Human-readable errors and warnings accumulated during one command.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    entries: Vec<(Level, String)>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.by_level(Level::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.by_level(Level::Warning)
    }

    fn by_level(&self, level: Level) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |(l, _)| *l == level)
            .map(|(_, msg)| msg.as_str())
    }

    fn push(&mut self, level: Level, msg: String) {
        self.entries.push((level, msg));
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (level, msg)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match level {
                Level::Error => write!(f, "{msg}")?,
                Level::Warning => write!(f, "Warning: {msg}")?,
            }
        }
        Ok(())
    }
}

/* -------------------------------------------------------------------------- */

/**
Mutable context of one command: the data store, the bound set type, the
output mode and the report.

A session is meant for a single thread and a single parse at a time; it has
no internal locking.
*/
pub struct Session {
    data: Data,
    ty: Option<Arc<TypeSchema>>,
    output: OutputMode,
    report: Report,
    resolver: Box<dyn Resolve>,
    registry: Arc<TypeRegistry>,
}

impl Session {
    /// New session using the system resolver and the global type registry.
    pub fn new() -> Self {
        Self {
            data: Data::default(),
            ty: None,
            output: OutputMode::default(),
            report: Report::default(),
            resolver: Box::new(SystemResolver),
            registry: TypeRegistry::global(),
        }
    }

    /// Replace the resolver used for host names.
    pub fn with_resolver(mut self, resolver: impl Resolve + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Replace the registry `parse_typename` looks set types up in.
    pub fn with_registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Store a value; the setter all parsers commit through.
    pub fn data_set(&mut self, opt: Opt, value: Value) -> Result<(), StoreError> {
        debug!("data set {opt:?} = {value:?}");
        self.data.set(opt, value)
    }

    pub fn family(&self) -> Family {
        self.data.family()
    }

    /// Fix the family to IPv4 if nothing set it yet. Returns the family in effect.
    pub(crate) fn infer_family(&mut self) -> Family {
        let fam: Family = self.data.family();
        if fam != Family::Any {
            return fam;
        }
        debug!("family not set, assuming {}", Family::V4);
        self.data.set_family(Family::V4);
        Family::V4
    }

    pub fn type_schema(&self) -> Option<&Arc<TypeSchema>> {
        self.ty.as_ref()
    }

    /// Bind a set type. A type restricted to one family fixes an unset session family.
    pub fn bind_type(&mut self, ty: Arc<TypeSchema>) {
        if ty.family != Family::Any && self.data.family() == Family::Any {
            debug!("family set to {} by type {}", ty.family, ty.name);
            self.data.set_family(ty.family);
        }
        self.ty = Some(ty);
    }

    pub fn output(&self) -> OutputMode {
        self.output
    }

    pub fn set_output(&mut self, mode: OutputMode) {
        self.output = mode;
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn report_reset(&mut self) {
        self.report = Report::default();
    }

    /// Add a non-fatal warning to the report.
    pub fn warn(&mut self, msg: impl Into<String>) {
        self.report.push(Level::Warning, msg.into());
    }

    /// Append the message of a failed result to the report, pass it through otherwise.
    pub(crate) fn record<T>(&mut self, res: Result<T, ParseError>) -> Result<T, ParseError> {
        if let Err(e) = &res {
            debug!("parse failed: {e}");
            self.report.push(Level::Error, e.to_string());
        }
        res
    }

    pub(crate) fn resolver(&self) -> &dyn Resolve {
        self.resolver.as_ref()
    }

    pub(crate) fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Forget everything parsed so far, keeping the resolver, registry and output mode.
    pub fn reset(&mut self) {
        self.data.clear();
        self.ty = None;
        self.report_reset();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("data", &self.data)
            .field("type", &self.ty.as_ref().map(|ty| ty.name))
            .field("output", &self.output)
            .field("report", &self.report)
            .finish()
    }
}

/// Copy `s` into a new string, reporting allocation failure instead of aborting.
pub(crate) fn owned_name(s: &str) -> Result<String, ParseError> {
    let mut name: String = String::new();
    name.try_reserve_exact(s.len())
        .map_err(|_| ParseError::Alloc(s.to_string()))?;
    name.push_str(s);
    Ok(name)
}

/* -------------------------------------------------------------------------- */
