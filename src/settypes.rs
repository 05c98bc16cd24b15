// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Set type descriptors: element shape, per-field parsers, argument tables,
//! and the registry the type name parser looks them up in.

use crate::{
    parse::{
        parse_ether, parse_family, parse_flag, parse_ip, parse_name, parse_net, parse_netmask,
        parse_netrange, parse_output, parse_port, parse_range, parse_setname, parse_single_ip,
        parse_single_port, parse_typename, parse_uint32, parse_uint8, NAME_SEPARATOR,
    },
    Data, Family, Opt, ParseError, Session,
};
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::{fmt, sync::Arc};
use tracing::debug;

/// Position of a field within a compound element.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Dim {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Dim {
    pub const ALL: [Dim; 3] = [Dim::One, Dim::Two, Dim::Three];

    /// Zero-based index into per-dimension tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize - 1
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Commands a set type carries argument tables and option bitsets for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cmd {
    Create,
    Add,
    Del,
    Test,
}

impl Cmd {
    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/* -------------------------------------------------------------------------- */

pub type ParseFn = fn(&mut Session, Opt, &str) -> Result<(), ParseError>;

/**
Handle to one of the parser entry points, so a schema can name the parser of
a field or an argument as plain data. `Custom` plugs in any function of the
entry point shape.
*/
#[derive(Clone, Copy, Debug)]
pub enum Parser {
    Ip,
    SingleIp,
    Net,
    Range,
    NetRange,
    Ether,
    Port,
    SinglePort,
    Family,
    Netmask,
    Name,
    SetName,
    Uint8,
    Uint32,
    TypeName,
    Output,
    Flag,
    Custom(ParseFn),
}

impl Parser {
    pub fn entry(self) -> ParseFn {
        match self {
            Parser::Ip => parse_ip,
            Parser::SingleIp => parse_single_ip,
            Parser::Net => parse_net,
            Parser::Range => parse_range,
            Parser::NetRange => parse_netrange,
            Parser::Ether => parse_ether,
            Parser::Port => parse_port,
            Parser::SinglePort => parse_single_port,
            Parser::Family => parse_family,
            Parser::Netmask => parse_netmask,
            Parser::Name => parse_name,
            Parser::SetName => parse_setname,
            Parser::Uint8 => parse_uint8,
            Parser::Uint32 => parse_uint32,
            Parser::TypeName => parse_typename,
            Parser::Output => parse_output,
            Parser::Flag => parse_flag,
            Parser::Custom(f) => f,
        }
    }

    #[inline]
    pub fn parse(self, session: &mut Session, opt: Opt, s: &str) -> Result<(), ParseError> {
        (self.entry())(session, opt, s)
    }
}

/* -------------------------------------------------------------------------- */

/// Whether an argument takes a value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArgKind {
    None,
    Mandatory,
}

/// A command line argument of a set type: its spellings, the option it fills and how.
#[derive(Clone, Copy, Debug)]
pub struct ArgSpec {
    pub names: &'static [&'static str],
    pub has_arg: ArgKind,
    pub opt: Opt,
    pub parser: Option<Parser>,
}

/// One field of a compound element.
#[derive(Clone, Copy, Debug)]
pub struct ElemSpec {
    pub opt: Opt,
    pub parser: Parser,
}

impl ElemSpec {
    pub const fn new(opt: Opt, parser: Parser) -> Self {
        Self { opt, parser }
    }
}

/**
Immutable descriptor of a set type.

`elem` holds the field specs by dimension; every dimension up to `dimension`
needs one, which [TypeRegistry::register] does not check: a missing one shows
up as a schema error when an element is parsed.
*/
#[derive(Clone, Debug)]
pub struct TypeSchema {
    pub name: &'static str,
    /// pre-revision name, e.g. `portmap`
    pub alias: Option<&'static str>,
    pub revision: u8,
    pub family: Family,
    pub dimension: Dim,
    pub last_elem_optional: bool,
    pub elem: [Option<ElemSpec>; 3],
    pub create_args: &'static [ArgSpec],
    pub add_args: &'static [ArgSpec],
    /// option bitsets per [Cmd], see [Opt::flag]
    pub mandatory: [u64; 4],
    pub full: [u64; 4],
    pub usage: &'static str,
}

impl TypeSchema {
    pub fn elem(&self, dim: Dim) -> Option<&ElemSpec> {
        self.elem[dim.index()].as_ref()
    }

    /// Argument table of `cmd`; `del` and `test` take none.
    pub fn args(&self, cmd: Cmd) -> &'static [ArgSpec] {
        match cmd {
            Cmd::Create => self.create_args,
            Cmd::Add => self.add_args,
            Cmd::Del | Cmd::Test => &[],
        }
    }

    pub fn find_arg(&self, cmd: Cmd, name: &str) -> Option<&'static ArgSpec> {
        self.args(cmd).iter().find(|arg| arg.names.contains(&name))
    }

    pub fn mandatory(&self, cmd: Cmd) -> u64 {
        self.mandatory[cmd.index()]
    }

    pub fn full(&self, cmd: Cmd) -> u64 {
        self.full[cmd.index()]
    }

    /// Mandatory options of `cmd` not present in `data`.
    pub fn missing(&self, cmd: Cmd, data: &Data) -> Vec<Opt> {
        let mandatory: u64 = self.mandatory(cmd);
        Opt::ALL
            .into_iter()
            .filter(|opt| mandatory & opt.flag() != 0 && !data.is_set(*opt))
            .collect()
    }
}

/* -------------------------------------------------------------------------- */

/// Registered set types, shared between sessions.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: RwLock<Vec<Arc<TypeSchema>>>,
}

lazy_static! {
    static ref GLOBAL: Arc<TypeRegistry> = Arc::new(TypeRegistry::with_builtins());
}

impl TypeRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in set types.
    pub fn with_builtins() -> Self {
        let reg: Self = Self::new();
        for ty in builtins() {
            reg.register(ty);
        }
        reg
    }

    /// The process-wide registry, initialized with the built-in types on first use.
    pub fn global() -> Arc<TypeRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Add a type. Returns false if the same name and revision is already registered.
    pub fn register(&self, ty: TypeSchema) -> bool {
        let mut types = self.types.write();
        if types
            .iter()
            .any(|t| t.name == ty.name && t.revision == ty.revision)
        {
            debug!("type {} revision {} already registered", ty.name, ty.revision);
            return false;
        }
        debug!("registering type {} revision {}", ty.name, ty.revision);
        types.push(Arc::new(ty));
        true
    }

    /**
    Look a type up by name, highest revision first.

    A name containing [NAME_SEPARATOR] must match the type name exactly;
    other names also match the alias.
    */
    pub fn get(&self, name: &str) -> Option<Arc<TypeSchema>> {
        let new_style: bool = name.contains(NAME_SEPARATOR);
        self.types
            .read()
            .iter()
            .filter(|t| t.name == name || (!new_style && t.alias == Some(name)))
            .max_by_key(|t| t.revision)
            .cloned()
    }

    /// Distinct registered type names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.types.read().iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/* -------------------------------------------------------------------------- */

const fn arg(names: &'static [&'static str], opt: Opt, parser: Parser) -> ArgSpec {
    ArgSpec {
        names,
        has_arg: ArgKind::Mandatory,
        opt,
        parser: Some(parser),
    }
}

const fn flag_arg(names: &'static [&'static str], opt: Opt) -> ArgSpec {
    ArgSpec {
        names,
        has_arg: ArgKind::None,
        opt,
        parser: Some(Parser::Flag),
    }
}

const fn per_cmd(create: &[Opt], add: &[Opt], del: &[Opt], test: &[Opt]) -> [u64; 4] {
    [
        Opt::flags(create),
        Opt::flags(add),
        Opt::flags(del),
        Opt::flags(test),
    ]
}

const TIMEOUT_ARG: ArgSpec = arg(&["timeout", "--timeout"], Opt::Timeout, Parser::Uint32);
const FAMILY_ARG: ArgSpec = arg(&["family", "--family"], Opt::Family, Parser::Family);
const INET_ARG: ArgSpec = arg(&["-4"], Opt::Family, Parser::Family);
const INET6_ARG: ArgSpec = arg(&["-6"], Opt::Family, Parser::Family);
const HASHSIZE_ARG: ArgSpec = arg(&["hashsize", "--hashsize"], Opt::HashSize, Parser::Uint32);
const MAXELEM_ARG: ArgSpec = arg(&["maxelem", "--maxelem"], Opt::MaxElem, Parser::Uint32);

static BITMAP_PORT_CREATE: [ArgSpec; 4] = [
    arg(&["range", "--range"], Opt::Port, Parser::Port),
    TIMEOUT_ARG,
    // backward compatibility
    arg(&["--from"], Opt::Port, Parser::SinglePort),
    arg(&["--to"], Opt::PortTo, Parser::SinglePort),
];

static BITMAP_IPMAC_CREATE: [ArgSpec; 4] = [
    arg(&["range", "--range"], Opt::Ip, Parser::NetRange),
    TIMEOUT_ARG,
    arg(&["--from"], Opt::Ip, Parser::SingleIp),
    arg(&["--to"], Opt::IpTo, Parser::SingleIp),
];

static HASH_CREATE: [ArgSpec; 6] = [
    FAMILY_ARG,
    INET_ARG,
    INET6_ARG,
    HASHSIZE_ARG,
    MAXELEM_ARG,
    TIMEOUT_ARG,
];

static HASH_IP_CREATE: [ArgSpec; 9] = [
    FAMILY_ARG,
    INET_ARG,
    INET6_ARG,
    HASHSIZE_ARG,
    MAXELEM_ARG,
    TIMEOUT_ARG,
    arg(&["netmask", "--netmask"], Opt::Netmask, Parser::Netmask),
    arg(&["probes", "--probes"], Opt::Probes, Parser::Uint8),
    arg(&["resize", "--resize"], Opt::Resize, Parser::Uint8),
];

static LIST_SET_CREATE: [ArgSpec; 2] = [
    arg(&["size", "--size"], Opt::Size, Parser::Uint32),
    TIMEOUT_ARG,
];

static TIMEOUT_ONLY: [ArgSpec; 1] = [TIMEOUT_ARG];

static HASH_ADD: [ArgSpec; 2] = [TIMEOUT_ARG, flag_arg(&["-exist", "--exist"], Opt::Exist)];

static BITMAP_PORT_USAGE: &str = "\
create SETNAME bitmap:port range FROM-TO
               [timeout VALUE]
add    SETNAME PORT|FROM-TO [timeout VALUE]
del    SETNAME PORT|FROM-TO
test   SETNAME PORT
";

static BITMAP_IPMAC_USAGE: &str = "\
create SETNAME bitmap:ip,mac range IP/CIDR|FROM-TO
               [timeout VALUE]
add    SETNAME IP[,MAC] [timeout VALUE]
del    SETNAME IP[,MAC]
test   SETNAME IP[,MAC]
";

static HASH_IP_USAGE: &str = "\
create SETNAME hash:ip
               [family inet|inet6]
               [hashsize VALUE] [maxelem VALUE]
               [netmask CIDR] [timeout VALUE]
               [probes VALUE] [resize VALUE]
add    SETNAME IP|IP/CIDR|FROM-TO [timeout VALUE]
del    SETNAME IP|IP/CIDR|FROM-TO
test   SETNAME IP
";

static HASH_NET_USAGE: &str = "\
create SETNAME hash:net
               [family inet|inet6]
               [hashsize VALUE] [maxelem VALUE] [timeout VALUE]
add    SETNAME IP/CIDR [timeout VALUE]
del    SETNAME IP/CIDR
test   SETNAME IP/CIDR
";

static HASH_IPPORT_USAGE: &str = "\
create SETNAME hash:ip,port
               [family inet|inet6]
               [hashsize VALUE] [maxelem VALUE] [timeout VALUE]
add    SETNAME IP,PORT [timeout VALUE]
del    SETNAME IP,PORT
test   SETNAME IP,PORT
";

static HASH_IPPORTIP_USAGE: &str = "\
create SETNAME hash:ip,port,ip
               [family inet|inet6]
               [hashsize VALUE] [maxelem VALUE] [timeout VALUE]
add    SETNAME IP,PORT,IP [timeout VALUE]
del    SETNAME IP,PORT,IP
test   SETNAME IP,PORT,IP
";

static LIST_SET_USAGE: &str = "\
create SETNAME list:set
               [size VALUE] [timeout VALUE]
add    SETNAME NAME[,before|after,NAME] [timeout VALUE]
del    SETNAME NAME[,before|after,NAME]
test   SETNAME NAME[,before|after,NAME]
";

/// The set types every registry built with [TypeRegistry::with_builtins] knows.
#[rustfmt::skip]
fn builtins() -> Vec<TypeSchema> {
    vec![
        TypeSchema {
            name: "bitmap:port",
            alias: Some("portmap"),
            revision: 0,
            family: Family::Any,
            dimension: Dim::One,
            last_elem_optional: false,
            elem: [Some(ElemSpec::new(Opt::Port, Parser::Port)), None, None],
            create_args: &BITMAP_PORT_CREATE,
            add_args: &TIMEOUT_ONLY,
            mandatory: per_cmd(
                &[Opt::Port, Opt::PortTo],
                &[Opt::Port],
                &[Opt::Port],
                &[Opt::Port],
            ),
            full: per_cmd(
                &[Opt::Port, Opt::PortTo, Opt::Timeout],
                &[Opt::Port, Opt::PortTo, Opt::Timeout],
                &[Opt::Port, Opt::PortTo],
                &[Opt::Port],
            ),
            usage: BITMAP_PORT_USAGE,
        },
        TypeSchema {
            name: "bitmap:ip,mac",
            alias: Some("macipmap"),
            revision: 0,
            family: Family::V4,
            dimension: Dim::Two,
            last_elem_optional: true,
            elem: [
                Some(ElemSpec::new(Opt::Ip, Parser::SingleIp)),
                Some(ElemSpec::new(Opt::Ether, Parser::Ether)),
                None,
            ],
            create_args: &BITMAP_IPMAC_CREATE,
            add_args: &TIMEOUT_ONLY,
            mandatory: per_cmd(
                &[Opt::Ip, Opt::IpTo],
                &[Opt::Ip],
                &[Opt::Ip],
                &[Opt::Ip],
            ),
            full: per_cmd(
                &[Opt::Ip, Opt::IpTo, Opt::Cidr, Opt::Timeout],
                &[Opt::Ip, Opt::Ether, Opt::Timeout],
                &[Opt::Ip, Opt::Ether],
                &[Opt::Ip, Opt::Ether],
            ),
            usage: BITMAP_IPMAC_USAGE,
        },
        TypeSchema {
            name: "hash:ip",
            alias: Some("iphash"),
            revision: 0,
            family: Family::Any,
            dimension: Dim::One,
            last_elem_optional: false,
            elem: [Some(ElemSpec::new(Opt::Ip, Parser::Ip)), None, None],
            create_args: &HASH_IP_CREATE,
            add_args: &HASH_ADD,
            mandatory: per_cmd(&[], &[Opt::Ip], &[Opt::Ip], &[Opt::Ip]),
            full: per_cmd(
                &[Opt::Family, Opt::HashSize, Opt::MaxElem, Opt::Netmask,
                  Opt::Timeout, Opt::Probes, Opt::Resize],
                &[Opt::Ip, Opt::IpTo, Opt::Cidr, Opt::Timeout],
                &[Opt::Ip, Opt::IpTo, Opt::Cidr],
                &[Opt::Ip],
            ),
            usage: HASH_IP_USAGE,
        },
        TypeSchema {
            name: "hash:net",
            alias: Some("nethash"),
            revision: 0,
            family: Family::Any,
            dimension: Dim::One,
            last_elem_optional: false,
            elem: [Some(ElemSpec::new(Opt::Ip, Parser::Net)), None, None],
            create_args: &HASH_CREATE,
            add_args: &HASH_ADD,
            mandatory: per_cmd(
                &[],
                &[Opt::Ip, Opt::Cidr],
                &[Opt::Ip, Opt::Cidr],
                &[Opt::Ip, Opt::Cidr],
            ),
            full: per_cmd(
                &[Opt::Family, Opt::HashSize, Opt::MaxElem, Opt::Timeout],
                &[Opt::Ip, Opt::Cidr, Opt::Timeout],
                &[Opt::Ip, Opt::Cidr],
                &[Opt::Ip, Opt::Cidr],
            ),
            usage: HASH_NET_USAGE,
        },
        TypeSchema {
            name: "hash:ip,port",
            alias: Some("ipporthash"),
            revision: 0,
            family: Family::Any,
            dimension: Dim::Two,
            last_elem_optional: false,
            elem: [
                Some(ElemSpec::new(Opt::Ip, Parser::Ip)),
                Some(ElemSpec::new(Opt::Port, Parser::Port)),
                None,
            ],
            create_args: &HASH_CREATE,
            add_args: &HASH_ADD,
            mandatory: per_cmd(
                &[],
                &[Opt::Ip, Opt::Port],
                &[Opt::Ip, Opt::Port],
                &[Opt::Ip, Opt::Port],
            ),
            full: per_cmd(
                &[Opt::Family, Opt::HashSize, Opt::MaxElem, Opt::Timeout],
                &[Opt::Ip, Opt::IpTo, Opt::Cidr, Opt::Port, Opt::PortTo, Opt::Timeout],
                &[Opt::Ip, Opt::IpTo, Opt::Cidr, Opt::Port, Opt::PortTo],
                &[Opt::Ip, Opt::Port],
            ),
            usage: HASH_IPPORT_USAGE,
        },
        TypeSchema {
            name: "hash:ip,port,ip",
            alias: Some("ipportiphash"),
            revision: 0,
            family: Family::Any,
            dimension: Dim::Three,
            last_elem_optional: false,
            elem: [
                Some(ElemSpec::new(Opt::Ip, Parser::Ip)),
                Some(ElemSpec::new(Opt::Port, Parser::Port)),
                Some(ElemSpec::new(Opt::Ip2, Parser::SingleIp)),
            ],
            create_args: &HASH_CREATE,
            add_args: &HASH_ADD,
            mandatory: per_cmd(
                &[],
                &[Opt::Ip, Opt::Port, Opt::Ip2],
                &[Opt::Ip, Opt::Port, Opt::Ip2],
                &[Opt::Ip, Opt::Port, Opt::Ip2],
            ),
            full: per_cmd(
                &[Opt::Family, Opt::HashSize, Opt::MaxElem, Opt::Timeout],
                &[Opt::Ip, Opt::IpTo, Opt::Cidr, Opt::Port, Opt::PortTo, Opt::Ip2, Opt::Timeout],
                &[Opt::Ip, Opt::IpTo, Opt::Cidr, Opt::Port, Opt::PortTo, Opt::Ip2],
                &[Opt::Ip, Opt::Port, Opt::Ip2],
            ),
            usage: HASH_IPPORTIP_USAGE,
        },
        TypeSchema {
            name: "list:set",
            alias: Some("setlist"),
            revision: 0,
            family: Family::Any,
            dimension: Dim::One,
            last_elem_optional: false,
            elem: [Some(ElemSpec::new(Opt::Name, Parser::Name)), None, None],
            create_args: &LIST_SET_CREATE,
            add_args: &TIMEOUT_ONLY,
            mandatory: per_cmd(&[], &[Opt::Name], &[Opt::Name], &[Opt::Name]),
            full: per_cmd(
                &[Opt::Size, Opt::Timeout],
                &[Opt::Name, Opt::Before, Opt::NameRef, Opt::Timeout],
                &[Opt::Name, Opt::Before, Opt::NameRef],
                &[Opt::Name, Opt::Before, Opt::NameRef],
            ),
            usage: LIST_SET_USAGE,
        },
    ]
}

/* -------------------------------------------------------------------------- */
