// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Separates an address from its prefix length: `10.0.0.0/8`.
pub const CIDR_SEPARATOR: char = '/';
/// Separates the two ends of an address or port range: `10.0.0.1-10.0.0.9`.
pub const RANGE_SEPARATOR: char = '-';
/// Separates the fields of a compound element: `10.0.0.1,80`.
pub const ELEM_SEPARATOR: char = ',';
/// Separates the method and datatype parts of a type name: `hash:ip`.
pub const NAME_SEPARATOR: char = ':';

pub(crate) static ETHER_SEPARATOR: char = ':';
pub(crate) static BEFORE: &str = "before";
pub(crate) static AFTER: &str = "after";

pub(crate) static ERR_SYNTAX: &str = "Syntax error";

// strtonum.rs
pub(crate) static ERR_NUM_INVALID: &str = "is invalid as number";
pub(crate) static ERR_NUM_RANGE: &str = "is out of range";
pub(crate) static ERR_NETMASK: &str = "netmask is out of the inclusive range of";

// addresses.rs, resolve.rs
pub(crate) static ERR_NOT_PLAIN: &str = "plain IP address must be supplied";
pub(crate) static ERR_NOT_NET: &str = "IP/netblock must be supplied";
pub(crate) static ERR_NOT_RANGE: &str = "IP-IP range must be supplied";
pub(crate) static ERR_NOT_NETRANGE: &str = "IP/net or IP-IP range must be specified";
pub(crate) static ERR_AMBIGUOUS: &str = "either IP/net or IP-IP range must be specified, not both";
pub(crate) static ERR_RESOLVE: &str = "cannot resolve";
pub(crate) static ERR_NO_ADDR: &str = "address could not be resolved";
pub(crate) static WARN_MULTI_ADDR: &str =
    "resolves to multiple addresses: using only the first one returned by the resolver";

// ports.rs, ether.rs, options.rs
pub(crate) static ERR_PORT: &str = "cannot parse as a (TCP) port";
pub(crate) static ERR_ETHER: &str = "cannot parse as ethernet address";
pub(crate) static ERR_FAMILY: &str = "unknown INET family";
pub(crate) static ERR_OUTPUT: &str = "unknown output mode";

// names.rs
pub(crate) static ERR_NAME_LEN: &str = "is longer than";
pub(crate) static ERR_NAME_PATTERN: &str = "you must specify elements as setname,[before|after],setname";
pub(crate) static ERR_TYPE_FAMILY: &str = "does not support family";
pub(crate) static ERR_TYPE_UNKNOWN: &str = "unknown typename";
pub(crate) static ERR_ALLOC: &str = "cannot allocate memory to duplicate";

// elem.rs
pub(crate) static ERR_ELEM_NONE: &str = "supports no compound elements";
pub(crate) static ERR_ELEM_ONE: &str = "supports only one elem separator";
pub(crate) static ERR_ELEM_TWO: &str = "supports only two elem separators";
pub(crate) static ERR_ELEM_SECOND: &str = "second element is missing from";
pub(crate) static ERR_ELEM_THIRD: &str = "third element is missing from";
pub(crate) static ERR_INTERNAL: &str = "Internal error";
pub(crate) static ERR_NO_TYPE: &str = "set type is unknown";
pub(crate) static ERR_NO_PARSER: &str = "missing parser function for";

// session.rs
pub(crate) static ERR_STORE_KIND: &str = "wrong kind of value for option";
pub(crate) static ERR_STORE_FAMILY: &str = "address does not match the family of the session";
