// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
Parsers for the textual input of IP set administration commands: set and
type names, addresses, networks and ranges, ports, ethernet addresses, small
numeric options and compound `a,b,c` elements.

All parsers work on a [Session], which holds the parsed values, the address
family, the bound set type and a report of errors and warnings:

```
use setparse::{parse_elem, parse_typename, Opt, Session};

let mut session = Session::new();
parse_typename(&mut session, Opt::TypeName, "hash:ip,port").unwrap();
parse_elem(&mut session, false, "192.168.0.1,http").unwrap();
assert_eq!(session.data().port(Opt::Port), Some(80));
```
*/

mod parse;
mod session;
mod settypes;
mod strtonum;

pub use parse::*;
pub use session::{Data, Level, OutputMode, Report, Session};
pub use settypes::{
    ArgKind, ArgSpec, Cmd, Dim, ElemSpec, ParseFn, Parser, TypeRegistry, TypeSchema,
};
pub use strtonum::{str_to_number, str_to_u16, str_to_u32, str_to_u8};

/// Size of a set or type name buffer; names hold at most `MAXNAMELEN - 1` characters.
pub const MAXNAMELEN: usize = 32;
