// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{parse_name, strings::*, ParseError};
use crate::{
    settypes::{Dim, ElemSpec, Parser, TypeSchema},
    Session,
};
use std::sync::Arc;
use tracing::debug;

/// Split `s` into the fields of an element of `ty`, checking the separator count.
fn split_elem<'a>(ty: &TypeSchema, optional: bool, s: &'a str) -> Result<Vec<&'a str>, ParseError> {
    let fields: Vec<&str> = s.splitn(4, ELEM_SEPARATOR).collect();
    let separators: usize = fields.len() - 1;
    let typename: &'static str = ty.name;

    match ty.dimension {
        Dim::One if separators > 0 => Err(ParseError::NoCompound {
            elem: s.into(),
            typename,
        }),
        Dim::Two if separators > 1 => Err(ParseError::TooManyForOne {
            elem: s.into(),
            typename,
        }),
        Dim::Three if separators > 2 => Err(ParseError::TooManyForTwo {
            elem: s.into(),
            typename,
        }),
        Dim::Two | Dim::Three if separators == 0 && !optional => {
            Err(ParseError::MissingSecond(s.into()))
        }
        Dim::Three if separators == 1 && !optional => Err(ParseError::MissingThird(s.into())),
        _ => Ok(fields),
    }
}

/**
Parse a compound element of the set type bound to the session.

The string is split at the element separators into as many fields as the
type has dimensions, and each field goes to the parser the type registers for
its dimension. With `optional` the trailing fields may be left out.

Fields are parsed in order and the first failure ends the parse; the fields
parsed before it stay in the data store.
*/
pub fn parse_elem(session: &mut Session, optional: bool, s: &str) -> Result<(), ParseError> {
    let ty: Arc<TypeSchema> = match session.type_schema() {
        Some(ty) => Arc::clone(ty),
        None => return session.record(Err(ParseError::NoType)),
    };
    let fields: Vec<&str> = match split_elem(&ty, optional, s) {
        Ok(fields) => fields,
        Err(e) => return session.record(Err(e)),
    };
    debug!("elem {s} of {}: {fields:?}", ty.name);

    for (dim, field) in Dim::ALL.into_iter().zip(fields) {
        let spec: ElemSpec = match ty.elem(dim) {
            Some(spec) => *spec,
            None => {
                return session.record(Err(ParseError::NoParser {
                    typename: ty.name,
                    dim,
                }))
            }
        };
        // field parsers record their own errors
        spec.parser.parse(session, spec.opt, field)?;
    }
    Ok(())
}

/**
Parse the element argument of an `add`, `del` or `test` command.

Types whose single field is a set name take `name,before|after,name` whole,
through [parse_name]. Every other type goes through [parse_elem], with the
trailing field optional if the type says so.
*/
pub fn parse_command_elem(session: &mut Session, s: &str) -> Result<(), ParseError> {
    let ty: Arc<TypeSchema> = match session.type_schema() {
        Some(ty) => Arc::clone(ty),
        None => return session.record(Err(ParseError::NoType)),
    };
    match ty.elem(Dim::One) {
        Some(ElemSpec { opt, parser: Parser::Name }) if ty.dimension == Dim::One => {
            parse_name(session, *opt, s)
        }
        _ => parse_elem(session, ty.last_elem_optional, s),
    }
}

/* -------------------------------------------------------------------------- */
