// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use setparse::{parse_command_elem, parse_typename, Opt, Session, TypeRegistry, TypeSchema};
use std::{env, process::ExitCode, sync::Arc};

fn usage() -> ExitCode {
    eprintln!("usage: element-checker TYPENAME ELEMENT...");
    eprintln!("known types: {}", TypeRegistry::global().names().join(" "));
    ExitCode::from(2)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some((typename, elems)) = args.split_first() else {
        return usage();
    };
    if elems.is_empty() {
        return usage();
    }

    let mut session: Session = Session::new();
    if parse_typename(&mut session, Opt::TypeName, typename).is_err() {
        eprintln!("{}", session.report());
        return ExitCode::FAILURE;
    }
    let Some(ty): Option<Arc<TypeSchema>> = session.type_schema().cloned() else {
        return ExitCode::FAILURE;
    };
    eprintln!("{} revision {}, dimension {}", ty.name, ty.revision, ty.dimension);

    let mut failed: bool = false;
    for elem in elems {
        session.reset();
        session.bind_type(Arc::clone(&ty));

        match parse_command_elem(&mut session, elem) {
            Ok(()) => {
                eprintln!("{elem}: {:?}", session.data());
                for warning in session.report().warnings() {
                    eprintln!("Warning: {warning}");
                }
            }
            Err(_) => {
                eprintln!("{elem}: {}", session.report());
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
