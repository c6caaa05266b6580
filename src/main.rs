// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! bmfontrender: render text with a bitmap font

use std::process::ExitCode;

fn main() -> ExitCode {
    bmfontrender::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match bmfontrender::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
