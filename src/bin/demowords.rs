// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! demowords: group dictionary words by letter score

use std::process::ExitCode;

fn main() -> ExitCode {
    bmfontrender::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match bmfontrender::run_word_report(&args) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
