//! `perm-splay` — run a sequence command script (stdin) against a `SeqTree`.
//!
//! Usage:
//!   perm-splay [--strict] [--no-dump]
//!
//! Query results are printed one per line, followed by the final sequence.
//! Set `RUST_LOG=debug` to trace every operation.

use perm_splay::command::{parse, run};
use std::io::{self, Read, Write};

fn main() {
    env_logger::init();

    let mut strict = false;
    let mut dump = true;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--strict" => strict = true,
            "--no-dump" => dump = false,
            other => {
                eprintln!("Unknown argument: {other}");
                std::process::exit(1);
            }
        }
    }

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let script = match parse(&buf) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    match run(&script, strict) {
        Ok(report) => {
            for (index, e) in &report.rejected {
                eprintln!("command {index}: {e}");
            }
            if let Err(e) = io::stdout().write_all(report.render(dump).as_bytes()) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
