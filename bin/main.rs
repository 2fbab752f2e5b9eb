//! nin CLI Entry Point
//!
//! This binary provides the command-line interface for nin.

use std::process;

fn main() {
    if let Err(e) = nin_interface::run_cli() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
