//! A small diagnostics sink for conditions the core wants to surface but not
//! abort on (an unknown opcode, a rejected cartridge). Kept deliberately
//! simple: a line to stderr, colored the way the trace binary colors its
//! disassembly output, with nothing fancier pulled in for it.

use colored::Colorize;

/// Non-fatal: something the CPU recovered from and kept running past.
pub fn warn(text: &str) {
    eprintln!("{} {}", "[warn]".yellow().bold(), text);
}

/// Load-time rejection: the CPU was never started.
pub fn error(text: &str) {
    eprintln!("{} {}", "[error]".red().bold(), text);
}

/// Informational trace output, used by the demo binary's disassembly log.
pub fn trace(text: &str) {
    println!("{}", text);
}
