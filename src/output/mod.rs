//! Terminal styling for vaultfill.
//!
//! Status lines go to stderr so that stdout carries only rendered documents
//! and can be piped straight into `kubectl apply -f -`.

use owo_colors::{OwoColorize, Rgb};

const MINT: Rgb = Rgb(152, 225, 152);
const CREAM: Rgb = Rgb(255, 230, 160);

fn status(symbol: &str, colour: Rgb, message: &str) {
    eprintln!("{} {}", symbol.color(colour).bold(), message.bright_white());
}

/// Report a completed write
pub fn success(message: &str) {
    status("✓", MINT, message);
}

/// Report something the user should look at that did not stop the command
pub fn warning(message: &str) {
    status("⚠", CREAM, message);
}

/// Print a rendered document to stdout, unstyled and newline-terminated
pub fn document(contents: &str) {
    if contents.ends_with('\n') {
        print!("{}", contents);
    } else {
        println!("{}", contents);
    }
}
