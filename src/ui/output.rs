use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(icon: &str, text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", icon, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, label.style(theme().found.clone()));
}

pub fn not_found(identifier: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {} {}", Icons::EMPTY, identifier.style(theme().missing.clone()), "not found".style(theme().dim.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn info(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!("  {}: {}", label.style(theme().label.clone()), value);
}

/// Template source is the payload, it is printed even in quiet mode
pub fn source_block(source: &str) {
    if !is_quiet() {
        println!("{}", "─".repeat(40).style(theme().dim.clone()));
    }
    print!("{}", source);
    if !source.ends_with('\n') {
        println!();
    }
}
