//! Context Trail Example
//!
//! Demonstrates how faults keep their causes as context is added.
//! Shows practical patterns including:
//! - with_context / append_error building a trail
//! - ShortCircuit vs Accumulate when replacing a fault
//! - Walking the trail with the alternate Display form

use std::fs;

use verdict::{ChainPolicy, Fault, Outcome};

fn read_config(path: &str) -> Outcome<String> {
    Outcome::from_result(fs::read_to_string(path))
}

fn parse_port(text: String) -> Outcome<u16> {
    Outcome::from_result(text.trim().parse::<u16>())
}

// ==================== Context Trail ====================

/// Example 1: each layer adds context, the cause is kept
fn example_trail() {
    println!("\n=== Example 1: Context Trail ===");

    let port = read_config("/definitely/not/here.conf")
        .with_context("reading config: ")
        .bind(parse_port)
        .with_context("starting server: ")
        .append_error(" (giving up)");

    println!("outcome: {}", port);
    if let Some(fault) = port.fault() {
        println!("trail:\n{:#}", fault);
        println!("root cause kind: {}", fault.root_cause().kind());
    }
}

// ==================== Policies ====================

/// Example 2: replacing a fault with and without its history
fn example_policies() {
    println!("\n=== Example 2: Policies ===");

    let failing = || parse_port("eighty".to_string()).with_metadata("source", "env");

    let replaced = failing().map_error(|_| Fault::new("invalid port"));
    println!("short-circuit: {}", replaced);

    let accumulated =
        failing().map_error_with(ChainPolicy::Accumulate, |_| Fault::new("invalid port"));
    println!("accumulate:    {}", accumulated);
}

fn main() {
    println!("Context Trail Examples");
    println!("======================");

    example_trail();
    example_policies();

    println!("\n=== All examples completed successfully! ===");
}
