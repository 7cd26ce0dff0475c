//! Repository Example
//!
//! Demonstrates outcome pipelines over a small in-memory store.
//! Shows practical patterns including:
//! - Domain errors (not found, validation) as reasons
//! - Chaining lookups with bind
//! - Recovering with a default while keeping the error history
//! - Collecting many lookups with traverse and partition

use std::collections::HashMap;

use verdict::errors::{NotFoundError, ValidationError};
use verdict::traverse::{partition, traverse};
use verdict::Outcome;

#[derive(Debug, Clone)]
struct Order {
    id: u32,
    customer: String,
    total_cents: i64,
}

struct Store {
    orders: HashMap<u32, Order>,
}

impl Store {
    fn seeded() -> Self {
        let orders = [
            Order { id: 1, customer: "ada".into(), total_cents: 4_250 },
            Order { id: 2, customer: "".into(), total_cents: -10 },
            Order { id: 3, customer: "grace".into(), total_cents: 990 },
        ];
        Store {
            orders: orders.into_iter().map(|o| (o.id, o)).collect(),
        }
    }

    fn load(&self, id: u32) -> Outcome<Order> {
        match self.orders.get(&id) {
            Some(order) => Outcome::success(order.clone()).with_metadata("order_id", id),
            None => Outcome::from_error(NotFoundError::new("order", id)),
        }
    }
}

fn check(order: Order) -> Outcome<Order> {
    let mut problems = Vec::new();
    if order.customer.is_empty() {
        problems.push("customer is missing");
    }
    if order.total_cents < 0 {
        problems.push("total is negative");
    }
    match ValidationError::many(problems) {
        Some(error) => Outcome::from_error(error),
        None => Outcome::success(order).with_success("order checked"),
    }
}

// ==================== Single Lookups ====================

/// Example 1: lookup then validation
fn example_single_lookups(store: &Store) {
    println!("\n=== Example 1: Single Lookups ===");

    for id in [1, 2, 9] {
        let outcome = store.load(id).bind(check);
        println!("order {}: {}", id, outcome);
    }
}

// ==================== Recovery ====================

/// Example 2: default for missing orders
fn example_recovery(store: &Store) {
    println!("\n=== Example 2: Recovery ===");

    let outcome = store.load(42).recover(|_| Order {
        id: 0,
        customer: "walk-in".into(),
        total_cents: 0,
    });

    println!("recovered: {}", outcome);
    outcome.if_success(|order| println!("  serving {}", order.customer));
    let note = outcome.match_error::<NotFoundError, _, _, _>(
        |e| format!("  fell back because {} '{}' is missing", e.resource(), e.identifier()),
        || "  no fallback needed".to_string(),
    );
    println!("{}", note);
}

// ==================== Batches ====================

/// Example 3: traverse fails fast, partition keeps going
fn example_batches(store: &Store) {
    println!("\n=== Example 3: Batches ===");

    let ids = [1, 3, 7, 2];

    let all = traverse(ids, |id| store.load(id).bind(check));
    println!("traverse: {}", all);

    let (good, bad) = partition(ids.into_iter().map(|id| store.load(id).bind(check)));
    println!("partition: {} good, {} bad", good.len(), bad.len());
    for fault in bad {
        println!("  - {}", fault);
    }
}

fn main() {
    println!("Repository Examples");
    println!("===================");

    let store = Store::seeded();
    example_single_lookups(&store);
    example_recovery(&store);
    example_batches(&store);

    println!("\n=== All examples completed successfully! ===");
}
