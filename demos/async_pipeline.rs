//! Async Pipeline Example
//!
//! Demonstrates the async combinators.
//! Shows practical patterns including:
//! - bind_async / map_async over outcome futures
//! - Sequential traverse_async
//! - Concurrent health checks with combine_async

use std::time::Duration;

use verdict::future::{combine_async, traverse_async, OutcomeFutureExt};
use verdict::Outcome;

async fn resolve(host: &'static str) -> Outcome<[u8; 4]> {
    tokio::time::sleep(Duration::from_millis(5)).await;
    match host {
        "db.internal" => Outcome::success([10, 0, 0, 5]).with_success("resolved from cache"),
        "api.internal" => Outcome::success([10, 0, 0, 7]),
        _ => Outcome::failure(format!("no such host: {}", host)),
    }
}

async fn ping(addr: [u8; 4]) -> Outcome<()> {
    tokio::time::sleep(Duration::from_millis(5)).await;
    if addr[3] % 2 == 1 {
        Outcome::completed().with_metadata("latency_ms", 5)
    } else {
        Outcome::failure(format!("{:?} did not answer", addr))
    }
}

#[tokio::main]
async fn main() {
    println!("Async Pipeline Examples");
    println!("=======================");

    println!("\n=== Example 1: bind_async ===");
    let reachable = resolve("db.internal")
        .bind_async(|addr| async move { ping(addr).await.map(|_| addr) })
        .map_async(|addr| async move { format!("{}.{}.{}.{}", addr[0], addr[1], addr[2], addr[3]) })
        .await;
    println!("db: {}", reachable);

    println!("\n=== Example 2: traverse_async ===");
    let addrs = traverse_async(["db.internal", "cache.internal", "api.internal"], resolve).await;
    println!("resolve all: {}", addrs);

    println!("\n=== Example 3: combine_async ===");
    let checks = ["db.internal", "api.internal", "queue.internal"]
        .into_iter()
        .map(|host| resolve(host).bind_async(ping));
    let report = combine_async(checks).await;
    println!("health: {}", report);
    if let Some(fault) = report.fault() {
        for member in fault.inner_faults() {
            println!("  - {}", member);
        }
    }

    println!("\n=== All examples completed successfully! ===");
}
