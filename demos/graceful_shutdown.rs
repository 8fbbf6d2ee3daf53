//! # Example: graceful_shutdown
//!
//! Demonstrates cooperative cancellation mid-retry.
//!
//! Shows how to:
//! - Drive a delivery into its retry loop (recipient missing the push token)
//! - Signal [`DispatchPool::shutdown`] while the retry delay is pending
//! - Observe the delivery abandon its remaining attempts and the pool drain
//!   within the grace period
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► submit(push notification without a token)
//!   │     ├─► attempt 1 fails (missing contact field)
//!   │     └─► retry scheduled, worker parks in its 10s delay
//!   ├─► sleep 1 second
//!   ├─► pool.shutdown()
//!   │     └─► retry loop observes cancellation instead of sleeping on
//!   └─► pool.join(grace)
//!         └─► [canceled] + [drained-within-grace]
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example graceful_shutdown
//! ```

use std::sync::Arc;
use std::time::Duration;

use notivisor::{Channel, Config, DispatchPool, LogWriter, Notification, Recipient, Subscribe};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== graceful_shutdown example ===\n");

    // 1. Long retry delay so shutdown lands inside the pause.
    let mut cfg = Config::default();
    cfg.retry_delay = Duration::from_secs(10);

    let subscribers: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let pool = DispatchPool::new(cfg, subscribers);

    // 2. A push notification whose recipient never registered a device:
    // every attempt fails, so the worker ends up waiting between attempts.
    let recipient = Arc::new(Recipient::new("user789").with_email("no.devices@example.com"));
    pool.submit(
        Notification::builder(recipient, Channel::Push)
            .subject("Re-engagement")
            .body("We miss you!")
            .build(),
    );

    // 3. Let attempt 1 fail and the retry delay start.
    tokio::time::sleep(Duration::from_secs(1)).await;

    // 4. Shut down: the parked retry observes the cancellation immediately
    // instead of waiting out the remaining ~9 seconds.
    println!("\n[main] requesting shutdown mid-retry...");
    pool.shutdown();
    pool.join(Duration::from_secs(5)).await?;

    println!("\n[main] pool drained; no further attempts were made");
    Ok(())
}
