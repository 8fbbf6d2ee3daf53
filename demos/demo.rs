//! # Example: demo
//!
//! Demonstrates the basic dispatch flow end to end.
//!
//! Shows how to:
//! - Build a [`DispatchPool`] with a [`LogWriter`] subscriber
//! - Submit notifications over all three channels
//! - Watch a recipient without the required contact field exhaust retries
//!   while every other delivery proceeds untouched
//!
//! ## Run
//! ```bash
//! cargo run --example demo
//! ```

use std::sync::Arc;
use std::time::Duration;

use notivisor::{Channel, Config, DispatchPool, LogWriter, Notification, Recipient, Subscribe};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== demo ===\n");

    // 1. Configure the pool: 10 workers, 3 attempts, 1s between attempts.
    let mut cfg = Config::default();
    cfg.retry_delay = Duration::from_millis(500);

    // 2. Attach a subscriber so delivery events reach stdout.
    let subscribers: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let pool = DispatchPool::new(cfg, subscribers);

    // 3. Define recipients.
    let john = Arc::new(
        Recipient::new("user123")
            .with_email("john.doe@example.com")
            .with_push_token("pushToken123"),
    );
    let jane = Arc::new(Recipient::new("user456").with_phone_number("+15551234567"));

    // 4. Send various notifications.

    // Scenario 1: a welcome email.
    pool.submit(
        Notification::builder(Arc::clone(&john), Channel::Email)
            .subject("Welcome!")
            .body("Welcome to the notification system")
            .build(),
    );

    // Scenario 2: a direct push notification.
    pool.submit(
        Notification::builder(Arc::clone(&john), Channel::Push)
            .subject("New Message")
            .body("You have a new message from Jane.")
            .build(),
    );

    // Scenario 3: an order-confirmation SMS.
    pool.submit(
        Notification::builder(Arc::clone(&jane), Channel::Sms)
            .body("Your order for Digital Clock is confirmed")
            .build(),
    );

    // Scenario 4: an SMS to a recipient with no phone number — every attempt
    // fails validation, and after 3 attempts the delivery is abandoned
    // without disturbing the deliveries above.
    pool.submit(
        Notification::builder(Arc::clone(&john), Channel::Sms)
            .body("This one can never arrive")
            .build(),
    );

    // 5. Let the workers run, then shut the pool down.
    tokio::time::sleep(Duration::from_secs(2)).await;

    println!("\nShutting down the notification system...");
    pool.shutdown();
    pool.join(Duration::from_secs(5)).await?;
    println!("System shut down successfully.");
    Ok(())
}
