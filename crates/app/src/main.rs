//! Demo entry point: runs one bucket through its whole lifecycle.

use std::error::Error;

use app::{BucketService, Config, ServiceError, telemetry};
use common::{RequestId, report};
use domain::{CloseBucket, OpenBucket, UpdateBucket};
use event_store::InMemoryEventStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    telemetry::init(&config)?;

    // 2. Create event store and service
    let service = BucketService::with_config(InMemoryEventStore::new(), &config);

    // 3. Open, update and close a bucket
    let open = OpenBucket::generated("Demo bucket", "Created by the demo")
        .with_request_id(RequestId::new());
    let id = open.id.clone();
    let view = service.open(open).await?;
    tracing::info!(?view, "opened");

    let view = service
        .update(
            UpdateBucket::new(id.clone(), "Renamed bucket", "Updated by the demo")
                .with_request_id(RequestId::new()),
        )
        .await?;
    tracing::info!(?view, "updated");

    let view = service
        .close(CloseBucket::new(id.clone()).with_request_id(RequestId::new()))
        .await?;
    tracing::info!(?view, "closed");

    // 4. A closed bucket rejects further changes
    if let Err(err) = service
        .update(UpdateBucket::new(id.clone(), "Too late", ""))
        .await
    {
        tracing::info!(kind = %err.kind(), error = %report(&err), "update after close refused");
        println!("update refused: {}", shown_message(&err));
    }

    println!("{}", serde_json::to_string_pretty(&service.get(&id).await?)?);
    Ok(())
}

/// The message a caller gets to see: unexpected failures stay opaque.
fn shown_message(err: &ServiceError) -> String {
    if err.kind().is_user_facing() {
        err.to_string()
    } else {
        "internal error".to_string()
    }
}
