//! Bucket service: runs commands against an event store.

use std::time::Instant;

use common::{ErrorKind, RequestId, StreamId, Validate, report};
use domain::{BucketEvent, CloseBucket, OpenBucket, UpdateBucket, decode_stream};
use event_store::{EventStore, EventStoreError};
use projections::{BucketView, new_view};

use crate::config::Config;
use crate::error::ServiceError;

/// Service for managing buckets.
///
/// Every command is validated, checked against the freshly loaded stream,
/// appended with the store's version check and answered with the view of
/// the resulting stream. Nothing is cached between calls.
pub struct BucketService<S: EventStore> {
    store: S,
    strict_open: bool,
}

impl<S: EventStore> BucketService<S> {
    /// Creates a service with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, &Config::default())
    }

    pub fn with_config(store: S, config: &Config) -> Self {
        Self {
            store,
            strict_open: config.strict_open,
        }
    }

    /// Returns a reference to the underlying event store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Opens a new bucket.
    #[tracing::instrument(skip_all, fields(stream_id = %cmd.id, request_id = request_id(&cmd.request_id)))]
    pub async fn open(&self, cmd: OpenBucket) -> Result<BucketView, ServiceError> {
        let start = Instant::now();
        let result = self.run_open(&cmd).await;
        observe("open", start, &result);
        result
    }

    /// Replaces the title and description of an open bucket.
    #[tracing::instrument(skip_all, fields(stream_id = %cmd.id, request_id = request_id(&cmd.request_id)))]
    pub async fn update(&self, cmd: UpdateBucket) -> Result<BucketView, ServiceError> {
        let start = Instant::now();
        let result = self.run_update(&cmd).await;
        observe("update", start, &result);
        result
    }

    /// Closes an open bucket.
    #[tracing::instrument(skip_all, fields(stream_id = %cmd.id, request_id = request_id(&cmd.request_id)))]
    pub async fn close(&self, cmd: CloseBucket) -> Result<BucketView, ServiceError> {
        let start = Instant::now();
        let result = self.run_close(&cmd).await;
        observe("close", start, &result);
        result
    }

    /// Returns the current view of a bucket.
    #[tracing::instrument(skip_all, fields(stream_id = %id))]
    pub async fn get(&self, id: &StreamId) -> Result<BucketView, ServiceError> {
        let start = Instant::now();
        let result = self.run_get(id).await;
        observe("get", start, &result);
        result
    }

    async fn run_get(&self, id: &StreamId) -> Result<BucketView, ServiceError> {
        id.validate().map_err(ServiceError::InvalidRequest)?;

        let stream = self.load(id).await?;
        Ok(new_view(id, &stream)?)
    }

    async fn run_open(&self, cmd: &OpenBucket) -> Result<BucketView, ServiceError> {
        cmd.validate().map_err(ServiceError::InvalidRequest)?;

        let event = domain::open(cmd)?;
        let envelope = event.encode().map_err(ServiceError::Encode)?;

        let inserted = if self.strict_open {
            self.store.open_stream(envelope).await
        } else {
            // a first event can only conflict with an existing stream
            self.store
                .insert_event(envelope)
                .await
                .map_err(|err| match err {
                    EventStoreError::VersionConflict { stream_id, .. } => {
                        EventStoreError::AlreadyExists(stream_id)
                    }
                    other => other,
                })
        };
        inserted.map_err(ServiceError::Insert)?;

        Ok(new_view(&cmd.id, std::slice::from_ref(&event))?)
    }

    async fn run_update(&self, cmd: &UpdateBucket) -> Result<BucketView, ServiceError> {
        cmd.validate().map_err(ServiceError::InvalidRequest)?;

        let mut stream = self.load(&cmd.id).await?;
        let event = domain::update(cmd, &stream)?;
        self.insert(&event).await?;
        stream.push(event);

        Ok(new_view(&cmd.id, &stream)?)
    }

    async fn run_close(&self, cmd: &CloseBucket) -> Result<BucketView, ServiceError> {
        cmd.validate().map_err(ServiceError::InvalidRequest)?;

        let mut stream = self.load(&cmd.id).await?;
        let event = domain::close(cmd, &stream)?;
        self.insert(&event).await?;
        stream.push(event);

        Ok(new_view(&cmd.id, &stream)?)
    }

    async fn load(&self, id: &StreamId) -> Result<Vec<BucketEvent>, ServiceError> {
        let envelopes = self.store.get_stream(id).await.map_err(ServiceError::Load)?;
        decode_stream(id, &envelopes).map_err(ServiceError::Decode)
    }

    async fn insert(&self, event: &BucketEvent) -> Result<(), ServiceError> {
        let envelope = event.encode().map_err(ServiceError::Encode)?;
        self.store
            .insert_event(envelope)
            .await
            .map_err(ServiceError::Insert)?;
        Ok(())
    }
}

fn request_id(request_id: &Option<RequestId>) -> Option<&str> {
    request_id.as_ref().map(RequestId::as_str)
}

/// Records metrics and logs the outcome of an operation.
fn observe(command: &'static str, start: Instant, result: &Result<BucketView, ServiceError>) {
    metrics::counter!("bucket_commands_total", "command" => command).increment(1);
    metrics::histogram!("bucket_command_duration_seconds", "command" => command)
        .record(start.elapsed().as_secs_f64());

    let err = match result {
        Ok(view) => {
            tracing::info!(version = %view.version, closed = view.is_closed, "{command} succeeded");
            return;
        }
        Err(err) => err,
    };

    let kind = err.kind();
    metrics::counter!(
        "bucket_command_failures_total",
        "command" => command,
        "kind" => kind.as_str()
    )
    .increment(1);

    match kind {
        ErrorKind::Unexpected => {
            tracing::error!(
                error = %report(err),
                retryable = err.is_retryable(),
                "{command} failed"
            );
        }
        ErrorKind::Expected | ErrorKind::AlreadyExists => {
            tracing::warn!(error = %report(err), %kind, "{command} rejected");
        }
        ErrorKind::Validation | ErrorKind::NotFound => {
            tracing::info!(error = %report(err), %kind, "{command} rejected");
        }
    }
}
