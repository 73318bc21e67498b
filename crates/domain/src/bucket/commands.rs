//! Bucket commands.

use common::{RequestId, StreamId, Validate, ValidationError, validate_args};

use crate::command::Command;

use super::{Description, Title};

/// Command to open a new bucket.
#[derive(Debug, Clone)]
pub struct OpenBucket {
    /// The stream to create.
    pub id: StreamId,

    /// The request carrying this command.
    pub request_id: Option<RequestId>,

    pub title: Title,

    pub description: Description,
}

impl OpenBucket {
    /// Creates a new OpenBucket command.
    pub fn new(
        id: impl Into<StreamId>,
        title: impl Into<Title>,
        description: impl Into<Description>,
    ) -> Self {
        Self {
            id: id.into(),
            request_id: None,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Creates an OpenBucket command for a freshly generated stream ID.
    pub fn generated(title: impl Into<Title>, description: impl Into<Description>) -> Self {
        Self::new(StreamId::generate(), title, description)
    }

    /// Attaches the ID of the request carrying this command.
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

impl Validate for OpenBucket {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_args(&[&self.id, &self.request_id, &self.title, &self.description])
    }
}

impl Command for OpenBucket {
    fn stream_id(&self) -> &StreamId {
        &self.id
    }

    fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }
}

/// Command to replace a bucket's title and description.
#[derive(Debug, Clone)]
pub struct UpdateBucket {
    /// The bucket to update.
    pub id: StreamId,

    /// The request carrying this command.
    pub request_id: Option<RequestId>,

    /// New title.
    pub title: Title,

    /// New description.
    pub description: Description,
}

impl UpdateBucket {
    /// Creates a new UpdateBucket command.
    pub fn new(
        id: impl Into<StreamId>,
        title: impl Into<Title>,
        description: impl Into<Description>,
    ) -> Self {
        Self {
            id: id.into(),
            request_id: None,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Attaches the ID of the request carrying this command.
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

impl Validate for UpdateBucket {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_args(&[&self.id, &self.request_id, &self.title, &self.description])
    }
}

impl Command for UpdateBucket {
    fn stream_id(&self) -> &StreamId {
        &self.id
    }

    fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }
}

/// Command to close a bucket.
#[derive(Debug, Clone)]
pub struct CloseBucket {
    /// The bucket to close.
    pub id: StreamId,

    /// The request carrying this command.
    pub request_id: Option<RequestId>,
}

impl CloseBucket {
    /// Creates a new CloseBucket command.
    pub fn new(id: impl Into<StreamId>) -> Self {
        Self {
            id: id.into(),
            request_id: None,
        }
    }

    /// Attaches the ID of the request carrying this command.
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

impl Validate for CloseBucket {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_args(&[&self.id, &self.request_id])
    }
}

impl Command for CloseBucket {
    fn stream_id(&self) -> &StreamId {
        &self.id
    }

    fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }
}
