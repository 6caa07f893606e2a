/// Settled success payload. The shape follows the service's response format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessedResult {
    /// Only a retrievable rendered artifact.
    Artifact { artifact_url: String },
    /// A rendered artifact plus its textual source.
    Structured {
        artifact_url: String,
        source_text: String,
    },
}

impl ProcessedResult {
    pub fn artifact_url(&self) -> &str {
        match self {
            ProcessedResult::Artifact { artifact_url }
            | ProcessedResult::Structured { artifact_url, .. } => artifact_url,
        }
    }

    pub fn source_text(&self) -> Option<&str> {
        match self {
            ProcessedResult::Artifact { .. } => None,
            ProcessedResult::Structured { source_text, .. } => Some(source_text),
        }
    }
}

/// What came back from the processing service for one request, already
/// classified by response shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceReply {
    Artifact {
        artifact_url: String,
    },
    Structured {
        artifact_url: String,
        source_text: String,
    },
    /// Non-success response; `error` is the service's own message when it sent one.
    Rejected {
        error: Option<String>,
    },
    /// The request never produced a response.
    Unreachable {
        reason: String,
    },
}
