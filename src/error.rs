#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Transport failure or non-success response from the data provider.
    /// Fatal for the current run; retry policy belongs to the caller.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The outer envelope of a response is not the expected shape.
    /// Fatal for the current run.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// An individual card, legality, or price row failed validation.
    /// Non-fatal; the record is skipped and counted.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A card record carries no scryfall image identifier. Per-card failure;
    /// sibling cards in the same set are unaffected.
    #[error("card '{0}' has no scryfall id")]
    MissingImageIdentifier(String),

    /// The storage collaborator rejected a batch. Propagated unchanged;
    /// batches already flushed stay persisted.
    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// True for failures that skip a single record rather than abort the run.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            IngestError::MalformedRecord(_) | IngestError::MissingImageIdentifier(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
