#[derive(thiserror::Error, Debug)]
pub enum ContainerError {
    #[error("Invalid file header: expected magic \"sVCr\", read {0:02X?}")]
    InvalidHeader([u8; 4]),

    #[error("Truncated input while reading {field} at offset {offset}: needed {needed} bytes")]
    TruncatedInput {
        field: &'static str,
        offset: u64,
        needed: usize,
    },

    #[error("Frame length {length} exceeds payload buffer capacity {capacity}")]
    MalformedFrame { length: usize, capacity: usize },
}

#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("Failed to create codec session: {0}")]
    SessionCreate(String),

    #[error("Failed to decode packet of {length} bytes: {reason}")]
    Decode { length: usize, reason: String },

    #[error("Decoded sample count mismatch: expected {expected}, got {actual}")]
    SampleCount { expected: usize, actual: usize },
}
