// Domain layer modules
pub mod response_envelope;

// Re-exports
pub use response_envelope::{
    ErrorBody, ListBucketsBody, ResponseEnvelope, ERROR_MESSAGE_PREFIX, SUCCESS_MESSAGE,
};
