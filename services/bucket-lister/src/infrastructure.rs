// Infrastructure layer modules
pub mod bucket_lister;
pub mod logging;
pub mod s3_config;

// Re-exports
pub use bucket_lister::{BucketListError, BucketLister, BucketSummary, S3BucketLister};
pub use logging::init_logging;
pub use s3_config::S3ClientConfig;
