pub mod email_pipeline;
pub mod review_pipeline;

pub use email_pipeline::EmailPipeline;
pub use review_pipeline::ReviewPipeline;
