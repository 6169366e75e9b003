use crate::domain::model::{RawRecord, TabularRow};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn delimiter(&self) -> &str;
}

/// A stateful conversation with the remote model. Every turn is appended to
/// the same history, so calls must happen one at a time and in order.
#[async_trait]
pub trait ChatSession: Send {
    /// Sends one user turn and returns the trimmed text of the reply.
    async fn send_message(&mut self, message: &str) -> Result<String>;
}

/// Pause applied between records to stay under remote rate limits.
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self, record_index: usize);
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Row: TabularRow + Send;

    async fn extract(&self) -> Result<Vec<RawRecord>>;
    async fn transform(&mut self, records: Vec<RawRecord>) -> Result<Vec<Self::Row>>;
    async fn load(&self, rows: Vec<Self::Row>) -> Result<String>;
}
