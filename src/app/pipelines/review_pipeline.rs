use crate::core::analysis::{analyze_sentiment, guess_product};
use crate::core::extract::extract_review;
use crate::core::reader::read_records;
use crate::core::writer::write_csv;
use crate::core::{ChatSession, ConfigProvider, Pipeline, RawRecord, Storage, Throttle};
use crate::domain::model::ReviewRow;
use crate::utils::error::Result;

/// Reviews → guessed product, sentiment and a reply, one model turn at a time.
pub struct ReviewPipeline<St: Storage, C: ConfigProvider, S: ChatSession, T: Throttle> {
    pub(crate) storage: St,
    pub(crate) config: C,
    pub(crate) session: S,
    pub(crate) throttle: T,
}

impl<St: Storage, C: ConfigProvider, S: ChatSession, T: Throttle> ReviewPipeline<St, C, S, T> {
    pub fn new(storage: St, config: C, session: S, throttle: T) -> Self {
        Self {
            storage,
            config,
            session,
            throttle,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }
}

#[async_trait::async_trait]
impl<St, C, S, T> Pipeline for ReviewPipeline<St, C, S, T>
where
    St: Storage,
    C: ConfigProvider,
    S: ChatSession + Sync,
    T: Throttle,
{
    type Row = ReviewRow;

    async fn extract(&self) -> Result<Vec<RawRecord>> {
        read_records(&self.storage, self.config.input_path(), self.config.delimiter()).await
    }

    async fn transform(&mut self, records: Vec<RawRecord>) -> Result<Vec<ReviewRow>> {
        let total = records.len();
        let mut rows = Vec::with_capacity(total);

        for (index, record) in records.iter().enumerate() {
            tracing::info!("Processing review {}/{}", index + 1, total);
            let parsed = extract_review(record);

            // 呼叫順序固定：先猜產品，再分類情緒並回覆
            let guessed_product = guess_product(&mut self.session, &parsed.review_text).await?;
            let analysis = analyze_sentiment(&mut self.session, &parsed.review_text).await?;
            tracing::debug!(
                "Review {}: product={:?}, sentiment={}",
                index + 1,
                guessed_product,
                analysis.sentiment
            );

            rows.push(ReviewRow {
                original_product: parsed.original_product,
                guessed_product,
                review: parsed.review_text,
                sentiment: analysis.sentiment,
                reply: analysis.reply,
            });

            self.throttle.pause(index).await;
        }

        Ok(rows)
    }

    async fn load(&self, rows: Vec<ReviewRow>) -> Result<String> {
        let output_path = self.config.output_path();
        let data = write_csv(&rows)?;

        tracing::debug!("Writing {} rows ({} bytes) to {}", rows.len(), data.len(), output_path);
        self.storage.write_file(output_path, &data).await?;

        Ok(output_path.to_string())
    }
}
