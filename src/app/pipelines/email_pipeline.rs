use crate::core::analysis::{summarize_and_translate, TARGET_LANGUAGE};
use crate::core::extract::extract_email;
use crate::core::reader::read_records;
use crate::core::writer::write_csv;
use crate::core::{ChatSession, ConfigProvider, Pipeline, RawRecord, Storage};
use crate::domain::model::EmailRow;
use crate::utils::error::Result;

/// Emails → summary in the original language plus a translation of it.
/// No pause between records.
pub struct EmailPipeline<St: Storage, C: ConfigProvider, S: ChatSession> {
    pub(crate) storage: St,
    pub(crate) config: C,
    pub(crate) session: S,
}

impl<St: Storage, C: ConfigProvider, S: ChatSession> EmailPipeline<St, C, S> {
    pub fn new(storage: St, config: C, session: S) -> Self {
        Self {
            storage,
            config,
            session,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }
}

#[async_trait::async_trait]
impl<St, C, S> Pipeline for EmailPipeline<St, C, S>
where
    St: Storage,
    C: ConfigProvider,
    S: ChatSession + Sync,
{
    type Row = EmailRow;

    async fn extract(&self) -> Result<Vec<RawRecord>> {
        read_records(&self.storage, self.config.input_path(), self.config.delimiter()).await
    }

    async fn transform(&mut self, records: Vec<RawRecord>) -> Result<Vec<EmailRow>> {
        let total = records.len();
        let mut rows = Vec::with_capacity(total);

        for (index, record) in records.iter().enumerate() {
            tracing::info!("Processing email {}/{}", index + 1, total);
            let parsed = extract_email(record);

            let summary =
                summarize_and_translate(&mut self.session, &parsed.body, TARGET_LANGUAGE).await?;

            rows.push(EmailRow {
                sender: parsed.sender,
                receiver: parsed.receiver,
                summary_en: summary.summary_original_language,
                summary_translated: summary.summary_translated,
            });
        }

        Ok(rows)
    }

    async fn load(&self, rows: Vec<EmailRow>) -> Result<String> {
        let output_path = self.config.output_path();
        let data = write_csv(&rows)?;

        tracing::debug!("Writing {} rows ({} bytes) to {}", rows.len(), data.len(), output_path);
        self.storage.write_file(output_path, &data).await?;

        Ok(output_path.to_string())
    }
}
