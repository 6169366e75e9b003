use crate::domain::model::TabularRow;
use crate::utils::error::{EtlError, Result};

/// Renders the fixed header followed by `rows` as CSV. The header is written
/// explicitly so an empty run still produces a header-only table.
pub fn write_csv<R: TabularRow>(rows: &[R]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(R::HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.into_inner().map_err(|e| EtlError::ProcessingError {
        message: format!("Failed to flush CSV output: {}", e.error()),
    })
}
