use crate::core::Storage;
use crate::domain::model::RawRecord;
use crate::utils::error::{EtlError, Result};

pub const REVIEW_DELIMITER: &str = "---END OF REVIEW---";
pub const EMAIL_DELIMITER: &str = "---END OF EMAIL---";

/// Splits `content` on every literal occurrence of `delimiter`, trims each
/// piece and keeps the non-empty ones in input order.
pub fn split_records(content: &str, delimiter: &str) -> Vec<RawRecord> {
    content
        .split(delimiter)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(RawRecord::new)
        .collect()
}

/// Reads a whole input file through `storage` and splits it into records.
pub async fn read_records<S: Storage>(
    storage: &S,
    path: &str,
    delimiter: &str,
) -> Result<Vec<RawRecord>> {
    tracing::debug!("Reading records from {}", path);
    let bytes = storage.read_file(path).await?;
    let content = String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
        message: format!("{} is not valid UTF-8: {}", path, e),
    })?;

    let records = split_records(&content, delimiter);
    tracing::debug!("Split {} into {} records", path, records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(records: &[RawRecord]) -> Vec<&str> {
        records.iter().map(RawRecord::as_str).collect()
    }

    #[test]
    fn test_split_single_review() {
        let records = split_records(
            "Product: Shoes\nReview: Great fit---END OF REVIEW---",
            REVIEW_DELIMITER,
        );
        assert_eq!(texts(&records), vec!["Product: Shoes\nReview: Great fit"]);
    }

    #[test]
    fn test_split_drops_blank_segments() {
        let content = "\n first \n---END OF EMAIL---   \n\t---END OF EMAIL---second\n---END OF EMAIL---\n";
        let records = split_records(content, EMAIL_DELIMITER);
        assert_eq!(texts(&records), vec!["first", "second"]);
    }

    #[test]
    fn test_split_delimiter_only_yields_nothing() {
        assert!(split_records(REVIEW_DELIMITER, REVIEW_DELIMITER).is_empty());
        assert!(split_records("", REVIEW_DELIMITER).is_empty());
    }

    #[test]
    fn test_split_without_delimiter_is_one_record() {
        let records = split_records("  just one  ", REVIEW_DELIMITER);
        assert_eq!(texts(&records), vec!["just one"]);
    }

    #[test]
    fn test_split_is_idempotent() {
        let content = "a\n---END OF REVIEW---\n b ---END OF REVIEW---c";
        for record in split_records(content, REVIEW_DELIMITER) {
            let again = split_records(record.as_str(), REVIEW_DELIMITER);
            assert_eq!(again, vec![record.clone()]);
        }
    }

    #[test]
    fn test_split_preserves_order_and_duplicates() {
        let content = "x---END OF REVIEW---y---END OF REVIEW---x";
        let records = split_records(content, REVIEW_DELIMITER);
        assert_eq!(texts(&records), vec!["x", "y", "x"]);
    }
}
