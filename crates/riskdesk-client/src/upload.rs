//! Local checks for transaction CSV uploads

use crate::error::{ClientError, ClientResult};
use std::path::Path;

/// Multipart field name the backend reads the file from
pub const UPLOAD_FIELD: &str = "csvFile";

/// Check that `path` names an existing, non-empty `.csv` file
///
/// Returns the file size in bytes.
pub async fn check_csv_file(path: &Path) -> ClientResult<u64> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !is_csv {
        return Err(ClientError::Validation(format!(
            "Please select a CSV file: {}",
            path.display()
        )));
    }

    let metadata = match tokio::fs::metadata(path).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ClientError::Validation(format!(
                "File not found: {}",
                path.display()
            )))
        }
        Err(e) => return Err(e.into()),
    };

    if !metadata.is_file() {
        return Err(ClientError::Validation(format!(
            "Not a file: {}",
            path.display()
        )));
    }
    if metadata.len() == 0 {
        return Err(ClientError::Validation(format!(
            "File is empty: {}",
            path.display()
        )));
    }

    Ok(metadata.len())
}
