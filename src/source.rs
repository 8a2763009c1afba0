use std::path::Path;

use anyhow::Context;

use crate::models::{ApiResponse, RawTestRecord};

/// Load a backend export. `.csv` files are read as bulk exports with backend
/// column names; anything else is parsed as the JSON response envelope.
pub fn load_response(path: &Path) -> anyhow::Result<ApiResponse> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let response = if is_csv {
        ApiResponse {
            success: true,
            data: Some(read_csv(path)?),
            message: None,
        }
    } else {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str::<ApiResponse>(&body)
            .with_context(|| format!("invalid history response in {}", path.display()))?
    };

    if !response.success {
        tracing::warn!(
            reason = response.message.as_deref().unwrap_or("no message"),
            "backend reported an unsuccessful response"
        );
    }
    tracing::info!(
        path = %path.display(),
        records = response.data.as_ref().map_or(0, Vec::len),
        "loaded history"
    );

    Ok(response)
}

pub fn read_csv(path: &Path) -> anyhow::Result<Vec<RawTestRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut records = Vec::new();

    for (line, result) in reader.deserialize::<RawTestRecord>().enumerate() {
        let record = result.with_context(|| format!("invalid CSV row {}", line + 1))?;
        records.push(record);
    }

    Ok(records)
}

/// Write records as a successful JSON response envelope.
pub fn write_response(path: &Path, records: Vec<RawTestRecord>) -> anyhow::Result<usize> {
    let count = records.len();
    let response = ApiResponse {
        success: true,
        data: Some(records),
        message: None,
    };
    let body = serde_json::to_string_pretty(&response)?;
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(count)
}
