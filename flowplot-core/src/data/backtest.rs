//! Backtest JSON loader.

use std::path::Path;

use super::DataError;
use crate::domain::BacktestOutput;

/// Parse a backtest document. A missing required key surfaces as `MissingField`.
pub fn parse_backtest_output(json: &str) -> Result<BacktestOutput, DataError> {
    serde_json::from_str(json).map_err(|e| match missing_field(&e) {
        Some(field) => DataError::MissingField { field },
        None => DataError::Json(e),
    })
}

pub fn load_backtest_output(path: &Path) -> Result<BacktestOutput, DataError> {
    let json = std::fs::read_to_string(path).map_err(|e| DataError::file_access(path, e))?;
    let output = parse_backtest_output(&json)?;
    tracing::debug!(
        path = %path.display(),
        ticks = output.historical.trajectory.len(),
        simulations = output.simulations().map_or(0, <[_]>::len),
        "loaded backtest output"
    );
    Ok(output)
}

/// serde_json reports absent struct fields as "missing field `name` at line .. column ..".
fn missing_field(err: &serde_json::Error) -> Option<String> {
    if !err.is_data() {
        return None;
    }
    let msg = err.to_string();
    let rest = msg.strip_prefix("missing field `")?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}
