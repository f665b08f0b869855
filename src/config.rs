//! JSON configuration loading for the CLI.

use crate::batch::RunParams;
use std::fs;
use std::path::Path;

/// Loads batch parameters from a JSON file. Absent fields keep their
/// defaults, so a config may override a single threshold.
pub fn load_params(path: &Path) -> Result<RunParams, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let params: RunParams = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(
            &path,
            r#"{"block_size": 5, "detector": {"crest": {"min_rise": 0.8}}}"#,
        )
        .unwrap();
        let params = load_params(&path).unwrap();
        assert_eq!(params.block_size, 5);
        assert_eq!(params.detector.crest.min_rise, 0.8);
        assert_eq!(params.detector.crest.rise_window, 20);
        assert_eq!(params.filter.max_crest_elev, 20.0);
        assert!(params.spacing.is_none());
    }
}
