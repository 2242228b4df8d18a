//! Pipeline configuration loader.
//!
//! Loads the ordered filter stage list from a YAML document of the form:
//!
//! ```yaml
//! pipeline:
//!   filters:
//!     - filter: list_to_fields
//!       params:
//!         source: message
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Pipeline configuration defining the filter stages in application order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Filter stages, applied in list order
    pub filters: Vec<FilterStage>,
}

/// One configured filter stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterStage {
    /// Registered filter name
    pub filter: String,

    /// Parameters handed to the filter factory
    #[serde(default)]
    pub params: JsonValue,
}

impl PipelineConfig {
    /// Load pipeline configuration from a YAML file.
    ///
    /// # Arguments
    /// * `path` - Path to the pipeline YAML file
    ///
    /// # Errors
    /// Returns error if the file doesn't exist or has invalid format
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read pipeline file {}: {}", path.display(), e))?;

        Self::from_yaml_str(&contents)
    }

    /// Parse pipeline configuration from a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, String> {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(contents).map_err(|e| format!("Failed to parse YAML: {}", e))?;

        let pipeline_yaml = yaml
            .get("pipeline")
            .ok_or_else(|| "Pipeline YAML missing 'pipeline' field".to_string())?;

        let config: PipelineConfig = serde_yaml::from_value(pipeline_yaml.clone())
            .map_err(|e| format!("Failed to parse pipeline definition: {}", e))?;

        Ok(config)
    }

    /// Get the configured filter names in application order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|s| s.filter.as_str()).collect()
    }

    /// Get the number of configured stages.
    pub fn stage_count(&self) -> usize {
        self.filters.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_pipeline_yaml(dir: &Path, name: &str, yaml_content: &str) -> std::path::PathBuf {
        let file_path = dir.join(format!("{}.yaml", name));
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(yaml_content.as_bytes()).unwrap();
        file_path
    }

    #[test]
    fn test_load_pipeline_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let yaml = r#"
pipeline:
  filters:
    - filter: list_to_fields
      params:
        source: labels
        key: key
        value: value
        prefix: "label_"
    - filter: list_to_fields
      params:
        source: metadata
        remove_source: false
"#;

        let file_path = write_pipeline_yaml(temp_dir.path(), "pipeline", yaml);

        let config = PipelineConfig::load_from_file(&file_path).unwrap();

        assert_eq!(config.stage_count(), 2);
        assert_eq!(
            config.filter_names(),
            vec!["list_to_fields", "list_to_fields"]
        );
        assert_eq!(config.filters[0].params["prefix"], "label_");
        assert_eq!(config.filters[1].params["remove_source"], false);
    }

    #[test]
    fn test_stage_params_default_to_null() {
        let yaml = r#"
pipeline:
  filters:
    - filter: some_filter
"#;

        let config = PipelineConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.filters[0].params, JsonValue::Null);
    }

    #[test]
    fn test_missing_pipeline_field() {
        let result = PipelineConfig::from_yaml_str("filters: []");

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("missing 'pipeline'"));
    }

    #[test]
    fn test_missing_file() {
        let result = PipelineConfig::load_from_file("/definitely/not/here.yaml");

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to read pipeline file"));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = PipelineConfig::from_yaml_str(": : :");

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to parse YAML"));
    }
}
