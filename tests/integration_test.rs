//! Integration tests for the unfurl pipeline and filter modules

use serde_json::json;
use unfurl::{Event, EventWriter, FilterChain, FilterRegistry, OutputFormat, PipelineConfig};

#[test]
fn test_name_mode_pipeline_from_yaml() {
    let yaml = r#"
pipeline:
  filters:
    - filter: list_to_fields
      params:
        source: message
        key: key
        value: value
"#;

    let config = PipelineConfig::from_yaml_str(yaml).unwrap();
    let registry = FilterRegistry::with_builtin_filters();
    let chain = FilterChain::from_config(&config, &registry).unwrap();

    let mut event = Event::from_json(json!({
        "message": [
            {"key": "foo", "value": "bar"},
            {"key": "cheese", "value": "gorgonzola"}
        ]
    }))
    .unwrap();

    chain.apply(&mut event);

    assert_eq!(event.get("foo"), Some(&json!("bar")));
    assert_eq!(event.get("cheese"), Some(&json!("gorgonzola")));
    assert_eq!(event.get("message"), None);
}

#[test]
fn test_map_passthrough_pipeline() {
    let yaml = r#"
pipeline:
  filters:
    - filter: list_to_fields
      params:
        source: nomad
"#;

    let config = PipelineConfig::from_yaml_str(yaml).unwrap();
    let registry = FilterRegistry::with_builtin_filters();
    let chain = FilterChain::from_config(&config, &registry).unwrap();

    let mut event = Event::from_json(json!({
        "nomad": {
            "namespace": "default",
            "datacenters": ["eu", "us"],
            "task": {"name": "random_string"}
        }
    }))
    .unwrap();

    chain.apply(&mut event);

    assert_eq!(event.get("namespace"), Some(&json!("default")));
    assert_eq!(event.get("datacenters"), Some(&json!(["eu", "us"])));
    assert_eq!(event.get("task"), Some(&json!({"name": "random_string"})));
    assert_eq!(event.get("nomad"), None);
}

#[test]
fn test_multi_stage_pipeline_applies_in_order() {
    // The first stage expands `labels` with a prefix; the second lifts a
    // `metadata` map while leaving the source in place.
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

    let config = PipelineConfig::from_yaml_str(yaml).unwrap();
    let registry = FilterRegistry::with_builtin_filters();
    let chain = FilterChain::from_config(&config, &registry).unwrap();
    assert_eq!(chain.len(), 2);

    let mut event = Event::from_json(json!({
        "labels": [
            {"key": "env", "value": "staging"},
            {"key": "team", "value": "ingest"}
        ],
        "metadata": {"region": "eu-west-1"}
    }))
    .unwrap();

    chain.apply(&mut event);

    assert_eq!(event.get("label_env"), Some(&json!("staging")));
    assert_eq!(event.get("label_team"), Some(&json!("ingest")));
    assert_eq!(event.get("labels"), None);
    assert_eq!(event.get("region"), Some(&json!("eu-west-1")));
    assert_eq!(event.get("metadata"), Some(&json!({"region": "eu-west-1"})));
}

#[test]
fn test_pipeline_survives_malformed_entries() {
    let yaml = r#"
pipeline:
  filters:
    - filter: list_to_fields
      params:
        source: message
        key: key
        value: value
"#;

    let config = PipelineConfig::from_yaml_str(yaml).unwrap();
    let registry = FilterRegistry::with_builtin_filters();
    let chain = FilterChain::from_config(&config, &registry).unwrap();

    let mut event = Event::from_json(json!({
        "message": [
            {"key": "first", "value": 1},
            "not an object",
            {"missing": "the key field"},
            {"key": "last", "value": 2}
        ]
    }))
    .unwrap();

    chain.apply(&mut event);

    assert_eq!(event.get("first"), Some(&json!(1)));
    assert_eq!(event.get("last"), Some(&json!(2)));
    assert_eq!(event.len(), 2);
}

#[test]
fn test_pipeline_config_from_file_end_to_end() {
    use std::io::Write;

    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("pipeline.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(
        br#"
pipeline:
  filters:
    - filter: list_to_fields
      params:
        source: tags
"#,
    )
    .unwrap();

    let config = PipelineConfig::load_from_file(&path).unwrap();
    let registry = FilterRegistry::with_builtin_filters();
    let chain = FilterChain::from_config(&config, &registry).unwrap();

    let mut event = Event::from_json(json!({
        "tags": [{"color": "red"}, {"size": "xl"}]
    }))
    .unwrap();

    chain.apply(&mut event);

    assert_eq!(event.get("color"), Some(&json!("red")));
    assert_eq!(event.get("size"), Some(&json!("xl")));
}

#[test]
fn test_processed_events_write_as_ndjson() {
    let yaml = r#"
pipeline:
  filters:
    - filter: list_to_fields
      params:
        source: labels
"#;

    let config = PipelineConfig::from_yaml_str(yaml).unwrap();
    let registry = FilterRegistry::with_builtin_filters();
    let chain = FilterChain::from_config(&config, &registry).unwrap();

    let mut buf = Vec::new();
    let mut writer = EventWriter::new(&mut buf, OutputFormat::Ndjson).unwrap();

    for body in [
        json!({"labels": [{"env": "staging"}]}),
        json!({"labels": [{"env": "production"}]}),
    ] {
        let mut event = Event::from_json(body).unwrap();
        chain.apply(&mut event);
        writer.write_event(&event).unwrap();
    }
    writer.finish().unwrap();

    let output = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], r#"{"env":"staging"}"#);
    assert_eq!(lines[1], r#"{"env":"production"}"#);
}
