use dpath_validator::config::Config;
use dpath_validator::document::node::DataNode;
use dpath_validator::file::loader::{load_data_file, load_template_file};
use dpath_validator::validator::Validator;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes `content` gzip-compressed to `dir/name`.
fn write_gzipped(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();
    path
}

fn validator_for(path: &Path, strict: bool) -> Validator {
    let config = Config {
        strict_mode: strict,
        ..Config::default()
    };
    let mut validator = Validator::new(&config);
    let templates = load_template_file(path, &config.wildcard).unwrap();
    validator.load_all(&templates);
    validator
}

#[test]
fn test_load_gzipped_yaml_data() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_gzipped(&temp_dir, "data.yaml.gz", "name: a\n---\nname: b\n");

    let candidates = load_data_file(&path).unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].get("name"), Some(&DataNode::from("a")));
}

#[test]
fn test_load_gzipped_jsonl_data() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_gzipped(
        &temp_dir,
        "events.jsonl.gz",
        "{\"level\": \"info\"}\n{\"level\": \"warn\"}\n",
    );

    let candidates = load_data_file(&path).unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[1].get("level"), Some(&DataNode::from("warn")));
}

#[test]
fn test_validate_gzipped_data_against_gzipped_template() {
    let temp_dir = TempDir::new().unwrap();
    let template = write_gzipped(&temp_dir, "template.yaml.gz", "level: '*'\nsource: api\n");
    let data = write_gzipped(
        &temp_dir,
        "events.jsonl.gz",
        concat!(
            "{\"level\": \"info\", \"source\": \"api\"}\n",
            "{\"level\": \"warn\", \"source\": \"db\"}\n",
            "{\"source\": \"api\"}\n",
        ),
    );

    let candidates = load_data_file(&data).unwrap();

    let strict = validator_for(&template, true);
    assert_eq!(strict.validate(&candidates).unwrap(), vec![true, false, false]);

    let loose = validator_for(&template, false);
    assert_eq!(loose.validate(&candidates).unwrap(), vec![true, true, true]);
}

#[test]
fn test_corrupted_gzip_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.yaml.gz");
    fs::write(&path, b"\x1f\x8bnot really gzip").unwrap();

    assert!(load_data_file(&path).is_err());
}
