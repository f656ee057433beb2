#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rows2sql::loader::{JsonSource, RowSource};
use rows2sql::Row;

pub(crate) const TAGS_COLUMN: &str = "tag_id***product_tags***tags***tag_name***product_name";
pub(crate) const CATEGORY_COLUMN: &str = "category_id**categories**category_name";

pub(crate) fn fixture_dir(fixture: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(fixture)
}

pub(crate) fn read_fixture(fixture: &str, file: &str) -> String {
    std::fs::read_to_string(fixture_dir(fixture).join(file)).expect("fixture should be readable")
}

pub(crate) fn load_fixture_rows(fixture: &str) -> Vec<Row> {
    JsonSource::new(read_fixture(fixture, "input.json"))
        .load()
        .expect("fixture JSON should load")
}

pub(crate) fn row(cells: &[(&str, &str)]) -> Row {
    cells
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub(crate) fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}_{nanos}"));
    std::fs::create_dir_all(&dir).expect("should create temp dir");
    dir
}
