mod support;

use std::process::{Command, Output};

use support::{fixture_dir, unique_temp_dir};

fn rows2sql(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rows2sql"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("rows2sql should run")
}

fn fixture_arg(fixture: &str, file: &str) -> String {
    fixture_dir(fixture).join(file).display().to_string()
}

#[test]
fn cli_writes_inserts_to_stdout() {
    let input = fixture_arg("products", "input.json");
    let out = rows2sql(&[&input, "--schema", "public", "--table", "products", "--check"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("INSERT INTO public.products (id, product_name, category_id) VALUES"));
    assert!(lines[1].starts_with("INSERT INTO product_tags (product_id, tag_id) VALUES"));
}

#[test]
fn cli_reads_csv_with_column_map_into_output_file() {
    let input = fixture_arg("products", "input.csv");
    let column_map = fixture_arg("products", "column_map.json");
    let output = unique_temp_dir("rows2sql_cli").join("nested").join("seed.sql");
    let output_arg = output.display().to_string();

    let out = rows2sql(&[
        &input,
        "--schema",
        "public",
        "--table",
        "products",
        "--column-map",
        &column_map,
        "--output",
        &output_arg,
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stdout.is_empty());

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.ends_with(";\n"));
    assert!(written.contains("(SELECT category_id FROM categories WHERE category_name = 'Books')"));
    assert!(written.contains("(SELECT tag_id FROM tags WHERE tag_name = 'tag3')"));
}

#[test]
fn cli_reads_a_named_workbook_sheet() {
    let input = fixture_arg("products", "input.xlsx");
    let column_map = fixture_arg("products", "column_map.json");
    let out = rows2sql(&[
        &input,
        "--sheet",
        "Products",
        "--column-map",
        &column_map,
        "--schema",
        "public",
        "--table",
        "products",
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let json_input = fixture_arg("products", "input.json");
    let from_json = rows2sql(&[&json_input, "--schema", "public", "--table", "products"]);
    assert_eq!(out.stdout, from_json.stdout);

    let missing = rows2sql(&[&input, "--sheet", "Missing", "--table", "products"]);
    assert_eq!(missing.status.code(), Some(2));
}

#[test]
fn cli_hashes_marked_columns_with_blake3() {
    let input = fixture_arg("users", "input.json");
    let out = rows2sql(&[&input, "--schema", "auth", "--table", "users", "--hash", "blake3"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8(out.stdout).unwrap();
    let digest = blake3::hash(b"hunter2").to_hex().to_string();
    assert!(stdout.contains(&format!("'{digest}'")));
    assert!(!stdout.contains("hunter2"));
}

#[test]
fn cli_strict_flag_quotes_expressions() {
    let input = fixture_arg("users", "input.json");
    let out = rows2sql(&[
        &input, "--table", "users", "--hash", "blake3", "--strict",
    ]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("'NOW()'"));
    assert!(stdout.starts_with("INSERT INTO users "));
}

#[test]
fn cli_function_mode_emits_a_single_select() {
    let input = fixture_arg("products", "input.json");
    let out = rows2sql(&[&input, "--function", "catalog.import_products"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("SELECT catalog.import_products('[{"));
    assert!(stdout.trim_end().ends_with("'::JSONB);"));
}

#[test]
fn cli_reports_errors_with_exit_code_two() {
    let dir = unique_temp_dir("rows2sql_cli_err");
    let input = dir.join("bad.json");
    std::fs::write(&input, r#"[{"id": "1", "a**b": "x"}]"#).unwrap();

    let out = rows2sql(&[&input.display().to_string(), "--table", "items"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error:"), "stderr: {stderr}");
    assert!(stderr.contains("a**b"), "stderr: {stderr}");
}

#[test]
fn cli_rejects_overlapping_delimiters() {
    let input = fixture_arg("products", "input.json");
    let out = rows2sql(&[
        &input,
        "--table",
        "products",
        "--one-to-many-delimiter",
        "***",
        "--many-to-many-delimiter",
        "**",
    ]);
    assert_eq!(out.status.code(), Some(2));
}
