use std::{fs, path::PathBuf};

use tempfile::tempdir;

use topoview::TopoviewError;
use topoview_cli::{Args, run};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &PathBuf, output: &PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_fixtures = collect_json_files(fixtures_dir().join("valid"));

    assert!(
        !valid_fixtures.is_empty(),
        "No valid fixtures found in tests/fixtures/valid/"
    );

    let mut failed = Vec::new();

    for fixture_path in &valid_fixtures {
        let output_path = temp_dir.path().join(format!(
            "{}.svg",
            fixture_path.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args_for(fixture_path, &output_path)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).expect("output should exist");
                assert!(svg.contains("<svg"), "{} has no svg tag", output_path.display());
                assert!(svg.contains("</svg>"), "{} is incomplete", output_path.display());
            }
            Err(e) => failed.push((fixture_path.clone(), e)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nValid fixtures that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid fixture(s) failed unexpectedly", failed.len());
    }

    println!("✅ All {} valid fixtures passed", valid_fixtures.len());
}

#[test]
fn e2e_smoke_test_error_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_fixtures = collect_json_files(fixtures_dir().join("errors"));

    assert!(
        !error_fixtures.is_empty(),
        "No error fixtures found in tests/fixtures/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for fixture_path in &error_fixtures {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            fixture_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(fixture_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(fixture_path.clone());
        }
        assert!(
            !output_path.exists(),
            "{} wrote output despite failing",
            fixture_path.display()
        );
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError fixtures that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error fixture(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error fixtures failed as expected",
        error_fixtures.len()
    );
}

#[test]
fn e2e_triangle_renders_one_labeled_polygon() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = fixtures_dir().join("valid").join("triangle.json");
    let output = temp_dir.path().join("triangle.svg");

    run(&args_for(&input, &output)).expect("triangle should render");

    let svg = fs::read_to_string(&output).unwrap();
    let element_layer = svg
        .split(r#"data-layer="element""#)
        .nth(1)
        .and_then(|rest| rest.split("</g>").next())
        .expect("element layer");
    assert_eq!(element_layer.matches("<polygon").count(), 1);

    let node_layer = svg
        .split(r#"data-layer="node""#)
        .nth(1)
        .and_then(|rest| rest.split("</g>").next())
        .expect("node layer");
    assert_eq!(node_layer.matches("<circle").count(), 3);

    assert!(svg.replace('\n', "").contains(">A</text>"));
}

#[test]
fn e2e_missing_input_writes_nothing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("absent.json");
    let output = temp_dir.path().join("absent.svg");

    let err = run(&args_for(&input, &output)).unwrap_err();

    assert!(matches!(err, TopoviewError::NotFound { .. }));
    assert!(err.to_string().contains("not found"));
    assert!(!output.exists());
}

#[test]
fn e2e_explicit_config_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[canvas]\nwidth = 800\nheight = 600\n\n[style]\ntitle = \"Pump station layout\"\n",
    )
    .unwrap();

    let input = fixtures_dir().join("valid").join("triangle.json");
    let output = temp_dir.path().join("styled.svg");
    let mut args = args_for(&input, &output);
    args.config = Some(config_path.to_string_lossy().to_string());

    run(&args).expect("styled triangle should render");

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 800 600""#));
    assert!(svg.contains("Pump station layout"));
}

#[test]
fn e2e_missing_explicit_config_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = fixtures_dir().join("valid").join("triangle.json");
    let output = temp_dir.path().join("never.svg");
    let mut args = args_for(&input, &output);
    args.config = Some(temp_dir.path().join("missing.toml").to_string_lossy().to_string());

    let err = run(&args).unwrap_err();
    assert!(matches!(err, TopoviewError::Config(_)));
    assert!(!output.exists());
}
