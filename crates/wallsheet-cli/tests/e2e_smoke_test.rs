use std::{fs, path::PathBuf};

use tempfile::tempdir;

use wallsheet::config::OutputFormat;
use wallsheet_cli::{Args, Command, GenerateArgs, run};

/// Collects all .json requests from a directory
fn collect_requests(dir: PathBuf) -> Vec<PathBuf> {
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

fn demos_path() -> PathBuf {
    // Demos are at workspace root, relative to workspace not the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn generate_args(input: &PathBuf, output_dir: PathBuf, format: OutputFormat) -> Args {
    Args {
        command: Command::Generate(GenerateArgs {
            input: input.to_string_lossy().to_string(),
            format: Some(format),
            output_dir: Some(output_dir.to_string_lossy().to_string()),
            open: false,
            viewer: None,
        }),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_requests(demos_path());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        for format in [OutputFormat::Dxf, OutputFormat::Svg] {
            let output_dir = temp_dir
                .path()
                .join(demo_path.file_stem().unwrap())
                .join(format.extension());
            let args = generate_args(demo_path, output_dir.clone(), format);

            match run(&args) {
                Ok(()) => {
                    let written = fs::read_dir(&output_dir).map(|d| d.count()).unwrap_or(0);
                    if written != 1 {
                        failed_demos.push((
                            demo_path.clone(),
                            format!("expected one {format} sheet, found {written}"),
                        ));
                    }
                }
                Err(e) => failed_demos.push((demo_path.clone(), e.to_string())),
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo run(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_requests(demos_path().join("errors"));
    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_dir = temp_dir.path().join(demo_path.file_stem().unwrap());
        let args = generate_args(demo_path, output_dir.clone(), OutputFormat::Dxf);

        if run(&args).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        if output_dir.exists() {
            unexpectedly_succeeded.push(output_dir);
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!("✅ All {} error demos failed as expected", error_demos.len());
}
