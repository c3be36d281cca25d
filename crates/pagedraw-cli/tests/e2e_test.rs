use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use pagedraw::{PagedrawError, semantic::DiagramKind};
use pagedraw_cli::{Args, Error};

fn demos_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

/// Collects all .html files from a directory
fn collect_pages(dir: PathBuf) -> Vec<PathBuf> {
    let mut files: Vec<_> = fs::read_dir(&dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("html")
                })
                .collect()
        })
        .unwrap_or_default();

    files.sort();
    files
}

fn args_for(input: &Path, output: &Path) -> Args {
    let mut args = Args::new(input.to_string_lossy());
    args.output = Some(output.to_string_lossy().to_string());
    args.log_level = "off".to_string();
    args
}

#[test]
fn e2e_demo_pages_render() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let pages = collect_pages(demos_dir());
    assert!(!pages.is_empty(), "No demo pages found");

    let mut failed = Vec::new();
    for page in &pages {
        let output = temp_dir.path().join(page.file_name().unwrap());
        if let Err(err) = pagedraw_cli::run(&args_for(page, &output)) {
            failed.push((page.clone(), err));
            continue;
        }

        let html = fs::read_to_string(&output).unwrap();
        assert!(html.contains("<svg"), "{} has no SVG", page.display());
    }

    if !failed.is_empty() {
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo page(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_error_pages_fail() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let pages = collect_pages(demos_dir().join("errors"));
    assert!(!pages.is_empty(), "No error pages found");

    for page in &pages {
        let output = temp_dir.path().join(page.file_name().unwrap());
        let result = pagedraw_cli::run(&args_for(page, &output));
        assert!(result.is_err(), "{} should fail", page.display());
    }
}

#[test]
fn e2e_keep_going_writes_page_and_reports_failures() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out.html");
    let mut args = args_for(&demos_dir().join("errors/bad_sequence.html"), &output);
    args.keep_going = true;

    let err = pagedraw_cli::run(&args).unwrap_err();
    let Error::Diagrams(failures) = &err else {
        panic!("expected diagram failures, got {err:?}");
    };
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0].root_cause(), PagedrawError::Parse { .. }));

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("<sequence><svg"));
    assert!(html.contains("<sequence></sequence>"));
}

#[test]
fn e2e_abort_writes_diagrams_rendered_before_the_failure() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out.html");
    let args = args_for(&demos_dir().join("errors/bad_sequence.html"), &output);

    let err = pagedraw_cli::run(&args).unwrap_err();
    assert!(matches!(err, Error::Pagedraw(PagedrawError::Element { .. })));
    assert_eq!(err.errors().len(), 1);

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("<sequence><svg"));
    assert!(html.contains("<sequence></sequence>"));
}

#[test]
fn e2e_single_diagram_to_svg() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("login.svg");
    let mut args = args_for(&demos_dir().join("login.seq"), &output);
    args.diagram = Some(DiagramKind::Sequence);

    pagedraw_cli::run(&args).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("POST /login"));
}

#[test]
fn e2e_kinds_limit_the_passes() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("mixed.html");
    let mut args = args_for(&demos_dir().join("mixed.html"), &output);
    args.kinds = Some(vec![DiagramKind::Graph]);

    pagedraw_cli::run(&args).unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("<graph><svg"));
    assert!(html.contains("Alice->Bob"));
    assert!(!html.contains("<flowchart><svg"));
}

#[test]
fn e2e_config_file_is_applied() {
    let temp_dir = tempdir().unwrap();
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "[page]\non_error = \"continue\"\n").unwrap();
    let output = temp_dir.path().join("out.html");
    let mut args = args_for(&demos_dir().join("errors/bad_sequence.html"), &output);
    args.config = Some(config.to_string_lossy().to_string());

    let err = pagedraw_cli::run(&args).unwrap_err();
    assert!(matches!(err, Error::Diagrams(_)));
    assert!(output.exists());
}

#[test]
fn e2e_missing_input_is_io_error() {
    let temp_dir = tempdir().unwrap();
    let args = args_for(
        &temp_dir.path().join("missing.html"),
        &temp_dir.path().join("out.html"),
    );

    let err = pagedraw_cli::run(&args).unwrap_err();
    assert!(matches!(err, Error::Pagedraw(PagedrawError::Io(_))));
}
