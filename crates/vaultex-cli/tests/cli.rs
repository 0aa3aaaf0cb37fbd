use std::{fs, path::Path, process::Command};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A small vault with one citation, plus an empty config file so the
/// user's own config is never picked up.
fn setup(cited: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "config.toml", "");
    write(root, "refs.bib", "@misc{smith2020, title = {Cited}}\n@misc{jones2019, title = {Unused}}\n");
    write(root, "vault/Index.md", "[[Chapter]]");
    write(root, "vault/Chapter.md", &format!("# Background\nAs shown [[@{cited}]]."));
    dir
}

fn vaultex(root: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vaultex"));
    cmd.current_dir(root)
        .args(["-c", "config.toml", "-i", "vault", "-o", "out/thesis.tex"])
        .args(["-b", "refs.bib", "-m", "out/thesis.bib"])
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn writes_latex_and_filtered_bibliography() {
    let dir = setup("smith2020");
    let output = vaultex(dir.path()).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Output written to out/thesis.tex"));

    let latex = fs::read_to_string(dir.path().join("out/thesis.tex")).unwrap();
    assert_eq!(
        latex,
        "\\part{Chapter}\\label{sec:Chapter}\n\n\\chapter{Background}\\label{sec:Background}\n\nAs shown \\citep{smith2020}.\n\n\n\\bibliography{thesis}\n"
    );

    let bib = fs::read_to_string(dir.path().join("out/thesis.bib")).unwrap();
    assert!(bib.contains("smith2020"));
    assert!(!bib.contains("jones2019"));
}

#[test]
fn missing_citation_key_writes_nothing() {
    let dir = setup("ghost2021");
    let output = vaultex(dir.path()).output().unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ghost2021"));
    assert!(!dir.path().join("out/thesis.tex").exists());
    assert!(!dir.path().join("out/thesis.bib").exists());
}

#[test]
fn missing_input_is_reported() {
    let dir = setup("smith2020");
    let output = Command::new(env!("CARGO_BIN_EXE_vaultex"))
        .current_dir(dir.path())
        .args(["-c", "config.toml", "-i", "nowhere", "-o", "out.tex"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

#[test]
fn failed_latex_write_leaves_no_bibliography() {
    let dir = setup("smith2020");
    fs::create_dir_all(dir.path().join("out/thesis.tex")).unwrap();
    let output = vaultex(dir.path()).output().unwrap();

    assert!(!output.status.success());
    assert!(!dir.path().join("out/thesis.bib").exists());
}
