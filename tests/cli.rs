use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

struct Fixture {
    _dir: TempDir,
    config_dir: PathBuf,
    root_a: PathBuf,
    root_b: PathBuf,
}

fn bundle(path: &Path, bytes: usize) {
    fs::create_dir_all(path.join("Contents")).unwrap();
    fs::write(path.join("Contents").join("binary"), vec![0u8; bytes]).unwrap();
}

fn fixture() -> Fixture {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().join("config");
    let root_a = dir.path().join("A");
    let root_b = dir.path().join("B");

    bundle(&root_a.join("Synth.vst3"), 2048);
    bundle(&root_a.join("sub").join("Synth.component"), 1024);
    bundle(&root_b.join("Reverb.clap"), 4096);
    fs::write(root_b.join("notes.txt"), "not a plugin").unwrap();

    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("paths.txt"),
        format!("{}\n  {}  \n{}\n", root_a.display(), root_b.display(), root_a.display()),
    )
    .unwrap();

    Fixture {
        _dir: dir,
        config_dir,
        root_a,
        root_b,
    }
}

fn prm(fixture: &Fixture) -> Command {
    let mut cmd = Command::cargo_bin("prm").unwrap();
    cmd.env("PRM_CONFIG_DIR", &fixture.config_dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn lists_plugins_by_name_with_formats() {
    let fx = fixture();
    prm(&fx)
        .assert()
        .success()
        .stdout("Reverb [CLAP]\nSynth [VST3 AU]\n");
}

#[test]
fn name_query_and_count() {
    let fx = fixture();
    prm(&fx)
        .args(["syn", "-c"])
        .assert()
        .success()
        .stdout("Synth [VST3 AU]\n2\n");
}

#[test]
fn format_filter_narrows_paths() {
    let fx = fixture();
    let expected = format!("{}\n", fx.root_a.join("sub").join("Synth.component").display());
    prm(&fx).args(["-f", "au", "-p"]).assert().success().stdout(predicate::str::diff(expected));
}

#[test]
fn size_mode_sorts_largest_first() {
    let fx = fixture();
    let expected = format!(
        "{} 0.00MB\n{} 0.00MB\n{} 0.00MB\n",
        fx.root_b.join("Reverb.clap").display(),
        fx.root_a.join("Synth.vst3").display(),
        fx.root_a.join("sub").join("Synth.component").display(),
    );
    prm(&fx).arg("-s").assert().success().stdout(predicate::str::diff(expected));
}

#[test]
fn json_output_lists_every_plugin() {
    let fx = fixture();
    let output = prm(&fx).arg("-json").output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[1]["name"], "Synth");
}

#[test]
fn unknown_format_reports_and_lists_nothing() {
    let fx = fixture();
    prm(&fx)
        .args(["-f", "lv2"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("unknown format 'lv2'"));
}

#[test]
fn delete_without_confirmation_changes_nothing() {
    let fx = fixture();
    prm(&fx)
        .args(["-delete", "reverb"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reverb.clap"))
        .stdout(predicate::str::contains("Aborted. Nothing deleted."));
    assert!(fx.root_b.join("Reverb.clap").exists());
}

#[test]
fn unreadable_confirmation_aborts_cleanly() {
    let fx = fixture();
    prm(&fx)
        .args(["-delete", "reverb"])
        .write_stdin(vec![0xff, 0xfe, b'\n'])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted. Nothing deleted."));
    assert!(fx.root_b.join("Reverb.clap").exists());
}

#[test]
fn separator_keeps_flag_like_queries() {
    let fx = fixture();
    prm(&fx).args(["--", "-open"]).assert().success().stdout("");
}

#[test]
fn first_run_creates_paths_file() {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().join("fresh");
    Command::cargo_bin("prm")
        .unwrap()
        .env("PRM_CONFIG_DIR", &config_dir)
        .arg("-c")
        .assert()
        .success();
    assert!(config_dir.join("paths.txt").exists());
}
