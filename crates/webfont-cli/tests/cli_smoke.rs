//! CLI Smoke Tests
//!
//! Integration tests for the webfont CLI commands:
//! - `build`: One-shot regeneration
//! - `watch`: Rebuild on icon changes
//! - `check`: Configuration report
//!
//! Generation is done by a small `sh` script, so most tests are unix-only.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant, SystemTime};

fn webfont_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_webfont"))
}

const ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0h1v1H0z"/></svg>"#;

/// Icons plus a config whose generator appends a line to `runs.log` per call
fn project(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir.join("icons")).unwrap();
    for name in ["home", "search"] {
        fs::write(dir.join("icons").join(format!("{name}.svg")), ICON).unwrap();
    }

    let script = format!(
        r#"echo run >> "{}"; for ext in eot svg woff woff2; do printf "$ext" > "$1/$2.$ext"; done"#,
        dir.join("runs.log").display()
    );
    let config = serde_json::json!({
        "files": "icons/*.svg",
        "dest": { "fontsDir": "css/fonts", "stylesDir": "css" },
        "cssTemplateFontPath": "./fonts/",
        "template": "css",
        "generator": {
            "command": "sh",
            "args": ["-c", script, "sh", "{output}", "{name}"]
        }
    });

    let path = dir.join("webfont.json");
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    path
}

fn runs(dir: &Path) -> usize {
    fs::read_to_string(dir.join("runs.log"))
        .map(|log| log.lines().count())
        .unwrap_or(0)
}

// ============================================================================
// Help and configuration errors
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let output = Command::new(webfont_binary())
        .arg("--help")
        .output()
        .expect("Failed to execute webfont --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["build", "watch", "check"] {
        assert!(stdout.contains(command), "help should list {command}");
    }
}

#[test]
fn test_missing_config_file_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let output = Command::new(webfont_binary())
        .args(["build", "--config"])
        .arg(tmp.path().join("nope.json"))
        .output()
        .expect("Failed to execute webfont build");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read"), "stderr: {stderr}");
}

#[test]
fn test_config_without_dest_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("webfont.json");
    fs::write(
        &path,
        r#"{ "files": "*.svg", "generator": { "command": "true" } }"#,
    )
    .unwrap();

    let output = Command::new(webfont_binary())
        .args(["check", "--config"])
        .arg(&path)
        .output()
        .expect("Failed to execute webfont check");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Require `dest` option"), "stderr: {stderr}");
}

// ============================================================================
// Build and check
// ============================================================================

#[cfg(unix)]
#[test]
fn test_build_then_rebuild_is_a_no_op() {
    let tmp = tempfile::tempdir().unwrap();
    let config = project(tmp.path());

    let first = Command::new(webfont_binary())
        .args(["build", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to execute webfont build");
    assert!(
        first.status.success(),
        "build failed: {}",
        String::from_utf8_lossy(&first.stderr)
    );

    for ext in ["eot", "svg", "woff", "woff2"] {
        assert!(tmp.path().join(format!("css/fonts/webfont.{ext}")).is_file());
    }
    let css = fs::read_to_string(tmp.path().join("css/webfont.css")).unwrap();
    assert!(css.contains("./fonts/webfont.woff2"));
    assert!(css.contains(".webfont-search::before"));

    let stdout = String::from_utf8_lossy(&first.stdout);
    assert!(stdout.contains("webfont generated (2 icons, 5 files)"), "stdout: {stdout}");

    let second = Command::new(webfont_binary())
        .args(["build", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to execute webfont build");
    assert!(second.status.success());
    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(stdout.contains("webfont up to date (2 icons)"), "stdout: {stdout}");
    assert_eq!(runs(tmp.path()), 1);
}

#[cfg(unix)]
#[test]
fn test_removed_icon_triggers_rebuild() {
    let tmp = tempfile::tempdir().unwrap();
    let config = project(tmp.path());

    let build = || {
        Command::new(webfont_binary())
            .args(["build", "-q", "--config"])
            .arg(&config)
            .status()
            .expect("Failed to execute webfont build")
    };
    assert!(build().success());
    fs::remove_file(tmp.path().join("icons/search.svg")).unwrap();
    assert!(build().success());

    assert_eq!(runs(tmp.path()), 2);
    let css = fs::read_to_string(tmp.path().join("css/webfont.css")).unwrap();
    assert!(!css.contains(".webfont-search::before"));
}

#[cfg(unix)]
#[test]
fn test_generator_stylesheet_gets_font_path() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = project(tmp.path());
    let mut config: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
    config["generator"] = serde_json::json!({
        "command": "sh",
        "args": [
            "-c",
            r#"for ext in eot svg woff woff2; do printf "$ext" > "$1/$2.$ext"; done
               printf '@font-face { src: url("%s%s.woff2"); }' "$3" "$2" > "$1/$2.css""#,
            "sh", "{output}", "{name}", "{fontPath}"
        ]
    });
    fs::write(&config_path, config.to_string()).unwrap();

    let output = Command::new(webfont_binary())
        .args(["build", "--config"])
        .arg(&config_path)
        .output()
        .expect("Failed to execute webfont build");
    assert!(
        output.status.success(),
        "build failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let css = fs::read_to_string(tmp.path().join("css/webfont.css")).unwrap();
    assert_eq!(css, r#"@font-face { src: url("./fonts/webfont.woff2"); }"#);
}

#[cfg(unix)]
#[test]
fn test_check_reports_status() {
    let tmp = tempfile::tempdir().unwrap();
    let config = project(tmp.path());

    let before = Command::new(webfont_binary())
        .args(["check", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to execute webfont check");
    assert!(before.status.success());
    let stdout = String::from_utf8_lossy(&before.stdout);
    assert!(stdout.contains("Icons:     2"), "stdout: {stdout}");
    assert!(stdout.contains("Status: stale"), "stdout: {stdout}");
    assert_eq!(runs(tmp.path()), 0);

    let build = Command::new(webfont_binary())
        .args(["build", "--config"])
        .arg(&config)
        .status()
        .expect("Failed to execute webfont build");
    assert!(build.success());

    let after = Command::new(webfont_binary())
        .args(["check", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to execute webfont check");
    let stdout = String::from_utf8_lossy(&after.stdout);
    assert!(stdout.contains("Status: up to date"), "stdout: {stdout}");
}

#[cfg(unix)]
#[test]
fn test_failing_generator_fails_build() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = project(tmp.path());
    let mut config: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
    config["generator"] = serde_json::json!({
        "command": "sh",
        "args": ["-c", "echo 'cannot read glyph' >&2; exit 1"]
    });
    fs::write(&config_path, config.to_string()).unwrap();

    let output = Command::new(webfont_binary())
        .args(["build", "--config"])
        .arg(&config_path)
        .output()
        .expect("Failed to execute webfont build");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot read glyph"), "stderr: {stderr}");
    assert!(!tmp.path().join("css/webfont.css").exists());
}

// ============================================================================
// Watch
// ============================================================================

#[cfg(unix)]
#[test]
fn test_watch_rebuilds_after_touch() {
    let tmp = tempfile::tempdir().unwrap();
    let config = project(tmp.path());

    let mut child = Command::new(webfont_binary())
        .args([
            "watch",
            "--interval-ms",
            "20",
            "--aggregate-ms",
            "50",
            "--max-rebuilds",
            "1",
            "--config",
        ])
        .arg(&config)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn webfont watch");

    // The banner is printed once the initial build is done and the
    // watcher has its baseline
    let mut stderr = BufReader::new(child.stderr.take().unwrap());
    let mut line = String::new();
    loop {
        line.clear();
        let read = stderr.read_line(&mut line).unwrap();
        assert!(read > 0, "watch exited before watching");
        if line.contains("Watching") {
            break;
        }
    }
    assert_eq!(runs(tmp.path()), 1);

    let icon = tmp.path().join("icons/home.svg");
    File::options()
        .write(true)
        .open(&icon)
        .unwrap()
        .set_modified(SystemTime::now() + Duration::from_secs(5))
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(30);
    let status = loop {
        if let Some(status) = child.try_wait().unwrap() {
            break status;
        }
        if Instant::now() > deadline {
            let _ = child.kill();
            panic!("watch did not rebuild in time");
        }
        std::thread::sleep(Duration::from_millis(20));
    };

    assert!(status.success());
    assert_eq!(runs(tmp.path()), 2);
}
