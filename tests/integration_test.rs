use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Scratch space for one run: config home, temp dir and stand-in interpreters.
struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create sandbox");
        fs::create_dir(root.path().join("tmp")).unwrap();
        fs::create_dir(root.path().join("config")).unwrap();
        Sandbox { root }
    }

    fn tmp(&self) -> PathBuf {
        self.root.path().join("tmp")
    }

    fn write_fragment(&self, content: &str) {
        let dir = self.root.path().join("config").join("rpipe");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("profile.R"), content).unwrap();
    }

    /// Write an executable shell script that takes R's place.
    fn stand_in(&self, body: &str) -> PathBuf {
        let path = self.root.path().join("fake-r");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn run(&self, args: &[&str], interpreter: &Path, input: &[u8]) -> Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_rpipe"))
            .args(args)
            .env("TMPDIR", self.tmp())
            .env("XDG_CONFIG_HOME", self.root.path().join("config"))
            .env("RPIPE_R", interpreter)
            .env_remove("RPIPE_PROFILE")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to execute rpipe");

        // --help and --version exit without reading stdin.
        let _ = child.stdin.take().unwrap().write_all(input);
        child.wait_with_output().expect("Failed to wait for rpipe")
    }

    fn tmp_is_empty(&self) -> bool {
        fs::read_dir(self.tmp()).unwrap().next().is_none()
    }
}

#[test]
fn test_version_creates_nothing() {
    let sandbox = Sandbox::new();
    let marker = sandbox.root.path().join("launched");
    let fake = sandbox.stand_in(&format!("touch {}", marker.display()));

    let output = sandbox.run(&["--version"], &fake, b"");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("rpipe"));
    assert!(sandbox.tmp_is_empty());
    assert!(!marker.exists(), "--version must not launch the interpreter");
}

#[test]
fn test_help_creates_nothing() {
    let sandbox = Sandbox::new();
    let marker = sandbox.root.path().join("launched");
    let fake = sandbox.stand_in(&format!("touch {}", marker.display()));

    let output = sandbox.run(&["--help"], &fake, b"a,b\n1,2\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "got: {stdout}");
    assert!(sandbox.tmp_is_empty());
    assert!(!marker.exists(), "--help must not launch the interpreter");
}

#[test]
fn test_missing_fragment_fails_before_launch() {
    let sandbox = Sandbox::new();
    let marker = sandbox.root.path().join("launched");
    let fake = sandbox.stand_in(&format!("touch {}", marker.display()));

    let output = sandbox.run(&["head()"], &fake, b"a\n1\n");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("profile fragment"), "got: {stderr}");
    assert!(!marker.exists());
    assert!(output.stdout.is_empty());
    assert!(sandbox.tmp_is_empty(), "temporary files were left behind");
}

#[test]
fn test_statement_and_environment_reach_the_child() {
    let sandbox = Sandbox::new();
    sandbox.write_fragment("sentinel <- 1\n");
    let fake = sandbox.stand_in(
        r#"grep -q 'sentinel <- 1' "$R_PROFILE_USER" || exit 3
grep -q 'Sys.getenv("RPIPE_FILE")' "$R_PROFILE_USER" || exit 4
for last; do :; done
printf '%s\n' "$last" > "$RPIPE_FILE""#,
    );

    let output = sandbox.run(&["head(2)"], &fake, b"x,y\n1,2\n");

    assert!(
        output.status.success(),
        "rpipe failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "df |> head(2) |> csv()\n"
    );
    assert!(sandbox.tmp_is_empty(), "temporary files were left behind");
}

#[test]
fn test_tsv_with_empty_pipe() {
    let sandbox = Sandbox::new();
    sandbox.write_fragment("");
    let fake = sandbox.stand_in(
        r#"for last; do :; done
printf '%s\n' "$last" > "$RPIPE_FILE""#,
    );

    let output = sandbox.run(&["--tsv", "data.frame(a = 1)"], &fake, b"");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "df |> data.frame(a = 1) |> tsv()\n"
    );
}

#[test]
fn test_failing_interpreter_still_relays_input() {
    let sandbox = Sandbox::new();
    sandbox.write_fragment("");
    let fake = sandbox.stand_in("echo 'this goes nowhere'\nexit 1");

    let output = sandbox.run(&["stop('boom')"], &fake, b"a,b\n1,2\n");

    assert!(output.status.success());
    assert_eq!(output.stdout, b"a,b\n1,2\n");
}

#[test]
fn test_missing_interpreter_is_reported() {
    let sandbox = Sandbox::new();
    sandbox.write_fragment("");
    let missing = sandbox.root.path().join("no-such-r");

    let output = sandbox.run(&["head()"], &missing, b"a\n1\n");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to launch interpreter"), "got: {stderr}");
    assert!(sandbox.tmp_is_empty(), "temporary files were left behind");
}
