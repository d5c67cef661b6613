use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness for running CLI commands against a temporary database
pub struct CliTestHarness {
    _temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("hub").expect("Failed to find hub binary");
        cmd.env("HUB_DATABASE_PATH", &self.db_path);
        cmd
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Run a command and return its stdout as a string
    pub fn run_and_read(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run hub");
        assert!(
            output.status.success(),
            "command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }
}

/// Pulls the first full UUID out of (possibly color-coded) CLI output.
pub fn extract_uuid(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let uuid_char = |c: char| c.is_ascii_hexdigit() || c == '-';
    let mut i = 0;
    while i < chars.len() {
        if uuid_char(chars[i]) {
            let start = i;
            while i < chars.len() && uuid_char(chars[i]) {
                i += 1;
            }
            if i - start == 36 {
                return chars[start..i].iter().collect();
            }
        } else {
            i += 1;
        }
    }
    panic!("no UUID found in output: {text}");
}
