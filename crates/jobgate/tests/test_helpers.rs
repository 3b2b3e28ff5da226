use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;

pub const NOW: &str = "2026-10-16T12:00:00Z";

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

pub fn jobgate_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jobgate"));
    cmd.current_dir(workspace_root());
    cmd.env_remove("JOBGATE_LOG");
    cmd
}

/// Run jobgate, assert exit code, return parsed JSON stdout.
pub fn jobgate_json(args: &[&str], expected_exit: i32) -> Value {
    let out = jobgate_bin()
        .args(args)
        .output()
        .expect("failed to run jobgate");
    let code = out.status.code().unwrap_or(-1);
    assert_eq!(
        code,
        expected_exit,
        "exit mismatch for: jobgate {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).unwrap_or_else(|e| {
        panic!(
            "invalid JSON from: jobgate {}\n{e}\nstdout: {}",
            args.join(" "),
            String::from_utf8_lossy(&out.stdout)
        )
    })
}

/// Run jobgate, return (exit code, stdout, stderr).
#[allow(dead_code)]
pub fn jobgate_run(args: &[&str]) -> (i32, String, String) {
    let out = jobgate_bin()
        .args(args)
        .output()
        .expect("failed to run jobgate");
    (
        out.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&out.stdout).to_string(),
        String::from_utf8_lossy(&out.stderr).to_string(),
    )
}
