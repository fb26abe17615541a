use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_winhelper"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute winhelper");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hotkey helper"));
    assert!(stdout.contains("set-resolution"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_winhelper"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute winhelper");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("winhelper"));
}

#[test]
fn call_help_explains_per_run_state() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_winhelper"));
    cmd.args(["call", "--help"]);

    // Act
    let output = cmd.output().expect("failed to execute winhelper");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("empty device cache"));
}

#[test]
fn window_actions_are_mutually_exclusive() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_winhelper"));
    cmd.args(["window", "Notepad", "--hide", "--maximize"]);

    // Act
    let output = cmd.output().expect("failed to execute winhelper");

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot be used with"));
}

#[cfg(not(windows))]
#[test]
fn platform_commands_fail_off_windows() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_winhelper"));
    cmd.arg("displays");

    // Act
    let output = cmd.output().expect("failed to execute winhelper");

    // Assert
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported platform"));
}

#[cfg(windows)]
#[test]
fn displays_subcommand_runs() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_winhelper"));
    cmd.args(["displays", "--json"]);

    // Act
    let output = cmd.output().expect("failed to execute winhelper");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let devices: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(devices.is_array());
}

#[cfg(windows)]
#[test]
fn unknown_device_key_is_an_error() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_winhelper"));
    cmd.args(["call", "setDisplayResolution", "no-such-key", "800", "600", "0"]);

    // Act
    let output = cmd.output().expect("failed to execute winhelper");

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown display device key"));
}
