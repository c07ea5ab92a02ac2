use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_deskicons"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute deskicons");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("desktop icon positions"));
    for subcommand in ["list", "count", "save", "load", "move", "init"] {
        assert!(stdout.contains(subcommand), "missing {subcommand}");
    }
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_deskicons"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute deskicons");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("deskicons"));
}

#[test]
fn move_requires_coordinates() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_deskicons"));
    cmd.args(["move", "Recycle Bin", "--x", "10"]);

    // Act
    let output = cmd.output().expect("failed to execute deskicons");

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--y"));
}

#[test]
fn load_without_quick_save_reports_it() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("icon_layout.json");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_deskicons"));
    cmd.arg("load").arg("--file").arg(&missing);

    // Act
    let output = cmd.output().expect("failed to execute deskicons");

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No quick save found."));
}

#[test]
fn load_rejects_malformed_layout() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icon_layout.json");
    std::fs::write(&path, "{ not json").unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_deskicons"));
    cmd.arg("load").arg("--file").arg(&path);

    // Act
    let output = cmd.output().expect("failed to execute deskicons");

    // Assert
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
}

#[test]
fn load_of_empty_quick_save_does_nothing() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icon_layout.json");
    std::fs::write(&path, "{}").unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_deskicons"));
    cmd.arg("load").arg("--file").arg(&path);

    // Act
    let output = cmd.output().expect("failed to execute deskicons");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("holds no icons"));
}

#[cfg(not(windows))]
#[test]
fn desktop_commands_report_unsupported_platform() {
    for args in [&["list"][..], &["count"], &["save"], &["move", "Drive C", "--x", "1", "--y", "2"]] {
        // Arrange
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_deskicons"));
        cmd.args(args);

        // Act
        let output = cmd.output().expect("failed to execute deskicons");

        // Assert
        assert_eq!(output.status.code(), Some(1), "{args:?}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("unsupported platform"), "{args:?}");
    }
}
