//! Launcher tests

use crate::support::RecordingSurface;
use frotz_term::core::config::InterpreterConfig;
use frotz_term::{build_command, Arch, LaunchError, SessionLauncher, SessionState};
use std::path::Path;

#[test]
fn test_64bit_command() {
    let cmd = build_command(
        Path::new("Advent.z5"),
        Path::new("/data"),
        "64bit".parse().unwrap(),
        &InterpreterConfig::default(),
    )
    .unwrap();

    assert_eq!(cmd.matches("frotz64").count(), 2);
    assert!(cmd.contains("Loading Advent.z5..."));
    assert!(cmd.contains("frotz64 'Advent.z5'; exit"));
    assert!(cmd.starts_with("cd '/data'; clear; "));
    assert!(cmd.ends_with("exit\n"));
}

#[test]
fn test_loading_message_uses_basename() {
    let cmd = build_command(
        Path::new("/usr/share/games/zork1.z3"),
        Path::new("/data"),
        Arch::Bits32,
        &InterpreterConfig::default(),
    )
    .unwrap();

    assert!(cmd.contains("Loading zork1.z3..."));
    assert!(cmd.contains("frotz32 '/usr/share/games/zork1.z3'"));
}

#[test]
fn test_configured_interpreter_names() {
    let interpreters = InterpreterConfig {
        bits64: "dfrotz".to_string(),
        bits32: "frotz".to_string(),
    };
    let cmd = build_command(Path::new("a.z5"), Path::new("/d"), Arch::Bits64, &interpreters).unwrap();
    assert!(cmd.contains("; dfrotz|head -3 ;"));
    assert!(cmd.contains("; dfrotz 'a.z5';"));
}

#[test]
fn test_unsupported_architecture() {
    let arch: Arch = "arm".parse().unwrap();
    let result = build_command(Path::new("Advent.z5"), Path::new("/data"), arch, &InterpreterConfig::default());

    let err = result.unwrap_err();
    assert!(matches!(err, LaunchError::UnsupportedArchitecture(Arch::Arm)));
    assert!(err.to_string().contains("not supported"));
}

#[test]
fn test_single_start() {
    let mut surface = RecordingSurface::default();
    let mut launcher = SessionLauncher::new("/data", Arch::Bits64, InterpreterConfig::default());

    launcher.start(&mut surface, Path::new("game.z5")).unwrap();
    launcher.start(&mut surface, Path::new("game.z5")).unwrap();

    assert_eq!(surface.fed.len(), 1);
    assert_eq!(launcher.session().state(), SessionState::Started);
    assert_eq!(launcher.session().save_dir, Path::new("/data"));
}
