//! Application loop tests

use crate::support::RecordingSurface;
use frotz_term::core::config::InterpreterConfig;
use frotz_term::core::events;
use frotz_term::{App, AppEvent, Arch, Flow, SessionLauncher, SessionState, TerminalConfigStore};
use std::path::{Path, PathBuf};

fn app_with(
    arch: Arch,
    surface: impl FnOnce(events::EventSender) -> RecordingSurface,
) -> (tempfile::TempDir, App<RecordingSurface>) {
    let dir = tempfile::tempdir().unwrap();
    let store = TerminalConfigStore::in_profile(dir.path());
    let (tx, rx) = events::channel();
    let launcher = SessionLauncher::new("/data", arch, InterpreterConfig::default());
    let app = App::new(surface(tx.clone()), &store, launcher, tx, rx).unwrap();
    (dir, app)
}

#[tokio::test]
async fn test_bootstrap_configures_and_forks() {
    let (dir, app) = app_with(Arch::Bits64, |_| RecordingSurface::default());

    assert_eq!(app.surface().forked, 1);
    assert_eq!(app.surface().emulation.as_deref(), Some("xterm"));
    assert!(app.surface().fed.is_empty());
    assert!(dir.path().join("terminalrc").exists());
}

#[tokio::test]
async fn test_idle_default_game_starts_and_exit_quits() {
    let (_dir, mut app) = app_with(Arch::Bits64, |tx| RecordingSurface::exiting_after_feed(tx, 0));
    app.schedule_game(PathBuf::from("/bundle/Advent.z5"));

    let code = app.run().await.unwrap();

    assert_eq!(code, 0);
    assert_eq!(app.surface().fed.len(), 1);
    assert!(app.surface().fed[0].contains("frotz64 '/bundle/Advent.z5'"));
    assert_eq!(app.launcher().session().state(), SessionState::Exited);
}

#[tokio::test]
async fn test_open_file_wins_over_idle_default() {
    let (_dir, mut app) = app_with(Arch::Bits64, |tx| RecordingSurface::exiting_after_feed(tx, 0));
    app.schedule_game(PathBuf::from("/bundle/Advent.z5"));
    app.event_sender()
        .send(AppEvent::OpenFile(PathBuf::from("/home/user/zork1.z3")))
        .unwrap();

    app.run().await.unwrap();

    assert_eq!(app.surface().fed.len(), 1);
    assert!(app.surface().fed[0].contains("Loading zork1.z3..."));
    assert_eq!(
        app.launcher().session().game_file.as_deref(),
        Some(Path::new("/home/user/zork1.z3"))
    );
}

#[tokio::test]
async fn test_exit_status_ignores_interpreter_status() {
    let (_dir, mut app) = app_with(Arch::Bits32, |tx| RecordingSurface::exiting_after_feed(tx, 3));
    app.schedule_game(PathBuf::from("/bundle/missing.z5"));

    assert_eq!(app.run().await.unwrap(), 0);
}

#[tokio::test]
async fn test_unsupported_architecture_stops_the_loop() {
    let (_dir, mut app) = app_with(Arch::Arm, |_| RecordingSurface::default());
    app.schedule_game(PathBuf::from("/bundle/Advent.z5"));

    assert!(app.run().await.is_err());
    assert!(app.surface().fed.is_empty());
    assert_eq!(app.launcher().session().state(), SessionState::NotStarted);
}

#[tokio::test]
async fn test_io_events_reach_the_surface() {
    let (_dir, mut app) = app_with(Arch::Bits64, |_| RecordingSurface::default());

    assert_eq!(app.handle_event(AppEvent::Input(b"look\r".to_vec())).unwrap(), Flow::Continue);
    assert_eq!(
        app.handle_event(AppEvent::PtyOutput(b"West of House\r\n".to_vec())).unwrap(),
        Flow::Continue
    );
    assert_eq!(app.handle_event(AppEvent::ChildExited(None)).unwrap(), Flow::Quit(0));

    assert_eq!(app.surface().input, b"look\r");
    assert_eq!(app.surface().shown, b"West of House\r\n");
}
