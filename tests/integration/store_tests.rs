//! Terminal settings store tests

use crate::support::RecordingSurface;
use frotz_term::terminal::{Color, TerminalOption, FILE_NAME};
use frotz_term::{TerminalConfigStore, TerminalSettings};

fn store_with(contents: Option<&str>) -> (tempfile::TempDir, TerminalConfigStore) {
    let dir = tempfile::tempdir().unwrap();
    if let Some(contents) = contents {
        std::fs::write(dir.path().join(FILE_NAME), contents).unwrap();
    }
    let store = TerminalConfigStore::in_profile(dir.path());
    (dir, store)
}

#[test]
fn test_missing_file_is_populated_with_defaults() {
    let (_dir, store) = store_with(None);

    let settings = store.load();
    assert_eq!(settings, TerminalSettings::default());

    let written = std::fs::read_to_string(store.path()).unwrap();
    assert!(written.starts_with("[terminal]\n"));
    for option in TerminalOption::ALL {
        let line = format!("{} = {}\n", option.key(), option.default_value());
        assert!(written.contains(&line), "missing {:?} in {}", line, written);
    }
}

#[test]
fn test_load_is_idempotent() {
    for contents in [None, Some(""), Some("[terminal]\nbell = yes\n"), Some("[other]\nx = 1\n")] {
        let (_dir, store) = store_with(contents);

        let first = store.load();
        let bytes_after_first = std::fs::read(store.path()).unwrap();
        let second = store.load();
        let bytes_after_second = std::fs::read(store.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(bytes_after_first, bytes_after_second);
    }
}

#[test]
fn test_partial_override() {
    let (_dir, store) = store_with(Some("[terminal]\nfg_color=#112233\n"));

    let settings = store.load();
    assert_eq!(
        settings.fg_color,
        Color {
            r: 0x11,
            g: 0x22,
            b: 0x33
        }
    );
    assert_eq!(
        TerminalSettings {
            fg_color: TerminalSettings::default().fg_color,
            ..settings.clone()
        },
        TerminalSettings::default()
    );

    let written = std::fs::read_to_string(store.path()).unwrap();
    assert!(written.contains("fg_color = #112233\n"));
    assert!(written.contains("bg_color = #FFFFFF\n"));
}

#[test]
fn test_malformed_boolean_falls_back_to_default() {
    let (_dir, store) = store_with(Some("[terminal]\ncursor_blink=notabool\n"));

    let settings = store.load();
    assert!(!settings.cursor_blink);

    let written = std::fs::read_to_string(store.path()).unwrap();
    assert!(written.contains("cursor_blink = false\n"));
    assert!(!written.contains("notabool"));
}

#[test]
fn test_other_sections_survive_rewrite() {
    let (_dir, store) = store_with(Some("[colors]\npalette = tango\n\n[terminal]\nscrollback_lines = 42\n"));

    let settings = store.load();
    assert_eq!(settings.scrollback_lines, 42);

    let written = std::fs::read_to_string(store.path()).unwrap();
    assert!(written.starts_with("[colors]\npalette = tango\n"));
    assert!(written.contains("scrollback_lines = 42\n"));
}

#[test]
fn test_inline_comment_keeps_value() {
    let (_dir, store) = store_with(Some("[terminal]\nbell = true ; ring on output\nscrollback_lines = 42 ; lines\n"));

    let settings = store.load();
    assert!(settings.bell);
    assert_eq!(settings.scrollback_lines, 42);

    let written = std::fs::read_to_string(store.path()).unwrap();
    assert!(written.contains("bell = true\n"));
    assert!(written.contains("scrollback_lines = 42\n"));
}

#[test]
fn test_byte_order_mark_does_not_hide_section() {
    let (_dir, store) = store_with(Some("\u{feff}[terminal]\nfg_color = #112233\n"));

    let settings = store.load();
    assert_eq!(settings.fg_color, Color { r: 0x11, g: 0x22, b: 0x33 });

    let written = std::fs::read_to_string(store.path()).unwrap();
    assert!(written.contains("fg_color = #112233\n"));
}

#[test]
fn test_file_with_unparsed_lines_is_not_rewritten() {
    let contents = "[terminal]\nfg_color = #112233\nthis line has no value\n";
    let (_dir, store) = store_with(Some(contents));

    let settings = store.load();
    assert_eq!(settings.fg_color, Color { r: 0x11, g: 0x22, b: 0x33 });
    assert_eq!(settings.bg_color, Color::WHITE);

    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), contents);
}

#[test]
fn test_unreadable_path_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be cannot be read as text
    let path = dir.path().join(FILE_NAME);
    std::fs::create_dir(&path).unwrap();

    let settings = TerminalConfigStore::new(&path).load();
    assert_eq!(settings, TerminalSettings::default());
    assert!(path.is_dir());
}

#[test]
fn test_apply_pushes_every_option() {
    let (_dir, store) = store_with(Some(
        "[terminal]\nfont = Sans 12\nbell = true\nvisible_bell = on\nemulation = xterm-256color\n",
    ));
    let settings = store.load();

    let mut surface = RecordingSurface::default();
    TerminalConfigStore::apply(&mut surface, &settings);

    assert_eq!(surface.font.as_ref().map(|f| f.to_string()).as_deref(), Some("Sans 12"));
    assert_eq!(surface.colors, Some((Color::BLACK, Color::WHITE)));
    assert_eq!(surface.cursor_blink, Some(false));
    assert_eq!(surface.audible_bell, Some(true));
    assert_eq!(surface.scrollback_lines, Some(1000));
    assert_eq!(surface.scroll_on_keystroke, Some(false));
    assert_eq!(surface.scroll_on_output, Some(false));
    assert_eq!(surface.emulation.as_deref(), Some("xterm-256color"));
    assert_eq!(surface.visible_bell, Some(true));
    assert_eq!(surface.forked, 0);
}
