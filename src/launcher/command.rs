//! Shell command line that runs a game

use super::{Arch, LaunchError};
use crate::core::config::InterpreterConfig;
use std::path::Path;

/// Seconds the banner stays on screen before the game starts
pub const BANNER_PAUSE_SECS: u32 = 2;

/// Lines of the interpreter's no-argument output shown as a banner
pub const BANNER_LINES: u32 = 3;

/// Build the line typed into the shell to run `game_file` from `save_dir`.
///
/// The line changes into the save directory, clears the screen, shows the
/// interpreter banner and a loading message, pauses, runs the game and then
/// exits the shell. It ends with a newline so the shell executes it.
pub fn build_command(
    game_file: &Path,
    save_dir: &Path,
    arch: Arch,
    interpreters: &InterpreterConfig,
) -> Result<String, LaunchError> {
    let interpreter = arch.interpreter(interpreters)?;

    let game = utf8(game_file)?;
    let save_dir = utf8(save_dir)?;
    let basename = game_file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(game);

    Ok(format!(
        "cd {save_dir}; clear; {interp}|head -{lines} ; echo {loading}; sleep {pause}; {interp} {game}; exit\n",
        save_dir = shell_quote(save_dir),
        interp = interpreter,
        lines = BANNER_LINES,
        loading = shell_quote(&format!("\nLoading {}...", basename)),
        pause = BANNER_PAUSE_SECS,
        game = shell_quote(game),
    ))
}

/// The command is typed as text, so a path that is not UTF-8 cannot be sent
fn utf8(path: &Path) -> Result<&str, LaunchError> {
    path.to_str()
        .ok_or_else(|| LaunchError::NonUtf8Path(path.to_path_buf()))
}

/// Single-quote `value` for a POSIX shell
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
