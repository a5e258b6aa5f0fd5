use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::{Path, PathBuf};

pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))
}

/// Expands a leading `~` or `~user` and maps an empty argument to the
/// home directory.
pub fn expand_path(arg: &str) -> Result<PathBuf> {
    let arg = arg.trim();
    if arg.is_empty() {
        return home_dir();
    }
    if let Some(path) = expand_other_user(arg) {
        return Ok(path);
    }
    Ok(PathBuf::from(shellexpand::tilde(arg).as_ref()))
}

/// `~name[/rest]`, looked up next to the current user's home directory.
fn expand_other_user(arg: &str) -> Option<PathBuf> {
    let rest = arg.strip_prefix('~')?;
    let (user, tail) = rest.split_once('/').unwrap_or((rest, ""));
    if user.is_empty() {
        return None;
    }

    let home = dirs::home_dir()?;
    let user_home = home.parent()?.join(user);
    if !user_home.is_dir() {
        return None;
    }
    Some(if tail.is_empty() {
        user_home
    } else {
        user_home.join(tail)
    })
}

/// `cd` for the shell process itself. Relative paths resolve against the
/// current working directory.
pub fn change_directory(arg: &str) -> Result<PathBuf> {
    let target = expand_path(arg)?;
    env::set_current_dir(&target)
        .with_context(|| format!("Failed to change directory to '{}'", target.display()))?;
    env::current_dir().context("Failed to read the new working directory")
}

/// The path with the home directory shown as `~`.
pub fn shorten_home(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home {
        if let Ok(rest) = path.strip_prefix(home) {
            if rest.as_os_str().is_empty() {
                return "~".to_string();
            }
            return Path::new("~").join(rest).display().to_string();
        }
    }
    path.display().to_string()
}

pub fn display_current_dir() -> String {
    match env::current_dir() {
        Ok(cwd) => shorten_home(&cwd, dirs::home_dir().as_deref()),
        Err(_) => "?".to_string(),
    }
}
