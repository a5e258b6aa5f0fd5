// src/shell.rs
use std::env;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShellType {
    Posix,
    PowerShell,
    Cmd,
}

impl ShellType {
    pub fn detect() -> Self {
        if cfg!(windows) {
            // PSModulePath is only populated inside PowerShell sessions
            if let Ok(module_path) = env::var("PSModulePath") {
                if !module_path.is_empty() {
                    return ShellType::PowerShell;
                }
            }
            ShellType::Cmd
        } else {
            ShellType::Posix
        }
    }

    pub fn get_shell_command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            ShellType::Posix => ("sh", &["-c"]),
            ShellType::PowerShell => ("powershell", &["-NoProfile", "-Command"]),
            ShellType::Cmd => ("cmd", &["/C"]),
        }
    }

    pub fn get_shell_name(&self) -> &'static str {
        match self {
            ShellType::Posix => "POSIX sh",
            ShellType::PowerShell => "PowerShell",
            ShellType::Cmd => "Command Prompt",
        }
    }
}
