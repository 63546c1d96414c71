use colored::*;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::BrewError;

/// Returns true when running with an effective uid of 0. Homebrew refuses to
/// run as root, so callers warn before shelling out.
pub fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

/// Runs `program` with `args`, blocking until it exits, and returns its
/// stdout. A missing binary and a non-zero exit are reported separately.
pub fn run_command(program: &Path, args: &[String]) -> Result<String, BrewError> {
    let command_line = args.join(" ");
    tracing::debug!(program = %program.display(), command = %command_line, "running command");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => BrewError::NotFound {
                path: program.display().to_string(),
            },
            _ => BrewError::Io {
                path: program.display().to_string(),
                message: e.to_string(),
            },
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::debug!(command = %command_line, code = ?output.status.code(), "command failed");
        return Err(BrewError::Failed {
            command: command_line,
            code: output.status.code(),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_not_found() {
        let path = Path::new("/nonexistent/brewgui-test/brew");
        let err = run_command(path, &["list".to_string()]).unwrap_err();
        assert_eq!(
            err,
            BrewError::NotFound {
                path: "/nonexistent/brewgui-test/brew".to_string()
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_failed() {
        let err = run_command(Path::new("false"), &[]).unwrap_err();
        assert!(matches!(err, BrewError::Failed { code: Some(1), .. }));
    }

    #[cfg(unix)]
    #[test]
    fn stdout_is_captured() {
        let out = run_command(Path::new("echo"), &["node".to_string()]).unwrap();
        assert_eq!(out, "node\n");
    }
}
