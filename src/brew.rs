use std::path::{Path, PathBuf};

use crate::error::BrewError;
use crate::utils::run_command;

/// Prefix shared by the synthetic entries returned when a lookup fails.
pub const LOOKUP_MARKER_PREFIX: &str = "Error: ";

pub const SEARCH_FAILED: &str = "Error: Search failed.";

/// The external package manager. Everything above this trait treats brew
/// as a black box that takes arguments and returns stdout.
#[cfg_attr(test, mockall::automock)]
pub trait Brew: Send + Sync {
    /// Where the executable lives, used in user-facing messages.
    fn location(&self) -> String;

    /// Runs one brew subcommand to completion.
    fn run(&self, args: &[String]) -> Result<String, BrewError>;
}

#[derive(Debug, Clone)]
pub struct Homebrew {
    path: PathBuf,
}

impl Homebrew {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Brew for Homebrew {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn run(&self, args: &[String]) -> Result<String, BrewError> {
        run_command(&self.path, args)
    }
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn output_lines(output: &str) -> Vec<String> {
    output.trim().lines().map(str::to_string).collect()
}

/// The message shown in place of the installed list when it can't be read.
pub fn list_failed_marker(brew: &dyn Brew) -> String {
    format!("{}Could not get {} packages.", LOOKUP_MARKER_PREFIX, brew.location())
}

pub fn is_lookup_marker(entry: &str) -> bool {
    entry.starts_with(LOOKUP_MARKER_PREFIX)
}

fn try_list_installed(brew: &dyn Brew) -> Result<Vec<String>, BrewError> {
    let mut packages = output_lines(&brew.run(&args(&["list", "--formula"]))?);
    packages.extend(output_lines(&brew.run(&args(&["list", "--cask"]))?));
    packages.sort();
    Ok(packages)
}

/// Formulae and casks merged into one ascending list. Names present in both
/// categories appear twice. Any failure yields a single marker entry.
pub fn list_installed(brew: &dyn Brew) -> Vec<String> {
    match try_list_installed(brew) {
        Ok(packages) => {
            tracing::debug!(count = packages.len(), "installed packages listed");
            packages
        }
        Err(e) => {
            tracing::warn!(error = %e, "listing installed packages failed");
            vec![list_failed_marker(brew)]
        }
    }
}

pub fn search(brew: &dyn Brew, query: &str) -> Vec<String> {
    match brew.run(&args(&["search", query])) {
        Ok(output) => output_lines(&output),
        Err(e) => {
            tracing::warn!(query, error = %e, "search failed");
            vec![SEARCH_FAILED.to_string()]
        }
    }
}

pub fn install(brew: &dyn Brew, name: &str) -> Result<(), BrewError> {
    brew.run(&args(&["install", name])).map(|_| ())
}

pub fn uninstall(brew: &dyn Brew, name: &str) -> Result<(), BrewError> {
    brew.run(&args(&["uninstall", name])).map(|_| ())
}

pub fn upgrade_all(brew: &dyn Brew) -> Result<(), BrewError> {
    brew.run(&args(&["upgrade"])).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(formulae: &'static str, casks: &'static str) -> MockBrew {
        let mut brew = MockBrew::new();
        brew.expect_location()
            .return_const("/opt/homebrew/bin/brew".to_string());
        brew.expect_run()
            .withf(|a| a.join(" ") == "list --formula")
            .returning(move |_| Ok(formulae.to_string()));
        brew.expect_run()
            .withf(|a| a.join(" ") == "list --cask")
            .returning(move |_| Ok(casks.to_string()));
        brew
    }

    #[test]
    fn merges_and_sorts_both_categories() {
        let brew = listing("wget\ncurl\n", "firefox\n");
        assert_eq!(list_installed(&brew), vec!["curl", "firefox", "wget"]);
    }

    #[test]
    fn keeps_duplicates_across_categories() {
        let brew = listing("docker\ngit\n", "docker\n");
        assert_eq!(list_installed(&brew), vec!["docker", "docker", "git"]);
    }

    #[test]
    fn empty_category_contributes_nothing() {
        let brew = listing("", "iterm2\n");
        assert_eq!(list_installed(&brew), vec!["iterm2"]);
    }

    #[test]
    fn missing_binary_yields_marker() {
        let mut brew = MockBrew::new();
        brew.expect_location()
            .return_const("/opt/homebrew/bin/brew".to_string());
        brew.expect_run().returning(|_| {
            Err(BrewError::NotFound {
                path: "/opt/homebrew/bin/brew".to_string(),
            })
        });

        let list = list_installed(&brew);
        assert_eq!(list, vec!["Error: Could not get /opt/homebrew/bin/brew packages."]);
        assert!(is_lookup_marker(&list[0]));
    }

    #[test]
    fn cask_failure_discards_formulae() {
        let mut brew = MockBrew::new();
        brew.expect_location().return_const("brew".to_string());
        brew.expect_run()
            .withf(|a| a.join(" ") == "list --formula")
            .returning(|_| Ok("wget\n".to_string()));
        brew.expect_run()
            .withf(|a| a.join(" ") == "list --cask")
            .returning(|_| {
                Err(BrewError::Failed {
                    command: "list --cask".to_string(),
                    code: Some(1),
                    stderr: String::new(),
                })
            });

        assert_eq!(list_installed(&brew), vec!["Error: Could not get brew packages."]);
    }

    #[test]
    fn search_splits_output_lines() {
        let mut brew = MockBrew::new();
        brew.expect_run()
            .withf(|a| a.join(" ") == "search node")
            .times(1)
            .returning(|_| Ok("node\nnodenv\n".to_string()));
        assert_eq!(search(&brew, "node"), vec!["node", "nodenv"]);
    }

    #[test]
    fn search_with_empty_output_is_empty() {
        let mut brew = MockBrew::new();
        brew.expect_run()
            .withf(|a| a.join(" ") == "search x")
            .returning(|_| Ok(String::new()));
        assert!(search(&brew, "x").is_empty());
    }

    #[test]
    fn search_failure_yields_marker() {
        let mut brew = MockBrew::new();
        brew.expect_run().returning(|_| {
            Err(BrewError::Failed {
                command: "search zzz".to_string(),
                code: Some(1),
                stderr: "No formulae or casks found".to_string(),
            })
        });
        assert_eq!(search(&brew, "zzz"), vec![SEARCH_FAILED]);
    }

    #[test]
    fn mutations_pass_the_name_through() {
        let mut brew = MockBrew::new();
        brew.expect_run()
            .withf(|a| a.join(" ") == "install wget")
            .times(1)
            .returning(|_| Ok(String::new()));
        brew.expect_run()
            .withf(|a| a.join(" ") == "uninstall wget")
            .times(1)
            .returning(|_| Ok(String::new()));
        brew.expect_run()
            .withf(|a| a.join(" ") == "upgrade")
            .times(1)
            .returning(|_| Ok(String::new()));

        install(&brew, "wget").unwrap();
        uninstall(&brew, "wget").unwrap();
        upgrade_all(&brew).unwrap();
    }

    #[test]
    fn mutation_failure_is_returned() {
        let mut brew = MockBrew::new();
        brew.expect_run().returning(|_| {
            Err(BrewError::Failed {
                command: "install nope".to_string(),
                code: Some(1),
                stderr: "No available formula".to_string(),
            })
        });
        assert!(matches!(install(&brew, "nope"), Err(BrewError::Failed { .. })));
    }

    #[test]
    fn marker_detection() {
        assert!(is_lookup_marker(SEARCH_FAILED));
        assert!(!is_lookup_marker("wget"));
    }
}
