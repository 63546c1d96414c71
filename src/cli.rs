use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::brew::{self, Brew};
use crate::gui;
use crate::utils;

#[derive(Parser)]
#[clap(name = "brewgui")]
#[clap(about = "A small desktop front-end for Homebrew", long_about = "A small desktop front-end for Homebrew.\n\nRun without a subcommand to open the window. The subcommands run the same\nbrew operations from the terminal.")]
pub struct Cli {
    /// Path to the brew executable (overrides the config file)
    #[clap(long, global = true)]
    pub brew: Option<PathBuf>,
    /// Log at debug level
    #[clap(short, long, global = true)]
    pub verbose: bool,
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the window (the default)
    Gui,
    /// List installed formulae and casks
    List,
    /// Search Homebrew for packages
    Search {
        /// Search query
        query: String,
    },
    /// Install a package
    Install {
        /// Package name
        package: String,
    },
    /// Uninstall a package
    Uninstall {
        /// Package name
        package: String,
    },
    /// Upgrade all outdated packages
    Upgrade,
}

fn print_lookup(entries: &[String]) -> Result<()> {
    if let [only] = entries {
        if brew::is_lookup_marker(only) {
            utils::print_error(only);
            anyhow::bail!("{}", only);
        }
    }
    for entry in entries {
        println!("{}", entry);
    }
    Ok(())
}

impl Cli {
    pub fn run(self, brew: Arc<dyn Brew>) -> Result<()> {
        match self.command.unwrap_or(Commands::Gui) {
            Commands::Gui => gui::run(brew)?,
            Commands::List => print_lookup(&brew::list_installed(brew.as_ref()))?,
            Commands::Search { query } => print_lookup(&brew::search(brew.as_ref(), &query))?,
            Commands::Install { package } => {
                utils::print_info(&format!("Installing {}...", package));
                brew::install(brew.as_ref(), &package)?;
                utils::print_success(&format!("Installed {}", package));
            }
            Commands::Uninstall { package } => {
                utils::print_info(&format!("Uninstalling {}...", package));
                brew::uninstall(brew.as_ref(), &package)?;
                utils::print_success(&format!("Uninstalled {}", package));
            }
            Commands::Upgrade => {
                utils::print_info("Upgrading all packages...");
                brew::upgrade_all(brew.as_ref())?;
                utils::print_success("Packages upgraded");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brew::MockBrew;
    use crate::error::BrewError;

    #[test]
    fn no_subcommand_means_gui() {
        let cli = Cli::try_parse_from(["brewgui"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn global_brew_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["brewgui", "search", "node", "--brew", "/usr/local/bin/brew"]).unwrap();
        assert_eq!(cli.brew, Some(PathBuf::from("/usr/local/bin/brew")));
        assert!(matches!(cli.command, Some(Commands::Search { ref query }) if query == "node"));
    }

    #[test]
    fn install_failure_propagates() {
        let mut mock = MockBrew::new();
        mock.expect_run().returning(|_| {
            Err(BrewError::Failed {
                command: "install nope".to_string(),
                code: Some(1),
                stderr: "No available formula".to_string(),
            })
        });
        let cli = Cli::try_parse_from(["brewgui", "install", "nope"]).unwrap();
        assert!(cli.run(Arc::new(mock)).is_err());
    }

    #[test]
    fn lookup_marker_is_an_error() {
        let entries = vec![brew::SEARCH_FAILED.to_string()];
        assert!(print_lookup(&entries).is_err());
        assert!(print_lookup(&["node".to_string()]).is_ok());
    }
}
