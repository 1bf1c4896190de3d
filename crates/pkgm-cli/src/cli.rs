//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pkgm - Install and manage plugins from a git-hosted catalog
#[derive(Parser, Debug)]
#[command(name = "pkgm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base directory holding mirrors, installed packages, and the trash
    #[arg(long, global = true, env = "PKGM_HOME", default_value = "pkgs")]
    pub base: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Search the catalog by name or description (case-insensitive regex)
    Search {
        /// Regular expression to match
        pattern: String,
    },

    /// Update the local mirror of the catalog
    Update,

    /// Pull the latest version of one package, or of all installed packages
    ///
    /// Examples:
    ///   pkgm upgrade            # Upgrade everything under installed/
    ///   pkgm upgrade weather    # Upgrade a single package
    Upgrade {
        /// Package to upgrade
        pkg: Option<String>,
    },

    /// Install packages by catalog name or by http(s) git URL
    ///
    /// Examples:
    ///   pkgm install weather
    ///   pkgm install https://github.com/someone/dice.git
    Install {
        /// Package names or URLs
        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// Uninstall packages, moving them to the trash
    Uninstall {
        /// Installed package names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// List installed packages
    List,

    /// List every package in the catalog
    #[command(name = "list-all", alias = "list_all")]
    ListAll {
        /// Output the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read or change persisted options
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the value of one option
    Get { key: String },

    /// Change one option and save it
    Set { key: String, value: String },

    /// Print every option
    List,
}
