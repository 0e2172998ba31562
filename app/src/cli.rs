//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Bullet Train - settings and schema management
#[derive(Parser, Debug)]
#[command(name = "bullet-train")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect runtime settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },

    /// Print a freshly generated secret key
    SecretKey,
}

/// Settings actions
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum SettingsAction {
    /// Load settings and report configuration warnings
    Check,
    /// Print the loaded settings with secrets removed
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Migration actions
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

impl From<MigrateAction> for organisation_service_lib::MigrateAction {
    fn from(action: MigrateAction) -> Self {
        match action {
            MigrateAction::Up => Self::Up,
            MigrateAction::Down => Self::Down,
            MigrateAction::Status => Self::Status,
            MigrateAction::Fresh => Self::Fresh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_migrate_up() {
        let cli = Cli::parse_from(["bullet-train", "migrate", "up"]);
        assert!(matches!(
            cli.command,
            Commands::Migrate {
                action: MigrateAction::Up
            }
        ));
    }

    #[test]
    fn test_parse_settings_show_json_verbose() {
        let cli = Cli::parse_from(["bullet-train", "-v", "settings", "show", "--json"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Settings {
                action: SettingsAction::Show { json: true }
            }
        ));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
