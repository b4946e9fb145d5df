use clap::{Parser, Subcommand};

use crate::config::Config;

/// Container image directory API server.
#[derive(Debug, Parser)]
#[command(name = "hubdir-server", version, about)]
pub struct Cli {
    /// Address to bind, overrides HUBDIR_BIND.
    #[arg(long, global = true)]
    pub bind: Option<String>,

    /// Store URL, overrides HUBDIR_DATABASE_URL.
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default).
    #[default]
    Serve,
    /// Replace the image catalog with the bundled seed data.
    Seed,
}

impl Cli {
    /// Apply flag overrides on top of the environment configuration.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(bind) = &self.bind {
            cfg.bind_address = bind.clone();
        }
        if let Some(url) = &self.database_url {
            cfg.database_url = url.clone();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["hubdir-server"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Command::Serve);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "hubdir-server",
            "seed",
            "--database-url",
            "sqlite://other.db",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Command::Seed));

        let mut cfg = Config::default();
        cli.apply(&mut cfg);
        assert_eq!(cfg.database_url, "sqlite://other.db");
        assert_eq!(cfg.bind_address, "0.0.0.0:8001");
    }
}
