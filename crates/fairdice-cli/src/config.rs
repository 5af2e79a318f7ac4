//! Command-line configuration.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "fairdice")]
#[command(about = "Non-transitive dice game with provably fair rolls")]
#[command(version)]
pub struct Cli {
    /// Dice to play with, each as six comma-separated integers
    #[arg(value_name = "DIE", allow_hyphen_values = true)]
    pub dice: Vec<String>,

    /// Log filter, e.g. `debug` or `fairdice_core=trace`
    #[arg(long, env = "FAIRDICE_LOG", default_value = "warn")]
    pub log_level: String,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub dice: Vec<String>,
    pub log_level: String,
    pub color: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            dice: cli.dice,
            log_level: cli.log_level,
            color: !cli.no_color,
        }
    }
}
