//! Completions command - Generate shell completion scripts

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::output::CommandContext;

/// Print a completion script for the given shell to stdout
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    pub async fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        let mut command = crate::Cli::command();
        generate(self.shell, &mut command, "recital", &mut std::io::stdout());
        Ok(())
    }
}
