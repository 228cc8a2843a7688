use clap::{Parser, Subcommand};

mod migrate;
mod user;

#[derive(Debug, Parser)]
#[command(name = "techhaven-app", about = "Techhaven admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage user accounts
    User(user::UserCommand),

    /// Apply pending database migrations
    Migrate(migrate::MigrateArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Migrate(args) => migrate::run(args).await,
        }
    }
}
