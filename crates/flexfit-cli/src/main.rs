use anyhow::Result;

use flexfit_cli::cli::{Cli, Command};
use flexfit_db::Connection;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::init();

    let conn = Connection::open(&cli.members_db).await?;
    match cli.command {
        Command::Members(cmd) => cmd.run(&conn).await,
        Command::Payments(cmd) => cmd.run(&conn).await,
        Command::Billing(cmd) => cmd.run(&conn).await,
    }?;

    Ok(())
}
