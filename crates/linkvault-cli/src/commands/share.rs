use linkvault_core::dashboard::Dashboard;

use crate::cli::ShareCommands;
use crate::commands::common::{settle, CommandContext};
use crate::error::CliError;

pub async fn run_share(command: ShareCommands, context: &CommandContext) -> Result<(), CliError> {
    match command {
        ShareCommands::Generate => {
            let dashboard = Dashboard::new(context.api.clone());
            let outcome = dashboard.generate_share().await;
            let link = settle(outcome, dashboard.message())?;
            println!("{link}");
            Ok(())
        }
    }
}
