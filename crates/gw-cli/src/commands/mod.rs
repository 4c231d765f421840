use gw_config::GradewatchConfig;

use crate::cli::{Commands, GlobalFlags};

mod catalog;
mod grade;
mod init;
mod report;
mod schema;
mod serve;
mod student;
mod token;
mod tutor;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: GradewatchConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => serve::handle(&args, config).await,
        Commands::Init(args) => init::handle(&args, &config, flags).await,
        Commands::Student { action } => student::handle(action, &config, flags).await,
        Commands::Tutor { action } => tutor::handle(action, &config, flags).await,
        Commands::Subject { action } => catalog::handle_subject(action, &config, flags).await,
        Commands::Period { action } => catalog::handle_period(action, &config, flags).await,
        Commands::Grade { action } => grade::handle(action, &config, flags).await,
        Commands::Summary(args) => report::summary(&args, &config, flags).await,
        Commands::Risk(args) => report::risk(&args, &config, flags).await,
        Commands::AtRisk(args) => report::at_risk(&args, &config, flags).await,
        Commands::Token(args) => token::handle(&args, &config, flags),
        Commands::Schema(args) => schema::handle(&args),
    }
}
