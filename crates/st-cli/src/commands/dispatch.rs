use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::List(args) => commands::list::handle(&args, ctx, flags).await,
        Commands::Add(args) => commands::add::handle(args, ctx, flags).await,
        Commands::Edit(args) => commands::edit::handle(args, ctx, flags).await,
        Commands::Done(args) => commands::done::handle(&args, ctx, flags).await,
        Commands::Delete { id } => commands::delete::handle(id, ctx, flags).await,
        Commands::Calendar { action } => commands::calendar::handle(&action, ctx, flags).await,
        Commands::Reminders { action } => commands::reminders::handle(&action, ctx, flags).await,
        Commands::Widget(args) => commands::widget::handle(&args, ctx, flags),
        Commands::Config => commands::config::handle(&ctx.config, flags),
    }
}
