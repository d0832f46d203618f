use crate::cli::GlobalFlags;
use crate::cli::subcommands::CalendarCommands;
use crate::context::AppContext;
use crate::output::output_task;

/// Handle `stask calendar`.
pub async fn handle(
    action: &CalendarCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let task = match action {
        CalendarCommands::Add { id } => ctx.store.add_to_calendar(*id).await?,
        CalendarCommands::Remove { id } => ctx.store.remove_from_calendar(*id).await?,
    };
    output_task(&task, flags.format)
}
