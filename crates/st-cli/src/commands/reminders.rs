use chrono::Utc;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReminderCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `stask reminders`.
pub async fn handle(
    action: &ReminderCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let queue = ctx.store.reminders();
    let reminders = match action {
        ReminderCommands::Pending => queue.pending().await?,
        ReminderCommands::Due => {
            let due = queue.take_due(Utc::now()).await?;
            tracing::debug!(count = due.len(), "delivered due reminders");
            due
        }
    };
    output(&reminders, flags.format)
}
