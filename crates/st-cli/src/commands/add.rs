use st_store::NewTask;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AddArgs;
use crate::context::AppContext;
use crate::output::output_task;

/// Handle `stask add`.
pub async fn handle(args: AddArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let new = NewTask {
        title: args.title,
        description: args.description,
        due_date: args.due,
        category: args.category,
        reminder: args.reminder.unwrap_or_default(),
    };
    let task = ctx.store.create(new).await?;
    output_task(&task, flags.format)
}
