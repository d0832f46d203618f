use anyhow::bail;
use st_store::TaskUpdate;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EditArgs;
use crate::context::AppContext;
use crate::output::output_task;

/// Handle `stask edit`.
pub async fn handle(args: EditArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = args.id;
    let update = into_update(args);
    if update.is_empty() {
        bail!("nothing to change: pass at least one of --title, --description, --due, --category, --reminder");
    }
    let task = ctx.store.update(id, update).await?;
    output_task(&task, flags.format)
}

fn into_update(args: EditArgs) -> TaskUpdate {
    TaskUpdate {
        title: args.title,
        description: args.description.map(|d| Some(d).filter(|d| !d.is_empty())),
        due_date: args.due,
        category: args.category,
        reminder: args.reminder,
        ..TaskUpdate::default()
    }
}
