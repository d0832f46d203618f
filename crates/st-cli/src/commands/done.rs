use crate::cli::GlobalFlags;
use crate::cli::root_commands::DoneArgs;
use crate::context::AppContext;
use crate::output::output_task;

/// Handle `stask done`.
pub async fn handle(args: &DoneArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let task = ctx.store.set_done(args.id, !args.undo).await?;
    output_task(&task, flags.format)
}
