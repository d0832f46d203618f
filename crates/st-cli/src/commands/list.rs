use chrono::Utc;
use st_store::TaskQuery;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::context::AppContext;
use crate::output::output_tasks;

/// Handle `stask list`.
pub async fn handle(args: &ListArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let query = TaskQuery {
        search_text: args.search.clone().unwrap_or_default(),
        is_done: args.done_filter(),
    };
    ctx.store.fetch(&query).await?;

    let tasks = ctx.store.visible(args.filter, Utc::now());
    output_tasks(&tasks, flags.format)
}
