use serde::Serialize;
use uuid::Uuid;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DeleteResponse {
    id: Uuid,
    deleted: bool,
}

/// Handle `stask delete`. Deleting an unknown id reports `deleted: false`.
pub async fn handle(id: Uuid, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let deleted = match ctx.store.get(id).cloned() {
        Some(task) => {
            ctx.store.delete(&task).await?;
            true
        }
        None => false,
    };
    output(&DeleteResponse { id, deleted }, flags.format)
}
