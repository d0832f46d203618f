use anyhow::Context;
use st_widget::{SnapshotReader, SnapshotWriter};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::WidgetArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `stask widget`: print the snapshot the widget would read.
pub fn handle(args: &WidgetArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = ctx
        .config
        .widget
        .snapshot_path()
        .context("no widget directory; set widget.shared_dir")?;

    if args.refresh {
        let mut upcoming = ctx.store.tasks().to_vec();
        upcoming.sort_by_key(|t| t.due_date);
        SnapshotWriter::new(path.clone()).write(&upcoming);
    }

    let snapshot = SnapshotReader::new(path).read();
    output(&snapshot, flags.format)
}
