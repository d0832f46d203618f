use st_config::StConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `stask config`.
pub fn handle(config: &StConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(config, flags.format)
}
