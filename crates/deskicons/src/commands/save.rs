use std::path::PathBuf;

use clap::Args;

/// Arguments for the `save` subcommand.
#[derive(Args)]
#[cfg_attr(not(windows), allow(dead_code))]
pub struct SaveArgs {
    /// Layout file (defaults to the configured quick-save file)
    #[arg(long)]
    file: Option<PathBuf>,
}

#[cfg(windows)]
pub fn execute(config: &deskicons_core::Config, args: &SaveArgs) {
    use deskicons_core::Layout;

    use super::desktop;

    let Some(path) = args.file.clone().or_else(|| config.layout_path()) else {
        desktop::fail("could not determine home directory");
    };

    let layout = desktop::run(config, |manager| Layout::capture(manager));

    if let Err(e) = layout.save(&path) {
        desktop::fail(&e.to_string());
    }
    println!("Saved {} icons to {}", layout.len(), path.display());
}
