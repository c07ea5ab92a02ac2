use std::io::ErrorKind;
use std::path::PathBuf;

use clap::Args;

use deskicons_core::{Config, IconError, Layout};

use super::desktop;

/// Arguments for the `load` subcommand.
#[derive(Args)]
pub struct LoadArgs {
    /// Layout file (defaults to the configured quick-save file)
    #[arg(long)]
    file: Option<PathBuf>,
}

pub fn execute(config: &Config, args: &LoadArgs) {
    let Some(path) = args.file.clone().or_else(|| config.layout_path()) else {
        desktop::fail("could not determine home directory");
    };

    let layout = match Layout::load(&path) {
        Ok(layout) => layout,
        Err(IconError::LayoutIo { source, .. }) if source.kind() == ErrorKind::NotFound => {
            eprintln!("No quick save found.");
            std::process::exit(1);
        }
        Err(e) => desktop::fail(&e.to_string()),
    };

    if layout.is_empty() {
        println!("Quick save at {} holds no icons.", path.display());
        return;
    }
    apply(config, &layout);
}

#[cfg(windows)]
fn apply(config: &Config, layout: &Layout) {
    let report = desktop::run(config, |manager| layout.apply(manager));

    for name in &report.moved {
        println!("Restored {name}");
    }
    for name in &report.skipped {
        println!("Skipped {name} (not on the desktop)");
    }
    println!(
        "\n{} restored, {} skipped",
        report.moved.len(),
        report.skipped.len()
    );
}

#[cfg(not(windows))]
fn apply(_config: &Config, _layout: &Layout) {
    desktop::unsupported();
}
