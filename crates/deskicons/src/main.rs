mod commands;

use clap::{Parser, Subcommand};

use deskicons_core::{config, log, log_info};

#[derive(Parser)]
#[command(
    name = "deskicons",
    version,
    about = "Save and restore Windows desktop icon positions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Show every desktop icon with its index and position
    List,
    /// Print the number of desktop icons
    Count,
    /// Quick-save the current icon positions
    Save(commands::save::SaveArgs),
    /// Restore icon positions from a quick save
    Load(commands::load::LoadArgs),
    /// Move one icon by name
    Move(commands::move_icon::MoveArgs),
}

fn main() {
    let cli = Cli::parse();

    let config = config::load();
    log::init(&config.logging);
    log_info!("deskicons {} started", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Load(args) => commands::load::execute(&config, &args),
        #[cfg(windows)]
        Commands::List => commands::list::execute(&config),
        #[cfg(windows)]
        Commands::Count => commands::count::execute(&config),
        #[cfg(windows)]
        Commands::Save(args) => commands::save::execute(&config, &args),
        #[cfg(windows)]
        Commands::Move(args) => commands::move_icon::execute(&config, &args),
        #[cfg(not(windows))]
        _ => commands::desktop::unsupported(),
    }
}
