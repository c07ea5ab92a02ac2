use clap::Args;

/// Arguments for the `move` subcommand.
#[derive(Args)]
#[cfg_attr(not(windows), allow(dead_code))]
pub struct MoveArgs {
    /// Icon caption, exactly as shown on the desktop
    name: String,
    /// X position in list-view client coordinates
    #[arg(long, allow_negative_numbers = true)]
    x: i32,
    /// Y position in list-view client coordinates
    #[arg(long, allow_negative_numbers = true)]
    y: i32,
}

#[cfg(windows)]
pub fn execute(config: &deskicons_core::Config, args: &MoveArgs) {
    use deskicons_core::Point;

    use super::desktop;

    let target = Point::new(args.x, args.y);

    let moved = desktop::run(config, |manager| {
        let snapshot = manager.icons()?;
        let Some(entry) = snapshot.get(&args.name) else {
            return Ok(None);
        };
        manager.set_item_position(entry.index, target)?;
        Ok(Some(entry.position))
    });

    match moved {
        Some(from) => println!("Moved {:?} from {from} to {target}", args.name),
        None => desktop::fail(&format!("no desktop icon named {:?}", args.name)),
    }
}
