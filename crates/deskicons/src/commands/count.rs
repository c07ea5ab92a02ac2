use deskicons_core::Config;

use super::desktop;

pub fn execute(config: &Config) {
    let count = desktop::run(config, |manager| manager.item_count());
    println!("{count}");
}
