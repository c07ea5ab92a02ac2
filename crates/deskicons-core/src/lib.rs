pub mod buffer;
pub mod config;
pub mod error;
pub mod icon;
pub mod layout;
pub mod listview;
pub mod log;
pub mod memory;
pub mod point;
pub mod wire;

#[cfg(test)]
mod testing;

pub use buffer::{RemoteBuffer, RemoteString};
pub use config::Config;
pub use error::{IconError, IconResult};
pub use icon::{DesktopIconEntry, IconSnapshot};
pub use layout::{ApplyReport, Layout, SavedIcon};
pub use listview::{DEFAULT_TEXT_CAPACITY, ListViewController, MessageTarget};
pub use memory::{ProcessMemory, RemoteAddress};
pub use point::Point;
