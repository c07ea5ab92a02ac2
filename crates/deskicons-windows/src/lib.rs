//! Windows implementation of the desktop icon controller.
//!
//! On other platforms this crate is empty.
#![cfg(windows)]

/// Desktop list-view discovery.
pub mod locate;

/// Memory operations in the shell process.
pub mod process;

/// List-view window wrapping a Win32 `HWND`.
pub mod window;

use deskicons_core::{IconResult, ListViewController};

pub use locate::locate_desktop_list_view;
pub use process::ProcessHandle;
pub use window::ListView;

/// Controller for the real desktop.
pub type IconManager = ListViewController<ListView, ProcessHandle>;

/// Locates the desktop list view, opens its shell process and
/// allocates the parameter buffers.
pub fn open_icon_manager(text_capacity: usize) -> IconResult<IconManager> {
    let list_view = locate_desktop_list_view()?;
    let pid = list_view.owner_process_id()?;
    let process = ProcessHandle::open(pid)?;
    ListViewController::new(list_view, process, text_capacity)
}
