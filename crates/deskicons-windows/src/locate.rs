use deskicons_core::{IconError, IconResult, log_debug};

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{FindWindowW, GW_CHILD, GetWindow};
use windows::core::{PCWSTR, w};

use crate::window::ListView;

/// Class the icon list view must report.
pub const LIST_VIEW_CLASS: &str = "SysListView32";

/// Finds the list view that holds the desktop icons.
///
/// The control sits two levels below the shell window:
/// `Progman` → `SHELLDLL_DefView` → `SysListView32`. Only first
/// children are followed; there is no fallback search, so shells that
/// move the view elsewhere report `ControlNotFound`.
pub fn locate_desktop_list_view() -> IconResult<ListView> {
    // SAFETY: FindWindowW only reads the two string arguments.
    let shell = unsafe { FindWindowW(w!("Progman"), PCWSTR::null()) }
        .ok()
        .filter(|h| !h.is_invalid())
        .ok_or_else(|| not_found("no Progman window".into()))?;

    let view = first_child(shell).ok_or_else(|| not_found("shell window has no child".into()))?;
    let list = first_child(view).ok_or_else(|| not_found("shell view has no child".into()))?;

    let list_view = ListView::new(list);
    let class = list_view.class();
    if !is_list_view_class(&class) {
        return Err(not_found(format!(
            "expected {LIST_VIEW_CLASS}, found {class:?}"
        )));
    }

    log_debug!("desktop list view at 0x{:X}", list.0 as usize);
    Ok(list_view)
}

/// Exact, case-sensitive class comparison.
pub fn is_list_view_class(class: &str) -> bool {
    class == LIST_VIEW_CLASS
}

fn first_child(hwnd: HWND) -> Option<HWND> {
    // SAFETY: GetWindow is a read-only query on the window tree.
    unsafe { GetWindow(hwnd, GW_CHILD) }
        .ok()
        .filter(|h| !h.is_invalid())
}

fn not_found(reason: String) -> IconError {
    IconError::ControlNotFound { reason }
}
