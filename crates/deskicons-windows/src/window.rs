use deskicons_core::{IconError, IconResult, MessageTarget};

use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    GetWindowThreadProcessId, RealGetWindowClassW, SendMessageW,
};

/// The desktop's list-view control, wrapping its `HWND`.
///
/// The window belongs to the shell; this type only holds the handle
/// and never creates or destroys the control.
#[derive(Debug, Clone, Copy)]
pub struct ListView {
    hwnd: HWND,
}

impl ListView {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    /// Returns the window class name.
    pub fn class(&self) -> String {
        // SAFETY: RealGetWindowClassW reads the window class name.
        // 256 is the maximum class name length in Win32.
        unsafe {
            let mut buffer = [0u16; 256];
            let length = RealGetWindowClassW(self.hwnd, &mut buffer);
            String::from_utf16_lossy(&buffer[..length as usize])
        }
    }

    /// Process ID of the shell that owns the control.
    pub fn owner_process_id(&self) -> IconResult<u32> {
        let mut pid: u32 = 0;
        // SAFETY: GetWindowThreadProcessId writes the owning PID into `pid`.
        unsafe { GetWindowThreadProcessId(self.hwnd, Some(&mut pid as *mut u32)) };
        if pid == 0 {
            return Err(IconError::ControlNotFound {
                reason: format!("window 0x{:X} has no owning process", self.hwnd.0 as usize),
            });
        }
        Ok(pid)
    }
}

impl MessageTarget for ListView {
    fn send(&self, message: u32, wparam: usize, lparam: isize) -> isize {
        // SAFETY: SendMessageW blocks until the control's thread handles
        // the message. Any pointer in `lparam` is an address inside the
        // shell process, which is where the control dereferences it.
        let result =
            unsafe { SendMessageW(self.hwnd, message, Some(WPARAM(wparam)), Some(LPARAM(lparam))) };
        result.0
    }
}
