use std::cell::Cell;
use std::ffi::c_void;

use deskicons_core::memory::{ProcessMemory, RemoteAddress};
use deskicons_core::{IconError, IconResult, log_debug, log_warn};
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Diagnostics::Debug::{ReadProcessMemory, WriteProcessMemory};
use windows::Win32::System::Memory::{
    MEM_COMMIT, MEM_RELEASE, MEM_RESERVE, PAGE_READWRITE, VirtualAllocEx, VirtualFreeEx,
};
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_VM_OPERATION, PROCESS_VM_READ, PROCESS_VM_WRITE,
};

const RESOURCE: &str = "process handle";

/// A handle to the shell process with VM read/write/operation rights.
///
/// Closed explicitly with [`ProcessMemory::release`]; dropping an open
/// handle closes it as well. After release every operation fails with
/// `UseAfterRelease`.
pub struct ProcessHandle {
    handle: Cell<Option<HANDLE>>,
    pid: u32,
}

impl ProcessHandle {
    /// Opens `pid` with the rights needed to allocate, read and write
    /// its memory.
    pub fn open(pid: u32) -> IconResult<Self> {
        let access = PROCESS_VM_READ | PROCESS_VM_WRITE | PROCESS_VM_OPERATION;

        // SAFETY: OpenProcess has no memory-safety preconditions; a
        // refused request comes back as an error.
        let handle = unsafe { OpenProcess(access, false, pid) }.map_err(|e| {
            IconError::ProcessOpenFailed {
                pid,
                reason: e.to_string(),
            }
        })?;

        log_debug!("opened process {pid}");
        Ok(Self {
            handle: Cell::new(Some(handle)),
            pid,
        })
    }

    fn live(&self) -> IconResult<HANDLE> {
        self.handle
            .get()
            .ok_or(IconError::UseAfterRelease { resource: RESOURCE })
    }
}

impl ProcessMemory for ProcessHandle {
    fn allocate(&self, size: usize) -> IconResult<RemoteAddress> {
        let handle = self.live()?;

        // SAFETY: the handle is open with PROCESS_VM_OPERATION; a null
        // return signals failure and is checked below.
        let address = unsafe {
            VirtualAllocEx(
                handle,
                None,
                size,
                MEM_COMMIT | MEM_RESERVE,
                PAGE_READWRITE,
            )
        };
        if address.is_null() {
            return Err(IconError::RemoteAllocFailed {
                size,
                reason: std::io::Error::last_os_error().to_string(),
            });
        }
        Ok(address as RemoteAddress)
    }

    fn free(&self, address: RemoteAddress) -> IconResult<()> {
        let handle = self.live()?;

        // SAFETY: `address` was returned by VirtualAllocEx for this
        // process; MEM_RELEASE requires a size of zero.
        unsafe { VirtualFreeEx(handle, address as *mut c_void, 0, MEM_RELEASE) }.map_err(|e| {
            IconError::RemoteWriteFailed {
                address,
                reason: format!("VirtualFreeEx: {e}"),
            }
        })
    }

    fn read(&self, address: RemoteAddress, buf: &mut [u8]) -> IconResult<()> {
        let handle = self.live()?;
        let mut copied = 0usize;

        // SAFETY: `buf` is a valid, writable local slice of `buf.len()`
        // bytes. The remote address is only interpreted by the kernel.
        let result = unsafe {
            ReadProcessMemory(
                handle,
                address as *const c_void,
                buf.as_mut_ptr().cast(),
                buf.len(),
                Some(&mut copied as *mut usize),
            )
        };

        match result {
            Err(e) => Err(IconError::RemoteReadFailed {
                address,
                reason: e.to_string(),
            }),
            Ok(()) if copied != buf.len() => Err(IconError::RemoteReadFailed {
                address,
                reason: format!("copied {copied} of {} bytes", buf.len()),
            }),
            Ok(()) => Ok(()),
        }
    }

    fn write(&self, address: RemoteAddress, data: &[u8]) -> IconResult<()> {
        let handle = self.live()?;
        let mut copied = 0usize;

        // SAFETY: `data` is a valid local slice of `data.len()` bytes.
        let result = unsafe {
            WriteProcessMemory(
                handle,
                address as *const c_void,
                data.as_ptr().cast(),
                data.len(),
                Some(&mut copied as *mut usize),
            )
        };

        match result {
            Err(e) => Err(IconError::RemoteWriteFailed {
                address,
                reason: e.to_string(),
            }),
            Ok(()) if copied != data.len() => Err(IconError::RemoteWriteFailed {
                address,
                reason: format!("copied {copied} of {} bytes", data.len()),
            }),
            Ok(()) => Ok(()),
        }
    }

    fn release(&self) -> IconResult<()> {
        let Some(handle) = self.handle.take() else {
            return Err(IconError::AlreadyReleased { resource: RESOURCE });
        };

        // SAFETY: the handle came from OpenProcess and is closed once;
        // `take` above guarantees no second close.
        unsafe {
            let _ = CloseHandle(handle);
        }
        log_debug!("closed process {}", self.pid);
        Ok(())
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        if self.handle.get().is_some() {
            log_warn!("process handle for {} dropped without release", self.pid);
            let _ = self.release();
        }
    }
}
