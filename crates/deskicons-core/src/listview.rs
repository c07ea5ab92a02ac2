//! Request/reply protocol against the desktop list-view control.
//!
//! The control lives in the shell process, so every message that carries
//! a structure points at one of three remote buffers owned by the
//! controller: an `LVITEMW` descriptor, a text buffer and a `POINT`.
//! Those buffers are scratch space reused by every call, which is why
//! all operations take `&mut self`.

use std::rc::Rc;

use crate::buffer::{RemoteBuffer, RemoteString};
use crate::icon::{DesktopIconEntry, IconSnapshot};
use crate::memory::ProcessMemory;
use crate::wire::{
    LVM_GETITEMCOUNT, LVM_GETITEMPOSITION, LVM_GETITEMTEXTW, LVM_SETITEMPOSITION32, LvItem,
};
use crate::{IconError, IconResult, Point, log_debug, log_info, log_warn};

/// Capacity of the item text buffer in UTF-16 units (`MAX_PATH`).
pub const DEFAULT_TEXT_CAPACITY: usize = 260;

const CONTROLLER: &str = "list view controller";

/// A window that answers synchronous messages.
///
/// Implemented over `SendMessageW` on Windows; tests substitute a fake.
pub trait MessageTarget {
    /// Sends `message` and blocks until the window returns its result.
    fn send(&self, message: u32, wparam: usize, lparam: isize) -> isize;
}

/// Queries and moves desktop icons through the shell's list view.
///
/// Construction acquires the process capability and all three buffers;
/// [`close`](Self::close) releases them in reverse order. The controller
/// is neither `Send` nor `Sync`: one caller drives it at a time.
pub struct ListViewController<W: MessageTarget, P: ProcessMemory> {
    window: W,
    process: Rc<P>,
    item: RemoteBuffer<LvItem, P>,
    text: RemoteString<P>,
    point: RemoteBuffer<Point, P>,
    closed: bool,
}

impl<W: MessageTarget, P: ProcessMemory> ListViewController<W, P> {
    /// Takes ownership of `process` and allocates the parameter buffers.
    ///
    /// If any allocation fails, everything acquired so far (including
    /// `process`) is released before the error is returned.
    pub fn new(window: W, process: P, text_capacity: usize) -> IconResult<Self> {
        let process = Rc::new(process);

        let mut item = match RemoteBuffer::<LvItem, P>::allocate(&process) {
            Ok(buffer) => buffer,
            Err(e) => return Err(abandon(&process, e)),
        };
        let mut text = match RemoteString::allocate(&process, text_capacity) {
            Ok(buffer) => buffer,
            Err(e) => {
                let _ = item.release();
                return Err(abandon(&process, e));
            }
        };
        let point = match RemoteBuffer::<Point, P>::allocate(&process) {
            Ok(buffer) => buffer,
            Err(e) => {
                let _ = text.release();
                let _ = item.release();
                return Err(abandon(&process, e));
            }
        };

        log_info!(
            "list view controller ready (descriptor {} bytes, text {} units)",
            item.size(),
            text.capacity()
        );

        Ok(Self {
            window,
            process,
            item,
            text,
            point,
            closed: false,
        })
    }

    /// Number of items the control reports.
    pub fn item_count(&mut self) -> IconResult<usize> {
        self.ensure_open()?;
        let reply = self.window.send(LVM_GETITEMCOUNT, 0, 0);
        usize::try_from(reply).map_err(|_| IconError::ItemCountFailed { reply })
    }

    /// Label of the item at `index`.
    ///
    /// Desktop icons always carry a name, so a zero-length reply is
    /// treated as failure.
    pub fn item_text(&mut self, index: usize) -> IconResult<String> {
        self.ensure_open()?;
        let text_address = self.text.remote_address()?;
        let query = LvItem::text_query(
            i32::try_from(index).map_err(|_| IconError::ItemTextFailed { index })?,
            text_address,
            i32::try_from(self.text.capacity()).unwrap_or(i32::MAX),
        );
        self.item.write(&query)?;

        let descriptor = self.item.remote_address()?;
        let chars = self
            .window
            .send(LVM_GETITEMTEXTW, index, descriptor as isize);
        if chars == 0 {
            return Err(IconError::ItemTextFailed { index });
        }
        let Ok(length) = usize::try_from(chars) else {
            return Err(IconError::NegativeLength { length: chars });
        };
        let capacity = self.text.capacity();
        if length > capacity {
            return Err(IconError::LengthExceedsCapacity { length, capacity });
        }

        // The control may answer from its own storage and repoint pszText.
        let reply = self.item.read()?;
        if reply.text != 0 && reply.text != text_address {
            log_debug!("item {index}: text repointed to 0x{:X}", reply.text);
            return self.read_foreign_text(reply.text, length);
        }
        self.text.read(chars)
    }

    /// Reads `length` units (already bounded by the text capacity) from
    /// storage owned by the control.
    fn read_foreign_text(&self, address: usize, length: usize) -> IconResult<String> {
        let size = length
            .checked_mul(2)
            .ok_or(IconError::LengthExceedsCapacity {
                length,
                capacity: self.text.capacity(),
            })?;
        let mut bytes = vec![0u8; size];
        self.process.read(address, &mut bytes)?;
        Ok(crate::buffer::decode_utf16(&bytes))
    }

    /// Position of the item at `index`.
    pub fn item_position(&mut self, index: usize) -> IconResult<Point> {
        self.ensure_open()?;
        let out = self.point.remote_address()?;
        if self.window.send(LVM_GETITEMPOSITION, index, out as isize) == 0 {
            return Err(IconError::ItemPositionFailed { index });
        }
        self.point.read()
    }

    /// Moves the item at `index` to `position`.
    ///
    /// Failures to stage the coordinate are reported. The control's
    /// reply to `LVM_SETITEMPOSITION32` carries no meaning, so the move
    /// itself is not confirmed; read the position back to verify.
    pub fn set_item_position(&mut self, index: usize, position: Point) -> IconResult<()> {
        self.ensure_open()?;
        self.point.write(&position)?;
        let input = self.point.remote_address()?;
        self.window
            .send(LVM_SETITEMPOSITION32, index, input as isize);
        log_debug!("item {index} moved to {position}");
        Ok(())
    }

    /// Enumerates every icon in index order.
    ///
    /// The scan is not atomic: if the shell reorders or renames items
    /// mid-scan the snapshot mixes old and new state. Two items with the
    /// same name fail with `DuplicateNameConflict`.
    pub fn icons(&mut self) -> IconResult<IconSnapshot> {
        let count = self.item_count()?;
        let mut snapshot = IconSnapshot::with_capacity(count);

        for index in 0..count {
            let name = self.item_text(index)?;
            let position = self.item_position(index)?;
            snapshot.insert(DesktopIconEntry {
                name,
                index,
                position,
            })?;
        }

        log_debug!("snapshot of {} icons", snapshot.len());
        Ok(snapshot)
    }

    /// Releases the buffers and then the process handle.
    ///
    /// Every release is attempted; the first failure is returned. A
    /// second call fails with `AlreadyReleased`.
    pub fn close(&mut self) -> IconResult<()> {
        if self.closed {
            return Err(IconError::AlreadyReleased {
                resource: CONTROLLER,
            });
        }
        self.closed = true;

        let results = [
            self.point.release(),
            self.text.release(),
            self.item.release(),
            self.process.release(),
        ];
        let mut first_error = None;
        for result in results {
            if let Err(e) = result {
                log_warn!("release failed: {e}");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                log_info!("list view controller closed");
                Ok(())
            }
        }
    }

    fn ensure_open(&self) -> IconResult<()> {
        if self.closed {
            return Err(IconError::UseAfterRelease {
                resource: CONTROLLER,
            });
        }
        Ok(())
    }
}

impl<W: MessageTarget, P: ProcessMemory> Drop for ListViewController<W, P> {
    fn drop(&mut self) {
        if !self.closed {
            log_warn!("list view controller dropped without close");
            let _ = self.close();
        }
    }
}

/// Releases `process` after a failed construction and hands back `error`.
fn abandon<P: ProcessMemory>(process: &Rc<P>, error: IconError) -> IconError {
    log_warn!("list view controller construction failed: {error}");
    let _ = process.release();
    error
}
