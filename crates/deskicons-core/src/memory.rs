use crate::IconResult;
use crate::wire::PointerWidth;

/// Address of a region inside another process's address space.
///
/// Never dereferenced locally; it is only handed back to the
/// [`ProcessMemory`] that produced it or embedded in parameter blocks.
pub type RemoteAddress = usize;

/// Memory operations against a foreign process.
///
/// This is the capability a process handle grants. The Windows crate
/// implements it with `VirtualAllocEx` and friends; tests use an
/// in-memory fake. Methods take `&self` because every buffer created
/// under the handle shares it; implementations track their own
/// released state and fail with `UseAfterRelease` once closed.
pub trait ProcessMemory {
    /// Pointer width of the foreign process, used to lay out
    /// parameter blocks that embed addresses.
    fn pointer_width(&self) -> PointerWidth {
        PointerWidth::NATIVE
    }

    /// Commits a read/write region of `size` bytes.
    fn allocate(&self, size: usize) -> IconResult<RemoteAddress>;

    /// Frees a region returned by [`allocate`](Self::allocate).
    fn free(&self, address: RemoteAddress) -> IconResult<()>;

    /// Copies `buf.len()` bytes from `address`. A partial copy is an error.
    fn read(&self, address: RemoteAddress, buf: &mut [u8]) -> IconResult<()>;

    /// Copies all of `data` to `address`. A partial copy is an error.
    fn write(&self, address: RemoteAddress, data: &[u8]) -> IconResult<()>;

    /// Closes the handle. A second call fails with `AlreadyReleased`.
    fn release(&self) -> IconResult<()>;
}
