//! Typed scratch buffers living inside the foreign process.
//!
//! Each buffer owns one remote region and a local staging region of the
//! same size. Values are assembled in staging, then copied across in one
//! call (and the reverse for reads). Buffers are reused for every call a
//! controller makes, so they take `&mut self` and are never shared.

use std::marker::PhantomData;
use std::rc::Rc;

use crate::memory::{ProcessMemory, RemoteAddress};
use crate::wire::WireLayout;
use crate::{IconError, IconResult};

const BUFFER: &str = "remote buffer";
const STRING: &str = "remote string";

/// Untyped remote region plus its staging copy.
struct RemoteRegion<P: ProcessMemory> {
    process: Rc<P>,
    /// `None` once released.
    remote: Option<RemoteAddress>,
    staging: Vec<u8>,
    resource: &'static str,
}

impl<P: ProcessMemory> RemoteRegion<P> {
    fn allocate(process: &Rc<P>, size: usize, resource: &'static str) -> IconResult<Self> {
        let remote = process.allocate(size)?;
        Ok(Self {
            process: Rc::clone(process),
            remote: Some(remote),
            staging: vec![0; size],
            resource,
        })
    }

    fn address(&self) -> IconResult<RemoteAddress> {
        self.remote.ok_or(IconError::UseAfterRelease {
            resource: self.resource,
        })
    }

    /// Copies the first `len` staged bytes to the remote region.
    fn push(&self, len: usize) -> IconResult<()> {
        let address = self.address()?;
        self.process.write(address, &self.staging[..len])
    }

    /// Copies `len` bytes from the remote region into staging.
    fn pull(&mut self, len: usize) -> IconResult<()> {
        let address = self.address()?;
        self.process.read(address, &mut self.staging[..len])
    }

    fn release(&mut self) -> IconResult<()> {
        let Some(address) = self.remote.take() else {
            return Err(IconError::AlreadyReleased {
                resource: self.resource,
            });
        };
        self.staging = Vec::new();
        self.process.free(address)
    }
}

impl<P: ProcessMemory> Drop for RemoteRegion<P> {
    fn drop(&mut self) {
        if let Some(address) = self.remote.take() {
            crate::log_warn!(
                "{} at 0x{address:X} dropped without release; freeing",
                self.resource
            );
            let _ = self.process.free(address);
        }
    }
}

/// A remote buffer holding exactly one `T` in its wire layout.
pub struct RemoteBuffer<T: WireLayout, P: ProcessMemory> {
    region: RemoteRegion<P>,
    _value: PhantomData<T>,
}

impl<T: WireLayout, P: ProcessMemory> RemoteBuffer<T, P> {
    /// Allocates a region sized to `T`'s wire layout for the
    /// process's pointer width.
    pub fn allocate(process: &Rc<P>) -> IconResult<Self> {
        let size = T::wire_size(process.pointer_width());
        Ok(Self {
            region: RemoteRegion::allocate(process, size, BUFFER)?,
            _value: PhantomData,
        })
    }

    /// Address of the remote region, for use as a message parameter.
    pub fn remote_address(&self) -> IconResult<RemoteAddress> {
        self.region.address()
    }

    /// Size of both the remote and the staging region in bytes.
    pub fn size(&self) -> usize {
        T::wire_size(self.region.process.pointer_width())
    }

    /// Encodes `value` into staging and copies it to the remote region.
    pub fn write(&mut self, value: &T) -> IconResult<()> {
        self.region.address()?;
        let width = self.region.process.pointer_width();
        value.encode(width, &mut self.region.staging);
        self.region.push(self.region.staging.len())
    }

    /// Copies the remote region into staging and decodes it.
    pub fn read(&mut self) -> IconResult<T> {
        let len = self.region.staging.len();
        self.region.pull(len)?;
        Ok(T::decode(
            self.region.process.pointer_width(),
            &self.region.staging,
        ))
    }

    /// Frees both regions. A second call fails with `AlreadyReleased`.
    pub fn release(&mut self) -> IconResult<()> {
        self.region.release()
    }
}

/// A remote UTF-16 text buffer with a fixed capacity in code units.
pub struct RemoteString<P: ProcessMemory> {
    region: RemoteRegion<P>,
    capacity: usize,
}

impl<P: ProcessMemory> RemoteString<P> {
    /// Allocates room for `capacity` UTF-16 units, terminator included.
    pub fn allocate(process: &Rc<P>, capacity: usize) -> IconResult<Self> {
        Ok(Self {
            region: RemoteRegion::allocate(process, capacity * 2, STRING)?,
            capacity,
        })
    }

    pub fn remote_address(&self) -> IconResult<RemoteAddress> {
        self.region.address()
    }

    /// Capacity in UTF-16 units, terminator included.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Writes `text` plus a NUL terminator.
    ///
    /// Text that does not fit is rejected before anything is copied.
    pub fn write(&mut self, text: &str) -> IconResult<()> {
        self.region.address()?;
        let units: Vec<u16> = text.encode_utf16().collect();
        if units.len() + 1 > self.capacity {
            return Err(IconError::TextTooLarge {
                units: units.len(),
                capacity: self.capacity,
            });
        }

        let staging = &mut self.region.staging;
        for (slot, unit) in staging.chunks_exact_mut(2).zip(units.iter().chain([&0])) {
            slot.copy_from_slice(&unit.to_le_bytes());
        }
        self.region.push((units.len() + 1) * 2)
    }

    /// Reads exactly `length` units, as reported by the control.
    ///
    /// A zero length returns empty text without a remote copy.
    pub fn read(&mut self, length: isize) -> IconResult<String> {
        self.region.address()?;
        let Ok(length) = usize::try_from(length) else {
            return Err(IconError::NegativeLength { length });
        };
        if length == 0 {
            return Ok(String::new());
        }
        if length > self.capacity {
            return Err(IconError::LengthExceedsCapacity {
                length,
                capacity: self.capacity,
            });
        }

        self.region.pull(length * 2)?;
        Ok(decode_utf16(&self.region.staging[..length * 2]))
    }

    /// Reads the whole buffer and decodes up to the first NUL.
    pub fn read_to_terminator(&mut self) -> IconResult<String> {
        let len = self.region.staging.len();
        self.region.pull(len)?;
        let units: Vec<u16> = utf16_units(&self.region.staging)
            .take_while(|&unit| unit != 0)
            .collect();
        Ok(String::from_utf16_lossy(&units))
    }

    pub fn release(&mut self) -> IconResult<()> {
        self.region.release()
    }
}

fn utf16_units(bytes: &[u8]) -> impl Iterator<Item = u16> + '_ {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
}

/// Decodes little-endian UTF-16 bytes, replacing unpaired surrogates.
pub(crate) fn decode_utf16(bytes: &[u8]) -> String {
    let units: Vec<u16> = utf16_units(bytes).collect();
    String::from_utf16_lossy(&units)
}
