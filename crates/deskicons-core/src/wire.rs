//! Binary parameter blocks exchanged with the list-view control.
//!
//! The control reads and writes these blocks inside its own process, so
//! they must match the Win32 ABI byte for byte: little-endian fields,
//! natural alignment, and pointers as wide as the *target* process's
//! pointers. Each structure encodes its fields by hand; the layouts are
//! pinned by golden-byte tests.

use crate::Point;

/// First list-view message (`LVM_FIRST`).
pub const LVM_FIRST: u32 = 0x1000;
/// Returns the number of items. No parameter block.
pub const LVM_GETITEMCOUNT: u32 = LVM_FIRST + 4;
/// Writes an item's position into a `POINT` block.
pub const LVM_GETITEMPOSITION: u32 = LVM_FIRST + 16;
/// Moves an item to the position held in a `POINT` block.
pub const LVM_SETITEMPOSITION32: u32 = LVM_FIRST + 49;
/// Copies an item's text into the buffer named by an `LVITEMW` block.
pub const LVM_GETITEMTEXTW: u32 = LVM_FIRST + 115;

/// `LVITEMW.mask` bit requesting the item text.
pub const LVIF_TEXT: u32 = 0x0001;

/// Pointer size of the process that will interpret a parameter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerWidth {
    Bits32,
    Bits64,
}

impl PointerWidth {
    /// Pointer width of the current process.
    pub const NATIVE: Self = if cfg!(target_pointer_width = "64") {
        Self::Bits64
    } else {
        Self::Bits32
    };

    /// Size of a pointer in bytes.
    pub fn bytes(self) -> usize {
        match self {
            Self::Bits32 => 4,
            Self::Bits64 => 8,
        }
    }
}

/// A value with a fixed, ABI-compatible binary representation.
pub trait WireLayout: Sized {
    /// Encoded size in bytes, including trailing padding.
    fn wire_size(width: PointerWidth) -> usize;

    /// Encodes `self` into `out`, which is exactly `wire_size` bytes.
    /// Padding bytes are zeroed.
    fn encode(&self, width: PointerWidth, out: &mut [u8]);

    /// Decodes a value from `bytes`, which is exactly `wire_size` bytes.
    fn decode(width: PointerWidth, bytes: &[u8]) -> Self;
}

/// `LVITEMW`, the list-view item descriptor.
///
/// Only `mask`, `item`, `text` and `text_max` matter for a text query;
/// everything else stays zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LvItem {
    pub mask: u32,
    pub item: i32,
    pub sub_item: i32,
    pub state: u32,
    pub state_mask: u32,
    /// `pszText`: address of the text buffer in the control's process.
    pub text: usize,
    /// `cchTextMax`: capacity of `text` in UTF-16 units.
    pub text_max: i32,
    pub image: i32,
    pub param: usize,
    pub indent: i32,
    pub group_id: i32,
    pub columns: u32,
    pub column_list: usize,
    pub column_formats: usize,
    pub group: i32,
}

impl LvItem {
    /// Builds a descriptor asking for the text of item `index`.
    pub fn text_query(index: i32, text: usize, text_max: i32) -> Self {
        Self {
            mask: LVIF_TEXT,
            item: index,
            text,
            text_max,
            ..Default::default()
        }
    }
}

impl WireLayout for LvItem {
    fn wire_size(width: PointerWidth) -> usize {
        match width {
            PointerWidth::Bits32 => 60,
            PointerWidth::Bits64 => 88,
        }
    }

    fn encode(&self, width: PointerWidth, out: &mut [u8]) {
        let mut enc = Encoder::new(out, width);
        enc.u32(self.mask);
        enc.i32(self.item);
        enc.i32(self.sub_item);
        enc.u32(self.state);
        enc.u32(self.state_mask);
        enc.ptr(self.text);
        enc.i32(self.text_max);
        enc.i32(self.image);
        enc.ptr(self.param);
        enc.i32(self.indent);
        enc.i32(self.group_id);
        enc.u32(self.columns);
        enc.ptr(self.column_list);
        enc.ptr(self.column_formats);
        enc.i32(self.group);
    }

    fn decode(width: PointerWidth, bytes: &[u8]) -> Self {
        let mut dec = Decoder::new(bytes, width);
        Self {
            mask: dec.u32(),
            item: dec.i32(),
            sub_item: dec.i32(),
            state: dec.u32(),
            state_mask: dec.u32(),
            text: dec.ptr(),
            text_max: dec.i32(),
            image: dec.i32(),
            param: dec.ptr(),
            indent: dec.i32(),
            group_id: dec.i32(),
            columns: dec.u32(),
            column_list: dec.ptr(),
            column_formats: dec.ptr(),
            group: dec.i32(),
        }
    }
}

/// `POINT`: two `i32`s, no padding, independent of pointer width.
impl WireLayout for Point {
    fn wire_size(_width: PointerWidth) -> usize {
        8
    }

    fn encode(&self, width: PointerWidth, out: &mut [u8]) {
        let mut enc = Encoder::new(out, width);
        enc.i32(self.x);
        enc.i32(self.y);
    }

    fn decode(width: PointerWidth, bytes: &[u8]) -> Self {
        let mut dec = Decoder::new(bytes, width);
        Point {
            x: dec.i32(),
            y: dec.i32(),
        }
    }
}

/// Sequential little-endian writer with natural field alignment.
struct Encoder<'a> {
    out: &'a mut [u8],
    pos: usize,
    width: PointerWidth,
}

impl<'a> Encoder<'a> {
    fn new(out: &'a mut [u8], width: PointerWidth) -> Self {
        out.fill(0);
        Self { out, pos: 0, width }
    }

    fn u32(&mut self, value: u32) {
        self.put(4, &value.to_le_bytes());
    }

    fn i32(&mut self, value: i32) {
        self.put(4, &value.to_le_bytes());
    }

    fn ptr(&mut self, value: usize) {
        match self.width {
            PointerWidth::Bits32 => self.put(4, &(value as u32).to_le_bytes()),
            PointerWidth::Bits64 => self.put(8, &(value as u64).to_le_bytes()),
        }
    }

    fn put(&mut self, align: usize, bytes: &[u8]) {
        self.pos = self.pos.next_multiple_of(align);
        if let Some(dst) = self.out.get_mut(self.pos..self.pos + bytes.len()) {
            dst.copy_from_slice(bytes);
        }
        self.pos += bytes.len();
    }
}

/// Reading counterpart of [`Encoder`]. Missing bytes decode as zero.
struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
    width: PointerWidth,
}

impl<'a> Decoder<'a> {
    fn new(bytes: &'a [u8], width: PointerWidth) -> Self {
        Self {
            bytes,
            pos: 0,
            width,
        }
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take::<4>())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take::<4>())
    }

    fn ptr(&mut self) -> usize {
        match self.width {
            PointerWidth::Bits32 => u32::from_le_bytes(self.take::<4>()) as usize,
            PointerWidth::Bits64 => u64::from_le_bytes(self.take::<8>()) as usize,
        }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        self.pos = self.pos.next_multiple_of(N);
        let mut out = [0u8; N];
        if let Some(src) = self.bytes.get(self.pos..self.pos + N) {
            out.copy_from_slice(src);
        }
        self.pos += N;
        out
    }
}
