//! In-memory stand-in for the desktop shell process.
//!
//! `FakeShell` simulates a foreign address space and a list-view control
//! that answers the four messages the controller uses, reading and
//! writing its parameter blocks through that simulated memory the same
//! way the real control does. Handles returned by [`FakeShell::process`]
//! and [`FakeShell::window`] share its state, so tests can inspect or
//! mutate the "desktop" between calls.

use std::cell::RefCell;
use std::rc::Rc;

use crate::listview::MessageTarget;
use crate::memory::{ProcessMemory, RemoteAddress};
use crate::wire::{
    LVM_GETITEMCOUNT, LVM_GETITEMPOSITION, LVM_GETITEMTEXTW, LVM_SETITEMPOSITION32, LvItem,
    PointerWidth, WireLayout,
};
use crate::{IconError, IconResult, Point};

const PAGE: usize = 0x1000;
const PROCESS: &str = "process handle";

struct Allocation {
    base: RemoteAddress,
    bytes: Vec<u8>,
    /// Storage owned by the shell itself, not by the caller.
    internal: bool,
}

struct ShellState {
    width: PointerWidth,
    allocations: Vec<Allocation>,
    allocation_sizes: Vec<usize>,
    next_address: RemoteAddress,
    allocation_budget: Option<usize>,
    released: bool,
    terminated: bool,
    repoint_text: bool,
    icons: Vec<(String, Point)>,
    messages: Vec<u32>,
    /// Replies that replace whatever the control computed.
    forced_replies: Vec<(u32, isize)>,
}

impl ShellState {
    fn find(&self, address: RemoteAddress, len: usize) -> Option<(usize, usize)> {
        self.allocations.iter().enumerate().find_map(|(slot, a)| {
            let offset = address.checked_sub(a.base)?;
            (offset + len <= a.bytes.len()).then_some((slot, offset))
        })
    }

    fn read_bytes(&self, address: RemoteAddress, len: usize) -> Option<Vec<u8>> {
        let (slot, offset) = self.find(address, len)?;
        Some(self.allocations[slot].bytes[offset..offset + len].to_vec())
    }

    fn write_bytes(&mut self, address: RemoteAddress, data: &[u8]) -> bool {
        match self.find(address, data.len()) {
            Some((slot, offset)) => {
                self.allocations[slot].bytes[offset..offset + data.len()].copy_from_slice(data);
                true
            }
            None => false,
        }
    }

    fn map(&mut self, size: usize, internal: bool) -> RemoteAddress {
        let base = self.next_address;
        self.next_address += size.max(1).next_multiple_of(PAGE);
        self.allocations.push(Allocation {
            base,
            bytes: vec![0; size],
            internal,
        });
        base
    }

    fn get_text(&mut self, index: usize, descriptor: RemoteAddress) -> isize {
        let size = LvItem::wire_size(self.width);
        let Some(bytes) = self.read_bytes(descriptor, size) else {
            return 0;
        };
        let mut item = LvItem::decode(self.width, &bytes);
        let Some((name, _)) = self.icons.get(index) else {
            return 0;
        };

        let max = usize::try_from(item.text_max).unwrap_or(0);
        let mut units: Vec<u16> = name.encode_utf16().take(max.saturating_sub(1)).collect();
        let written = units.len();
        units.push(0);
        let encoded: Vec<u8> = units.iter().flat_map(|u| u.to_le_bytes()).collect();

        if self.repoint_text {
            item.text = self.map(encoded.len(), true);
            let mut block = vec![0; size];
            item.encode(self.width, &mut block);
            self.write_bytes(descriptor, &block);
        }
        if !self.write_bytes(item.text, &encoded) {
            return 0;
        }
        written as isize
    }

    fn get_position(&mut self, index: usize, out: RemoteAddress) -> isize {
        let Some(&(_, position)) = self.icons.get(index) else {
            return 0;
        };
        let mut block = vec![0; Point::wire_size(self.width)];
        position.encode(self.width, &mut block);
        isize::from(self.write_bytes(out, &block))
    }

    fn set_position(&mut self, index: usize, input: RemoteAddress) -> isize {
        let Some(bytes) = self.read_bytes(input, Point::wire_size(self.width)) else {
            return 0;
        };
        let position = Point::decode(self.width, &bytes);
        match self.icons.get_mut(index) {
            Some(icon) => {
                icon.1 = position;
                1
            }
            None => 0,
        }
    }
}

/// Shared handle to a simulated shell.
#[derive(Clone)]
pub(crate) struct FakeShell {
    state: Rc<RefCell<ShellState>>,
}

impl FakeShell {
    pub(crate) fn new() -> Self {
        Self::with_width(PointerWidth::NATIVE)
    }

    pub(crate) fn with_width(width: PointerWidth) -> Self {
        Self {
            state: Rc::new(RefCell::new(ShellState {
                width,
                allocations: Vec::new(),
                allocation_sizes: Vec::new(),
                next_address: 0x7FF6_0000,
                allocation_budget: None,
                released: false,
                terminated: false,
                repoint_text: false,
                icons: Vec::new(),
                messages: Vec::new(),
                forced_replies: Vec::new(),
            })),
        }
    }

    /// A shell whose desktop shows `icons` in list order.
    pub(crate) fn with_icons(icons: &[(&str, (i32, i32))]) -> Self {
        let shell = Self::new();
        shell.set_icons(icons);
        shell
    }

    pub(crate) fn set_icons(&self, icons: &[(&str, (i32, i32))]) {
        self.state.borrow_mut().icons = icons
            .iter()
            .map(|&(name, xy)| (name.to_string(), Point::from(xy)))
            .collect();
    }

    pub(crate) fn process(&self) -> FakeProcess {
        FakeProcess {
            state: Rc::clone(&self.state),
        }
    }

    pub(crate) fn window(&self) -> FakeListView {
        FakeListView {
            state: Rc::clone(&self.state),
        }
    }

    /// Moves an icon behind the controller's back, as a user dragging it would.
    pub(crate) fn drag(&self, name: &str, to: (i32, i32)) {
        let mut state = self.state.borrow_mut();
        if let Some(icon) = state.icons.iter_mut().find(|(n, _)| n == name) {
            icon.1 = Point::from(to);
        }
    }

    pub(crate) fn position_of(&self, name: &str) -> Option<Point> {
        let state = self.state.borrow();
        state.icons.iter().find(|(n, _)| n == name).map(|&(_, p)| p)
    }

    pub(crate) fn peek(&self, address: RemoteAddress, len: usize) -> Vec<u8> {
        self.state
            .borrow()
            .read_bytes(address, len)
            .unwrap_or_default()
    }

    /// Sizes of every allocation requested by the caller, in order.
    pub(crate) fn allocation_sizes(&self) -> Vec<usize> {
        self.state.borrow().allocation_sizes.clone()
    }

    /// Caller-owned allocations that have not been freed.
    pub(crate) fn live_allocations(&self) -> usize {
        let state = self.state.borrow();
        state.allocations.iter().filter(|a| !a.internal).count()
    }

    pub(crate) fn is_released(&self) -> bool {
        self.state.borrow().released
    }

    pub(crate) fn messages(&self) -> Vec<u32> {
        self.state.borrow().messages.clone()
    }

    /// Lets `count` more allocations succeed, then refuses the rest.
    pub(crate) fn refuse_allocations_after(&self, count: usize) {
        self.state.borrow_mut().allocation_budget = Some(count);
    }

    /// Makes the control answer text queries from its own storage,
    /// rewriting `pszText` in the descriptor.
    pub(crate) fn repoint_text(&self) {
        self.state.borrow_mut().repoint_text = true;
    }

    /// Makes the control answer `message` with `reply` after doing its
    /// usual work, as a misbehaving shell would.
    pub(crate) fn force_reply(&self, message: u32, reply: isize) {
        self.state.borrow_mut().forced_replies.push((message, reply));
    }

    /// Simulates the shell process exiting.
    pub(crate) fn terminate(&self) {
        self.state.borrow_mut().terminated = true;
    }
}

pub(crate) struct FakeProcess {
    state: Rc<RefCell<ShellState>>,
}

impl FakeProcess {
    fn live(&self) -> IconResult<std::cell::RefMut<'_, ShellState>> {
        let state = self.state.borrow_mut();
        if state.released {
            return Err(IconError::UseAfterRelease { resource: PROCESS });
        }
        Ok(state)
    }
}

impl ProcessMemory for FakeProcess {
    fn pointer_width(&self) -> PointerWidth {
        self.state.borrow().width
    }

    fn allocate(&self, size: usize) -> IconResult<RemoteAddress> {
        let mut state = self.live()?;
        let refused = match state.allocation_budget.as_mut() {
            Some(0) => true,
            Some(left) => {
                *left -= 1;
                false
            }
            None => false,
        };
        if refused || state.terminated {
            return Err(IconError::RemoteAllocFailed {
                size,
                reason: "allocation refused".into(),
            });
        }
        state.allocation_sizes.push(size);
        Ok(state.map(size, false))
    }

    fn free(&self, address: RemoteAddress) -> IconResult<()> {
        let mut state = self.live()?;
        let slot = state
            .allocations
            .iter()
            .position(|a| a.base == address && !a.internal);
        match slot {
            Some(slot) if !state.terminated => {
                state.allocations.remove(slot);
                Ok(())
            }
            _ => Err(IconError::RemoteWriteFailed {
                address,
                reason: "free refused".into(),
            }),
        }
    }

    fn read(&self, address: RemoteAddress, buf: &mut [u8]) -> IconResult<()> {
        let state = self.live()?;
        let bytes = (!state.terminated)
            .then(|| state.read_bytes(address, buf.len()))
            .flatten()
            .ok_or_else(|| IconError::RemoteReadFailed {
                address,
                reason: "partial copy".into(),
            })?;
        buf.copy_from_slice(&bytes);
        Ok(())
    }

    fn write(&self, address: RemoteAddress, data: &[u8]) -> IconResult<()> {
        let mut state = self.live()?;
        if state.terminated || !state.write_bytes(address, data) {
            return Err(IconError::RemoteWriteFailed {
                address,
                reason: "partial copy".into(),
            });
        }
        Ok(())
    }

    fn release(&self) -> IconResult<()> {
        let mut state = self.state.borrow_mut();
        if state.released {
            return Err(IconError::AlreadyReleased { resource: PROCESS });
        }
        state.released = true;
        Ok(())
    }
}

pub(crate) struct FakeListView {
    state: Rc<RefCell<ShellState>>,
}

impl MessageTarget for FakeListView {
    fn send(&self, message: u32, wparam: usize, lparam: isize) -> isize {
        let mut state = self.state.borrow_mut();
        state.messages.push(message);
        if state.terminated {
            return 0;
        }
        let address = lparam as RemoteAddress;
        let reply = match message {
            LVM_GETITEMCOUNT => state.icons.len() as isize,
            LVM_GETITEMTEXTW => state.get_text(wparam, address),
            LVM_GETITEMPOSITION => state.get_position(wparam, address),
            LVM_SETITEMPOSITION32 => state.set_position(wparam, address),
            _ => 0,
        };
        state
            .forced_replies
            .iter()
            .find(|&&(forced, _)| forced == message)
            .map_or(reply, |&(_, forced)| forced)
    }
}
