// wren/registers.rs
use super::cell::Cell;

pub const REGISTER_COUNT: usize = 16;

/// The machine's register file. Slot 0 is hardwired to zero: it reads 0 in
/// both projections and discards writes.
#[derive(Debug, Default, Clone)]
pub struct RegisterFile {
    cells: [Cell; REGISTER_COUNT],
}

impl RegisterFile {
    #[inline]
    pub fn unsigned(&self, r: u8) -> u8 {
        if r == 0 { 0 } else { self.cells[r as usize].unsigned() }
    }

    #[inline]
    pub fn signed(&self, r: u8) -> i8 {
        if r == 0 { 0 } else { self.cells[r as usize].signed() }
    }

    #[inline]
    pub fn set_unsigned(&mut self, r: u8, value: i32) {
        if r != 0 {
            self.cells[r as usize].set_unsigned(value);
        }
    }

    #[inline]
    pub fn set_signed(&mut self, r: u8, value: i32) {
        if r != 0 {
            self.cells[r as usize].set_signed(value);
        }
    }
}

/// Carry and zero flags, mutated only by the arithmetic/logic instructions
/// that define them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub carry: bool,
    pub zero: bool,
}
