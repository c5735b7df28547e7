// wren/cell.rs

/// Reduce any integer into the unsigned 8-bit range (value mod 256).
#[inline]
pub fn to_unsigned(value: i32) -> u8 {
    (value & 0xFF) as u8
}

/// Reduce any integer into the signed 8-bit range (-128..127), keeping the
/// same underlying bit pattern as [`to_unsigned`].
#[inline]
pub fn to_signed(value: i32) -> i8 {
    to_unsigned(value) as i8
}

/// 8-bit addition; carry is set when the raw sum exceeds 255.
#[inline]
pub fn add_with_carry(left: u8, right: u8) -> (u8, bool) {
    let sum = left as u16 + right as u16;
    ((sum & 0xFF) as u8, sum > 0xFF)
}

/// Two's-complement subtraction via `left + !right + 1`; carry reflects the
/// no-borrow case (true iff left >= right).
#[inline]
pub fn sub_with_carry(left: u8, right: u8) -> (u8, bool) {
    let sum = left as u16 + (!right) as u16 + 1;
    ((sum & 0xFF) as u8, sum > 0xFF)
}

/// One 8-bit storage unit with signed and unsigned projections over the same
/// bit pattern.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cell(u8);

impl Cell {
    pub fn new(value: u8) -> Self {
        Cell(value)
    }

    #[inline]
    pub fn unsigned(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn signed(self) -> i8 {
        self.0 as i8
    }

    #[inline]
    pub fn set_unsigned(&mut self, value: i32) {
        self.0 = to_unsigned(value);
    }

    #[inline]
    pub fn set_signed(&mut self, value: i32) {
        self.0 = to_signed(value) as u8;
    }
}
