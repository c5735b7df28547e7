// console.rs
//
// Terminal-backed peripheral implementations. Each one buffers writes and
// only presents on the explicit commit port, mirroring the double-buffered
// hardware they stand in for.

use crate::wren::devices::{Chars, Controller, NumberDisplay, Screen};

pub struct ConsoleChars {
    pending: String,
}

impl ConsoleChars {
    pub fn new() -> Self {
        Self { pending: String::new() }
    }
}

impl Chars for ConsoleChars {
    fn write(&mut self, code: u8) {
        self.pending.push(code as char);
    }

    fn push(&mut self) {
        println!("{}", self.pending);
    }

    fn clear(&mut self) {
        self.pending.clear();
    }
}

pub struct ConsoleNumberDisplay {
    signed: bool,
}

impl ConsoleNumberDisplay {
    pub fn new() -> Self {
        Self { signed: false }
    }
}

impl NumberDisplay for ConsoleNumberDisplay {
    fn show(&mut self, value: u8) {
        if self.signed {
            println!("{}", value as i8);
        } else {
            println!("{value}");
        }
    }

    fn clear(&mut self) {
        println!();
    }

    fn signed_mode(&mut self) {
        self.signed = true;
    }

    fn unsigned_mode(&mut self) {
        self.signed = false;
    }
}

pub const SCREEN_SIZE: usize = 32;

/// 32x32 monochrome screen rendered as text rows. The y cursor is flipped on
/// write so that y grows upward from the bottom edge, and both cursors mask
/// to the 5-bit screen range.
pub struct ConsoleScreen {
    x: u8,
    y: u8,
    buffer: [[bool; SCREEN_SIZE]; SCREEN_SIZE],
}

impl ConsoleScreen {
    pub fn new() -> Self {
        Self { x: 0, y: 0, buffer: [[false; SCREEN_SIZE]; SCREEN_SIZE] }
    }
}

impl Screen for ConsoleScreen {
    fn set_x(&mut self, value: u8) {
        self.x = value & 31;
    }

    fn set_y(&mut self, value: u8) {
        self.y = 31 - (value & 31);
    }

    fn get_x(&self) -> u8 {
        self.x
    }

    fn get_y(&self) -> u8 {
        self.y
    }

    fn load_pixel(&self) -> u8 {
        self.buffer[self.y as usize][self.x as usize] as u8
    }

    fn draw_pixel(&mut self) {
        self.buffer[self.y as usize][self.x as usize] = true;
    }

    fn clear_pixel(&mut self) {
        self.buffer[self.y as usize][self.x as usize] = false;
    }

    fn clear(&mut self) {
        self.buffer = [[false; SCREEN_SIZE]; SCREEN_SIZE];
    }

    fn push(&mut self) {
        for row in &self.buffer {
            let line: String = row.iter().map(|&on| if on { '#' } else { '.' }).collect();
            println!("{line}");
        }
    }
}

pub struct ConsoleController;

impl Controller for ConsoleController {}
