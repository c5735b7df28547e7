// wren/devices.rs
//
// Peripheral capabilities consumed by the memory-mapped I/O window. The core
// only ever calls these synchronously; rendering and timing belong to the
// implementations.

/// Buffered character sink.
pub trait Chars {
    /// Append a character code to the pending buffer.
    fn write(&mut self, code: u8);
    /// Commit the pending buffer to presentation.
    fn push(&mut self);
    /// Discard the pending buffer.
    fn clear(&mut self);
}

/// Single-value numeric display with a signed/unsigned mode.
pub trait NumberDisplay {
    fn show(&mut self, value: u8);
    fn clear(&mut self);
    fn signed_mode(&mut self);
    fn unsigned_mode(&mut self);
}

/// Double-buffered pixel screen with a drawing cursor.
pub trait Screen {
    fn set_x(&mut self, value: u8);
    fn set_y(&mut self, value: u8);
    fn get_x(&self) -> u8;
    fn get_y(&self) -> u8;
    fn load_pixel(&self) -> u8;
    fn draw_pixel(&mut self);
    fn clear_pixel(&mut self);
    fn clear(&mut self);
    /// Commit the draw buffer to presentation.
    fn push(&mut self);
}

/// Input controller. Reserved for port 255; no read path is wired yet.
pub trait Controller {}

/// The full capability set handed to [`Memory`](super::Memory).
pub struct Devices {
    pub chars: Box<dyn Chars>,
    pub number: Box<dyn NumberDisplay>,
    pub screen: Box<dyn Screen>,
    pub controller: Box<dyn Controller>,
}

impl Devices {
    pub fn new(
        chars: Box<dyn Chars>,
        number: Box<dyn NumberDisplay>,
        screen: Box<dyn Screen>,
        controller: Box<dyn Controller>,
    ) -> Self {
        Self { chars, number, screen, controller }
    }

    /// All-discarding capability set, for programs that never touch I/O.
    pub fn null() -> Self {
        Self::new(
            Box::new(NullChars),
            Box::new(NullNumberDisplay),
            Box::new(NullScreen),
            Box::new(NullController),
        )
    }
}

pub struct NullChars;

impl Chars for NullChars {
    fn write(&mut self, _code: u8) {}
    fn push(&mut self) {}
    fn clear(&mut self) {}
}

pub struct NullNumberDisplay;

impl NumberDisplay for NullNumberDisplay {
    fn show(&mut self, _value: u8) {}
    fn clear(&mut self) {}
    fn signed_mode(&mut self) {}
    fn unsigned_mode(&mut self) {}
}

pub struct NullScreen;

impl Screen for NullScreen {
    fn set_x(&mut self, _value: u8) {}
    fn set_y(&mut self, _value: u8) {}
    fn get_x(&self) -> u8 {
        0
    }
    fn get_y(&self) -> u8 {
        0
    }
    fn load_pixel(&self) -> u8 {
        0
    }
    fn draw_pixel(&mut self) {}
    fn clear_pixel(&mut self) {}
    fn clear(&mut self) {}
    fn push(&mut self) {}
}

pub struct NullController;

impl Controller for NullController {}
