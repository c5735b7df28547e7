// wren/stack.rs
use super::errors::Fault;

pub const STACK_CAPACITY: usize = 32;

/// Bounded LIFO of return addresses used by CAL/RET.
#[derive(Debug, Default, Clone)]
pub struct CallStack {
    frames: Vec<u8>,
}

impl CallStack {
    pub fn push(&mut self, address: u8) -> Result<(), Fault> {
        if self.frames.len() >= STACK_CAPACITY {
            return Err(Fault::StackOverflow);
        }
        self.frames.push(address);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u8, Fault> {
        self.frames.pop().ok_or(Fault::StackUnderflow)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
