pub mod cell;
pub mod devices;
pub mod errors;
pub mod exec;
pub mod instruction;
pub mod machine;
pub mod memory;
pub mod registers;
pub mod stack;

pub mod asm;

pub use cell::Cell;
pub use devices::{Chars, Controller, Devices, NumberDisplay, Screen};
pub use errors::{Fault, RuntimeError};
pub use instruction::{Condition, Instruction};
pub use machine::Machine;
pub use memory::Memory;
