use thiserror::Error;

/// Fatal conditions raised while executing a single instruction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// CAL with the call stack already at capacity.
    #[error("stack overflow")]
    StackOverflow,

    /// RET with an empty call stack.
    #[error("stack underflow")]
    StackUnderflow,

    /// Fetch with the program counter past the end of the program.
    #[error("program counter is outside of the program (length {length})")]
    ProgramCounterOutOfRange { length: usize },

    /// Read from a port address with no read mapping.
    #[error("read from unmapped port {address}")]
    UnmappedRead { address: u8 },

    /// Write to a port address with no write mapping.
    #[error("write to unmapped port {address}")]
    UnmappedWrite { address: u8 },
}

/// A [`Fault`] annotated with the program counter of the failing
/// instruction. Execution must not be resumed after one of these.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("pc {pc}: {fault}")]
pub struct RuntimeError {
    pub pc: u8,
    pub fault: Fault,
}
