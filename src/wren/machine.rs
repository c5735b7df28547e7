// wren/machine.rs
use super::cell::Cell;
use super::errors::{Fault, RuntimeError};
use super::exec;
use super::instruction::Instruction;
use super::memory::Memory;
use super::registers::{Flags, RegisterFile};
use super::stack::CallStack;

/// The assembled computer: register file, flags, call stack, memory with its
/// peripheral window, program counter and the program itself. Driven one
/// [`cycle`](Machine::cycle) at a time by the caller until halted or until a
/// [`RuntimeError`] propagates out; after an error the machine stays
/// inspectable but must not be stepped again.
#[derive(Debug)]
pub struct Machine {
    pub(crate) program: Vec<Instruction>,
    pub(crate) pc: Cell,
    pub(crate) regs: RegisterFile,
    pub(crate) mem: Memory,
    pub(crate) stack: CallStack,
    pub(crate) flags: Flags,
    pub(crate) halted: bool,
}

impl Machine {
    pub fn new(program: Vec<Instruction>, mem: Memory) -> Self {
        Self {
            program,
            pc: Cell::default(),
            regs: RegisterFile::default(),
            mem,
            stack: CallStack::default(),
            flags: Flags::default(),
            halted: false,
        }
    }

    /// Execute one fetch-execute step: fault if the program counter is past
    /// the end of the program, otherwise run the current instruction and
    /// advance the counter (wrapping at 256).
    pub fn cycle(&mut self) -> Result<(), RuntimeError> {
        let pc = self.pc.unsigned();
        if pc as usize >= self.program.len() {
            return Err(RuntimeError {
                pc,
                fault: Fault::ProgramCounterOutOfRange { length: self.program.len() },
            });
        }

        let instruction = self.program[pc as usize];
        exec::step(self, instruction).map_err(|fault| RuntimeError { pc, fault })?;

        self.pc.set_unsigned(self.pc.unsigned() as i32 + 1);
        Ok(())
    }

    pub fn halt(&mut self) {
        self.halted = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn pc(&self) -> u8 {
        self.pc.unsigned()
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn register(&self, index: u8) -> u8 {
        self.regs.unsigned(index)
    }

    pub fn register_signed(&self, index: u8) -> i8 {
        self.regs.signed(index)
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn memory(&self) -> &Memory {
        &self.mem
    }

    pub fn program_len(&self) -> usize {
        self.program.len()
    }
}
