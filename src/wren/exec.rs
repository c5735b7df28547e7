// wren/exec.rs
use super::cell::{add_with_carry, sub_with_carry, to_unsigned};
use super::errors::Fault;
use super::instruction::{Condition, Instruction};
use super::machine::Machine;

/// Execute one instruction against the machine state. Control-flow
/// instructions set the pc one below their target because the machine
/// increments the pc after every step.
pub(crate) fn step(m: &mut Machine, instruction: Instruction) -> Result<(), Fault> {
    match instruction {
        Instruction::Ldi { dst, imm } => {
            if imm < 0 {
                m.regs.set_signed(dst, imm as i32);
            } else {
                m.regs.set_unsigned(dst, imm as i32);
            }
        }

        Instruction::Adi { dst, imm } => {
            let (result, carry) = add_with_carry(m.regs.unsigned(dst), to_unsigned(imm as i32));
            m.flags.carry = carry;
            m.flags.zero = result == 0;
            m.regs.set_unsigned(dst, result as i32);
        }
        Instruction::Add { a, b, dst } => {
            let (result, carry) = add_with_carry(m.regs.unsigned(a), m.regs.unsigned(b));
            m.flags.carry = carry;
            m.flags.zero = result == 0;
            m.regs.set_unsigned(dst, result as i32);
        }
        Instruction::Sub { a, b, dst } => {
            let (result, carry) = sub_with_carry(m.regs.unsigned(a), m.regs.unsigned(b));
            m.flags.carry = carry;
            m.flags.zero = result == 0;
            m.regs.set_unsigned(dst, result as i32);
        }
        Instruction::And { a, b, dst } => {
            let result = m.regs.unsigned(a) & m.regs.unsigned(b);
            m.flags.zero = result == 0;
            m.regs.set_unsigned(dst, result as i32);
        }
        Instruction::Nor { a, b, dst } => {
            let result = !(m.regs.unsigned(a) | m.regs.unsigned(b));
            m.flags.carry = false;
            m.flags.zero = result == 0;
            m.regs.set_unsigned(dst, result as i32);
        }
        Instruction::Xor { a, b, dst } => {
            let result = m.regs.unsigned(a) ^ m.regs.unsigned(b);
            m.flags.zero = result == 0;
            m.regs.set_unsigned(dst, result as i32);
        }
        Instruction::Rsh { src, dst } => {
            m.regs.set_unsigned(dst, (m.regs.unsigned(src) >> 1) as i32);
        }

        Instruction::Lod { addr, dst, offset } => {
            let address = m.regs.unsigned(addr).wrapping_add(offset as u8);
            let value = m.mem.read_unsigned(address)?;
            m.regs.set_unsigned(dst, value as i32);
        }
        Instruction::Str { addr, src, offset } => {
            let address = m.regs.unsigned(addr).wrapping_add(offset as u8);
            m.mem.write_unsigned(address, m.regs.unsigned(src))?;
        }

        Instruction::Cal { addr } => {
            m.stack.push(m.pc.unsigned())?;
            m.pc.set_unsigned(addr as i32 - 1);
        }
        Instruction::Ret => {
            let target = m.stack.pop()?;
            m.pc.set_unsigned(target as i32);
        }
        Instruction::Jmp { addr } => {
            m.pc.set_unsigned(addr as i32 - 1);
        }
        Instruction::Brh { cond, addr } => {
            let taken = match cond {
                Condition::Zero => m.flags.zero,
                Condition::NotZero => !m.flags.zero,
                Condition::Carry => m.flags.carry,
                Condition::NotCarry => !m.flags.carry,
            };
            if taken {
                m.pc.set_unsigned(addr as i32 - 1);
            }
        }

        Instruction::Hlt => m.halted = true,
        Instruction::Nop => {}
    }

    Ok(())
}
