// wren/instruction.rs

/// Branch predicates. The assembler accepts two mnemonics per variant
/// (Z/EQ, NZ/NE, C/GE, NC/LT); they share behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Zero,
    NotZero,
    Carry,
    NotCarry,
}

/// The closed instruction set. Every variant carries its operands fully
/// resolved at assembly time: register slots as indices into the register
/// file, addresses and immediates as plain numbers. Sugar mnemonics
/// (INC/DEC, CMP, NOT, LSH, MOV) lower to these canonical forms during
/// assembly and never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Ldi { dst: u8, imm: i16 },
    Adi { dst: u8, imm: i16 },

    Add { a: u8, b: u8, dst: u8 },
    Sub { a: u8, b: u8, dst: u8 },
    And { a: u8, b: u8, dst: u8 },
    Nor { a: u8, b: u8, dst: u8 },
    Xor { a: u8, b: u8, dst: u8 },
    Rsh { src: u8, dst: u8 },

    Lod { addr: u8, dst: u8, offset: i8 },
    Str { addr: u8, src: u8, offset: i8 },

    Cal { addr: u8 },
    Ret,
    Jmp { addr: u8 },
    Brh { cond: Condition, addr: u8 },

    Hlt,
    Nop,
}
