// wren/asm/mod.rs
//
// Two-pass assembler. Pass 1 walks the preprocessed lines collecting the
// label and define tables while counting instruction-emitting lines, so
// labels may be referenced before they are defined. Pass 2 re-walks the
// queued lines and constructs every instruction with the completed tables.

pub mod errors;
mod operand;
#[cfg(test)]
mod tests;

pub use errors::{AsmError, AsmErrorKind};

use std::collections::HashMap;

use operand::Args;

use super::devices::{Chars, Controller, Devices, NumberDisplay, Screen};
use super::instruction::Instruction;
use super::machine::Machine;
use super::memory::Memory;

/// Assemble `source` into a ready-to-step [`Machine`] bound to the given
/// peripheral capabilities.
pub fn assemble(
    source: &str,
    chars: Box<dyn Chars>,
    number: Box<dyn NumberDisplay>,
    screen: Box<dyn Screen>,
    controller: Box<dyn Controller>,
) -> Result<Machine, AsmError> {
    let lines = preprocess(source);

    let mut defines = builtin_defines();
    let mut labels = HashMap::<String, usize>::new();
    let mut queued = Vec::<(usize, &str)>::new();

    // pass 1: tables and addressing
    for &(line_no, line) in &lines {
        if line.starts_with('.') {
            if labels.contains_key(line) {
                return Err(AsmError {
                    line: line_no,
                    kind: AsmErrorKind::DuplicateLabel(line.to_string()),
                });
            }
            labels.insert(line.to_string(), queued.len());
        } else if is_define_line(line) {
            let (name, value) = parse_define(line).map_err(|kind| AsmError { line: line_no, kind })?;
            if defines.contains_key(name) {
                return Err(AsmError {
                    line: line_no,
                    kind: AsmErrorKind::DuplicateDefine(name.to_string()),
                });
            }
            defines.insert(name.to_string(), value.to_string());
        } else {
            queued.push((line_no, line));
        }
    }

    // pass 2: construction, with every label known
    let mut program = Vec::with_capacity(queued.len());
    for (line_no, line) in queued {
        let instruction = assemble_line(line, &defines, &labels)
            .map_err(|kind| AsmError { line: line_no, kind })?;
        program.push(instruction);
    }

    let mem = Memory::new(Devices::new(chars, number, screen, controller));
    Ok(Machine::new(program, mem))
}

/// Strip `//` comments, trim, drop empty lines; keep 1-based line numbers
/// for diagnostics.
fn preprocess(source: &str) -> Vec<(usize, &str)> {
    source
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.split("//").next().unwrap_or(l).trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect()
}

fn is_define_line(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|tok| tok.eq_ignore_ascii_case("define"))
}

fn parse_define(line: &str) -> Result<(&str, &str), AsmErrorKind> {
    let mut parts = line.split_whitespace();
    parts.next(); // the keyword
    let name = parts.next().ok_or(AsmErrorKind::MissingArgument("define name"))?;
    let value = parts.next().ok_or(AsmErrorKind::MissingArgument("define value"))?;
    if let Some(extra) = parts.next() {
        return Err(AsmErrorKind::TooManyArguments(extra.to_string()));
    }
    Ok((name, value))
}

/// The I/O port names every program can use without declaring them.
fn builtin_defines() -> HashMap<String, String> {
    [
        ("pixel_x", "240"),
        ("pixel_y", "241"),
        ("draw_pixel", "242"),
        ("clear_pixel", "243"),
        ("load_pixel", "244"),
        ("buffer_screen", "245"),
        ("clear_screen_buffer", "246"),
        ("write_char", "247"),
        ("buffer_chars", "248"),
        ("clear_chars_buffer", "249"),
        ("show_number", "250"),
        ("clear_number", "251"),
        ("signed_mode", "252"),
        ("unsigned_mode", "253"),
        ("rng", "254"),
        ("controller_input", "255"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Fold a LOD/STR offset into the signed 4-bit range -8..7.
fn fold_offset(value: i32) -> i8 {
    let masked = value & 0xF;
    if masked >= 8 { (masked - 16) as i8 } else { masked as i8 }
}

fn assemble_line(
    line: &str,
    defines: &HashMap<String, String>,
    labels: &HashMap<String, usize>,
) -> Result<Instruction, AsmErrorKind> {
    let mut tokens = line.split_whitespace();
    let opcode = tokens.next().unwrap_or_default();
    let mut args = Args::new(tokens.collect(), defines, labels);

    let instruction = match opcode.to_ascii_uppercase().as_str() {
        "LDI" => Instruction::Ldi {
            dst: args.register("destination")?,
            imm: args.int("value")? as i16,
        },
        "ADI" => Instruction::Adi {
            dst: args.register("destination")?,
            imm: args.int("immediate")? as i16,
        },
        "INC" => Instruction::Adi { dst: args.register("destination")?, imm: 1 },
        "DEC" => Instruction::Adi { dst: args.register("destination")?, imm: -1 },

        "ADD" => Instruction::Add {
            a: args.register("left")?,
            b: args.register("right")?,
            dst: args.register("destination")?,
        },
        "SUB" => Instruction::Sub {
            a: args.register("left")?,
            b: args.register("right")?,
            dst: args.register("destination")?,
        },
        "CMP" => Instruction::Sub {
            a: args.register("left")?,
            b: args.register("right")?,
            dst: 0,
        },
        "AND" => Instruction::And {
            a: args.register("left")?,
            b: args.register("right")?,
            dst: args.register("destination")?,
        },
        "NOR" => Instruction::Nor {
            a: args.register("left")?,
            b: args.register("right")?,
            dst: args.register("destination")?,
        },
        "NOT" => Instruction::Nor {
            a: args.register("source")?,
            b: 0,
            dst: args.register("destination")?,
        },
        "XOR" => Instruction::Xor {
            a: args.register("left")?,
            b: args.register("right")?,
            dst: args.register("destination")?,
        },
        "RSH" => Instruction::Rsh {
            src: args.register("source")?,
            dst: args.register("destination")?,
        },
        "LSH" => {
            let src = args.register("source")?;
            Instruction::Add { a: src, b: src, dst: args.register("destination")? }
        }
        "MOV" => Instruction::Add {
            a: args.register("source")?,
            b: 0,
            dst: args.register("destination")?,
        },

        "LOD" => Instruction::Lod {
            addr: args.register("source address")?,
            dst: args.register("destination")?,
            offset: fold_offset(args.opt_signed("address offset")?.unwrap_or(0)),
        },
        "STR" => Instruction::Str {
            addr: args.register("destination address")?,
            src: args.register("source")?,
            offset: fold_offset(args.opt_signed("address offset")?.unwrap_or(0)),
        },

        "CAL" => Instruction::Cal { addr: args.unsigned("function address")? },
        "RET" => Instruction::Ret,
        "JMP" => Instruction::Jmp { addr: args.unsigned("label address")? },
        "BRH" => Instruction::Brh {
            cond: args.condition("branch")?,
            addr: args.unsigned("label address")?,
        },

        "HLT" => Instruction::Hlt,
        "NOP" => Instruction::Nop,

        _ => return Err(AsmErrorKind::UnknownOpcode(opcode.to_string())),
    };

    args.finish()?;
    Ok(instruction)
}
