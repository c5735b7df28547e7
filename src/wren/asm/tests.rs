use std::cell::RefCell;
use std::rc::Rc;

use super::{assemble, AsmError, AsmErrorKind};
use crate::wren::devices::{Chars, NullChars, NullController, NullNumberDisplay, NullScreen};
use crate::wren::instruction::{Condition, Instruction};
use crate::wren::machine::Machine;

fn asm(source: &str) -> Result<Machine, AsmError> {
    assemble(
        source,
        Box::new(NullChars),
        Box::new(NullNumberDisplay),
        Box::new(NullScreen),
        Box::new(NullController),
    )
}

fn program(source: &str) -> Vec<Instruction> {
    asm(source).unwrap().program
}

fn kind(source: &str) -> AsmErrorKind {
    asm(source).unwrap_err().kind
}

#[derive(Default)]
struct CharLog {
    written: Vec<u8>,
    pushed: usize,
}

struct SharedChars(Rc<RefCell<CharLog>>);

impl Chars for SharedChars {
    fn write(&mut self, code: u8) {
        self.0.borrow_mut().written.push(code);
    }
    fn push(&mut self) {
        self.0.borrow_mut().pushed += 1;
    }
    fn clear(&mut self) {
        self.0.borrow_mut().written.clear();
    }
}

#[test]
fn add_program_assembles_and_runs() {
    let mut m = asm(
        "ldi r1 5\n\
         ldi r2 3\n\
         add r1 r2 r3\n\
         hlt",
    )
    .unwrap();

    let mut cycles = 0;
    while !m.is_halted() {
        m.cycle().unwrap();
        cycles += 1;
    }

    assert_eq!(cycles, 4);
    assert_eq!(m.register(3), 8);
}

#[test]
fn comments_and_blank_lines_do_not_count_as_instructions() {
    let p = program(
        "// leading comment\n\
         \n\
         nop // trailing comment\n\
         \n\
         hlt",
    );
    assert_eq!(p, vec![Instruction::Nop, Instruction::Hlt]);
}

#[test]
fn labels_resolve_forward_references() {
    // the branch target is only defined later in the source
    let p = program(
        "brh z .end\n\
         nop\n\
         .end\n\
         hlt",
    );
    assert_eq!(p[0], Instruction::Brh { cond: Condition::Zero, addr: 2 });
}

#[test]
fn label_addresses_skip_labels_and_defines() {
    let p = program(
        ".start\n\
         define five 5\n\
         nop\n\
         .second\n\
         jmp .start\n\
         jmp .second",
    );
    assert_eq!(
        p,
        vec![
            Instruction::Nop,
            Instruction::Jmp { addr: 0 },
            Instruction::Jmp { addr: 1 },
        ]
    );
}

#[test]
fn duplicate_label_is_rejected_with_its_line() {
    let err = asm(".loop\nnop\n.loop\nhlt").unwrap_err();
    assert_eq!(err.line, 3);
    assert_eq!(err.kind, AsmErrorKind::DuplicateLabel(".loop".to_string()));
}

#[test]
fn duplicate_define_is_rejected() {
    assert_eq!(
        kind("define a 1\ndefine a 2"),
        AsmErrorKind::DuplicateDefine("a".to_string())
    );
}

#[test]
fn builtin_port_names_cannot_be_redefined() {
    assert_eq!(
        kind("define rng 3"),
        AsmErrorKind::DuplicateDefine("rng".to_string())
    );
}

#[test]
fn defines_substitute_transitively() {
    let p = program(
        "define a 1\n\
         define b a\n\
         ldi r1 b",
    );
    assert_eq!(p, vec![Instruction::Ldi { dst: 1, imm: 1 }]);
}

#[test]
fn builtin_define_names_the_port() {
    let p = program("ldi r1 write_char");
    assert_eq!(p, vec![Instruction::Ldi { dst: 1, imm: 247 }]);
}

#[test]
fn define_can_name_a_register() {
    let p = program(
        "define counter r5\n\
         inc counter",
    );
    assert_eq!(p, vec![Instruction::Adi { dst: 5, imm: 1 }]);
}

#[test]
fn malformed_define_lines_are_rejected() {
    assert_eq!(kind("define a"), AsmErrorKind::MissingArgument("define value"));
    assert_eq!(
        kind("define a 1 2"),
        AsmErrorKind::TooManyArguments("2".to_string())
    );
}

#[test]
fn sugar_lowers_to_canonical_instructions() {
    assert_eq!(program("inc r4"), vec![Instruction::Adi { dst: 4, imm: 1 }]);
    assert_eq!(program("dec r4"), vec![Instruction::Adi { dst: 4, imm: -1 }]);
    assert_eq!(
        program("cmp r1 r2"),
        vec![Instruction::Sub { a: 1, b: 2, dst: 0 }]
    );
    assert_eq!(
        program("not r1 r2"),
        vec![Instruction::Nor { a: 1, b: 0, dst: 2 }]
    );
    assert_eq!(
        program("lsh r3 r4"),
        vec![Instruction::Add { a: 3, b: 3, dst: 4 }]
    );
    assert_eq!(
        program("mov r6 r7"),
        vec![Instruction::Add { a: 6, b: 0, dst: 7 }]
    );
}

#[test]
fn opcodes_and_registers_are_case_insensitive() {
    assert_eq!(
        program("LDI R1 5"),
        vec![Instruction::Ldi { dst: 1, imm: 5 }]
    );
    assert_eq!(program("Hlt"), vec![Instruction::Hlt]);
}

#[test]
fn char_literals_assemble_to_their_codes() {
    assert_eq!(
        program("ldi r1 'a'"),
        vec![Instruction::Ldi { dst: 1, imm: 97 }]
    );
    assert_eq!(
        program("ldi r1 \"a\""),
        vec![Instruction::Ldi { dst: 1, imm: 97 }]
    );
}

#[test]
fn lod_str_offset_defaults_and_folds() {
    assert_eq!(
        program("lod r1 r2"),
        vec![Instruction::Lod { addr: 1, dst: 2, offset: 0 }]
    );
    // 12 folds into the signed 4-bit window as -4
    assert_eq!(
        program("str r1 r2 12"),
        vec![Instruction::Str { addr: 1, src: 2, offset: -4 }]
    );
    assert_eq!(
        program("str r1 r2 -8"),
        vec![Instruction::Str { addr: 1, src: 2, offset: -8 }]
    );
}

#[test]
fn branch_condition_aliases() {
    let p = program(
        "brh eq 0\n\
         brh ne 0\n\
         brh ge 0\n\
         brh lt 0",
    );
    assert_eq!(p[0], Instruction::Brh { cond: Condition::Zero, addr: 0 });
    assert_eq!(p[1], Instruction::Brh { cond: Condition::NotZero, addr: 0 });
    assert_eq!(p[2], Instruction::Brh { cond: Condition::Carry, addr: 0 });
    assert_eq!(p[3], Instruction::Brh { cond: Condition::NotCarry, addr: 0 });
}

#[test]
fn unknown_opcode_is_rejected() {
    assert_eq!(kind("frobnicate r1"), AsmErrorKind::UnknownOpcode("frobnicate".to_string()));
}

#[test]
fn missing_argument_names_what_was_expected() {
    assert_eq!(kind("ldi r1"), AsmErrorKind::MissingArgument("value"));
    assert_eq!(kind("add r1 r2"), AsmErrorKind::MissingArgument("destination"));
}

#[test]
fn out_of_range_registers_and_literals_are_rejected() {
    assert_eq!(kind("ldi r16 0"), AsmErrorKind::InvalidRegister("r16".to_string()));
    assert_eq!(kind("ldi x1 0"), AsmErrorKind::InvalidRegister("x1".to_string()));
    assert_eq!(kind("ldi r1 256"), AsmErrorKind::InvalidLiteral("256".to_string()));
    assert_eq!(kind("ldi r1 -129"), AsmErrorKind::InvalidLiteral("-129".to_string()));
    assert_eq!(kind("ldi r1 abc"), AsmErrorKind::InvalidLiteral("abc".to_string()));
}

#[test]
fn invalid_condition_is_rejected() {
    assert_eq!(kind("brh x 0"), AsmErrorKind::InvalidCondition("x".to_string()));
}

#[test]
fn extra_arguments_are_rejected() {
    assert_eq!(kind("hlt r1"), AsmErrorKind::TooManyArguments("r1".to_string()));
    assert_eq!(
        kind("add r1 r2 r3 r4"),
        AsmErrorKind::TooManyArguments("r4".to_string())
    );
}

#[test]
fn errors_carry_the_original_source_line() {
    let err = asm("nop\n\n// comment\nbadop").unwrap_err();
    assert_eq!(err.line, 4);
}

#[test]
fn cal_and_ret_round_trip_through_a_label() {
    let mut m = asm(
        "cal .double\n\
         hlt\n\
         .double\n\
         add r1 r1 r1\n\
         ret",
    )
    .unwrap();

    while !m.is_halted() {
        m.cycle().unwrap();
    }
    assert_eq!(m.stack_depth(), 0);
    assert_eq!(m.pc(), 2);
}

#[test]
fn char_port_writes_reach_the_device_on_commit() {
    let log = Rc::new(RefCell::new(CharLog::default()));
    let mut m = assemble(
        "ldi r1 write_char\n\
         ldi r2 'h'\n\
         str r1 r2\n\
         ldi r2 'i'\n\
         str r1 r2\n\
         ldi r1 buffer_chars\n\
         str r1 r0\n\
         hlt",
        Box::new(SharedChars(Rc::clone(&log))),
        Box::new(NullNumberDisplay),
        Box::new(NullScreen),
        Box::new(NullController),
    )
    .unwrap();

    while !m.is_halted() {
        m.cycle().unwrap();
    }

    let log = log.borrow();
    assert_eq!(log.written, vec![b'h', b'i']);
    assert_eq!(log.pushed, 1);
}

#[test]
fn countdown_loop_uses_flags_and_labels() {
    let mut m = asm(
        "ldi r1 3\n\
         .loop\n\
         dec r1\n\
         brh nz .loop\n\
         hlt",
    )
    .unwrap();

    let mut cycles = 0;
    while !m.is_halted() {
        m.cycle().unwrap();
        cycles += 1;
    }

    assert_eq!(m.register(1), 0);
    // ldi + 3 * (dec + brh) + hlt
    assert_eq!(cycles, 8);
}
