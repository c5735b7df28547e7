// wren/asm/operand.rs
use std::collections::{HashMap, VecDeque};

use super::errors::AsmErrorKind;
use crate::wren::cell::{to_signed, to_unsigned};
use crate::wren::instruction::Condition;
use crate::wren::registers::REGISTER_COUNT;

/// Cursor over one instruction's argument tokens. Each consumed token is
/// resolved left-to-right against the define table (transitively) and then
/// the label table before being parsed as its expected kind.
pub(crate) struct Args<'a> {
    tokens: VecDeque<&'a str>,
    defines: &'a HashMap<String, String>,
    labels: &'a HashMap<String, usize>,
}

impl<'a> Args<'a> {
    pub(crate) fn new(
        tokens: Vec<&'a str>,
        defines: &'a HashMap<String, String>,
        labels: &'a HashMap<String, usize>,
    ) -> Self {
        Self { tokens: tokens.into(), defines, labels }
    }

    fn next_resolved(&mut self) -> Option<String> {
        let mut arg = self.tokens.pop_front()?.to_string();

        // transitive define substitution, bounded so a cyclic chain falls
        // through to the literal parsers instead of spinning
        let mut hops = 0;
        while let Some(next) = self.defines.get(&arg) {
            arg = next.clone();
            hops += 1;
            if hops > self.defines.len() {
                break;
            }
        }

        if let Some(address) = self.labels.get(&arg) {
            arg = address.to_string();
        }

        Some(arg)
    }

    /// `r<index>` with index < 16, case-insensitive prefix.
    pub(crate) fn register(&mut self, kind: &'static str) -> Result<u8, AsmErrorKind> {
        let arg = self
            .next_resolved()
            .ok_or(AsmErrorKind::MissingArgument(kind))?;

        let index = arg
            .strip_prefix(['r', 'R'])
            .and_then(|digits| digits.parse::<u8>().ok())
            .ok_or_else(|| AsmErrorKind::InvalidRegister(arg.clone()))?;
        if index as usize >= REGISTER_COUNT {
            return Err(AsmErrorKind::InvalidRegister(arg));
        }

        Ok(index)
    }

    /// Signed-or-unsigned integer in -128..255.
    pub(crate) fn int(&mut self, kind: &'static str) -> Result<i32, AsmErrorKind> {
        let arg = self
            .next_resolved()
            .ok_or(AsmErrorKind::MissingArgument(kind))?;
        parse_literal(&arg)
    }

    /// Integer whose canonical signed form equals itself (-128..127).
    pub(crate) fn signed(&mut self, kind: &'static str) -> Result<i32, AsmErrorKind> {
        let arg = self
            .next_resolved()
            .ok_or(AsmErrorKind::MissingArgument(kind))?;
        let value = parse_literal(&arg)?;
        if value != to_signed(value) as i32 {
            return Err(AsmErrorKind::InvalidLiteral(arg));
        }
        Ok(value)
    }

    /// Like [`signed`](Args::signed), but absent is allowed.
    pub(crate) fn opt_signed(&mut self, kind: &'static str) -> Result<Option<i32>, AsmErrorKind> {
        if self.tokens.is_empty() {
            return Ok(None);
        }
        self.signed(kind).map(Some)
    }

    /// Integer whose canonical unsigned form equals itself (0..255).
    pub(crate) fn unsigned(&mut self, kind: &'static str) -> Result<u8, AsmErrorKind> {
        let arg = self
            .next_resolved()
            .ok_or(AsmErrorKind::MissingArgument(kind))?;
        let value = parse_literal(&arg)?;
        if value != to_unsigned(value) as i32 {
            return Err(AsmErrorKind::InvalidLiteral(arg));
        }
        Ok(value as u8)
    }

    /// One of the eight branch mnemonics, case-insensitive.
    pub(crate) fn condition(&mut self, kind: &'static str) -> Result<Condition, AsmErrorKind> {
        let arg = self
            .next_resolved()
            .ok_or(AsmErrorKind::MissingArgument(kind))?;
        match arg.to_ascii_uppercase().as_str() {
            "Z" | "EQ" => Ok(Condition::Zero),
            "NZ" | "NE" => Ok(Condition::NotZero),
            "C" | "GE" => Ok(Condition::Carry),
            "NC" | "LT" => Ok(Condition::NotCarry),
            _ => Err(AsmErrorKind::InvalidCondition(arg)),
        }
    }

    /// Every argument must have been consumed by now.
    pub(crate) fn finish(mut self) -> Result<(), AsmErrorKind> {
        match self.tokens.pop_front() {
            Some(extra) => Err(AsmErrorKind::TooManyArguments(extra.to_string())),
            None => Ok(()),
        }
    }
}

/// Decimal integer or 1-character literal in matching quotes, range-checked
/// to the 8-bit window -128..255.
fn parse_literal(arg: &str) -> Result<i32, AsmErrorKind> {
    let value = match char_literal(arg) {
        Some(code) => code,
        None => arg
            .parse::<i32>()
            .map_err(|_| AsmErrorKind::InvalidLiteral(arg.to_string()))?,
    };

    if !(-128..=255).contains(&value) {
        return Err(AsmErrorKind::InvalidLiteral(arg.to_string()));
    }
    Ok(value)
}

fn char_literal(arg: &str) -> Option<i32> {
    let chars: Vec<char> = arg.chars().collect();
    if chars.len() == 3
        && chars[0] == chars[2]
        && (chars[0] == '\'' || chars[0] == '"')
    {
        return Some(chars[1] as i32);
    }
    None
}
