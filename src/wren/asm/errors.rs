use thiserror::Error;

/// Everything that can make assembly fail. Any of these aborts the whole
/// assembly; there is no partial program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmErrorKind {
    #[error("redefinition of label '{0}'")]
    DuplicateLabel(String),

    #[error("redefinition of define '{0}'")]
    DuplicateDefine(String),

    #[error("expected {0} argument but it's missing")]
    MissingArgument(&'static str),

    #[error("invalid register '{0}'")]
    InvalidRegister(String),

    #[error("invalid literal '{0}'")]
    InvalidLiteral(String),

    #[error("invalid condition '{0}', expected C, NC, Z, NZ, EQ, NE, GE or LT")]
    InvalidCondition(String),

    #[error("unrecognized opcode '{0}'")]
    UnknownOpcode(String),

    #[error("too many arguments, unexpected '{0}'")]
    TooManyArguments(String),
}

/// An [`AsmErrorKind`] with the 1-based source line it was raised on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct AsmError {
    pub line: usize,
    pub kind: AsmErrorKind,
}
