use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Width {
    Byte = 1,
    Word = 2,
}

impl Width {
    pub fn from_w(w: bool) -> Self {
        if w { Width::Word } else { Width::Byte }
    }

    pub fn bytes(self) -> usize {
        self as usize
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Width::Byte => "byte",
            Width::Word => "word",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    Mov,
    Add,
    Sub,
    Cmp,
    Jo,
    Jno,
    Jb,
    Jnb,
    Je,
    Jne,
    Jbe,
    Ja,
    Js,
    Jns,
    Jp,
    Jnp,
    Jl,
    Jnl,
    Jle,
    Jg,
    Loopnz,
    Loopz,
    Loop,
    Jcxz,
}

/// Which encoding an instruction was decoded from. Several forms share a
/// mnemonic, so the re-encoder needs this to pick the same bytes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Form {
    RegMem,
    ImmToReg,
    ImmToRegMem,
    ImmToAcc,
    ShortJump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Register {
    Al,
    Cl,
    Dl,
    Bl,
    Ah,
    Ch,
    Dh,
    Bh,
    Ax,
    Cx,
    Dx,
    Bx,
    Sp,
    Bp,
    Si,
    Di,
}

/// Base/index expression selected by r/m when mod != 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectiveAddress {
    BxSi,
    BxDi,
    BpSi,
    BpDi,
    Si,
    Di,
    Bp,
    Bx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Displacement {
    None,
    Disp8(i8),
    Disp16(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryOperand {
    /// `mod 00, r/m 110`: absolute address, no register expression.
    Direct(u16),
    Based { base: EffectiveAddress, disp: Displacement },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Register(Register),
    Memory(MemoryOperand),
    Immediate(i32),
    /// Jump displacement measured from the start of the instruction.
    RelativeOffset(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub op: Op,
    pub form: Form,
    /// First instruction byte; its `d`/`s`/`w` bits pick between equivalent encodings.
    pub opcode: u8,
    pub offset: usize,
    pub len: u8,
    pub dst: Operand,
    pub src: Option<Operand>,
    /// Explicit `byte`/`word` keyword for immediate-to-memory arithmetic.
    pub size: Option<Width>,
}

impl Decoded {
    pub fn end(&self) -> usize {
        self.offset + self.len as usize
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("nothing to decode: input buffer is empty")]
    EmptyInput,
    #[error("unrecognized opcode {byte:#04x} ({byte:08b}) at offset {offset:#06x}")]
    UnrecognizedOpcode { byte: u8, offset: usize },
    #[error("truncated instruction at offset {offset:#06x}: needs {needed} bytes, {available} available")]
    TruncatedInstruction { offset: usize, needed: usize, available: usize },
}

pub trait Decoder {
    /// Decode the single instruction starting at `offset`.
    fn decode(&self, bytes: &[u8], offset: usize) -> Result<Decoded, DecodeError>;
}
