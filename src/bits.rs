//! Sub-byte field extraction. Offsets count from the most significant bit,
//! matching the way the 8086 manual draws its encoding tables.

use bitvec::prelude::*;

/// Returns `width` bits of `byte` starting `offset` bits from the MSB.
#[inline]
pub fn field(byte: u8, offset: usize, width: usize) -> u8 {
    debug_assert!(width > 0 && offset + width <= 8);
    byte.view_bits::<Msb0>()[offset..offset + width].load_be::<u8>()
}

#[inline]
pub fn flag(byte: u8, offset: usize) -> bool {
    field(byte, offset, 1) == 1
}

/// `100010 d w` style headers: the leading six bits.
#[inline]
pub fn opcode6(byte: u8) -> u8 {
    field(byte, 0, 6)
}

#[inline]
pub fn opcode4(byte: u8) -> u8 {
    field(byte, 0, 4)
}

/// Direction bit (`d`) of a two-operand header.
#[inline]
pub fn direction(byte: u8) -> bool {
    flag(byte, 6)
}

/// Sign-extend bit (`s`) of the immediate group header; shares the `d` slot.
#[inline]
pub fn sign(byte: u8) -> bool {
    flag(byte, 6)
}

/// Width bit (`w`) in the last position of most headers.
#[inline]
pub fn wide(byte: u8) -> bool {
    flag(byte, 7)
}

/// Width bit of `1011 w reg`.
#[inline]
pub fn wide_imm_reg(byte: u8) -> bool {
    flag(byte, 4)
}

/// Register field of `1011 w reg`.
#[inline]
pub fn imm_reg(byte: u8) -> u8 {
    field(byte, 5, 3)
}

/// The three-bit operation group shared by `00 xxx 0dw` and `00 xxx 10w`.
#[inline]
pub fn arith_group(byte: u8) -> u8 {
    field(byte, 2, 3)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Memory0,
    Memory8,
    Memory16,
    Register,
}

impl Mode {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Mode::Memory0,
            0b01 => Mode::Memory8,
            0b10 => Mode::Memory16,
            _ => Mode::Register,
        }
    }
}

/// Unpacked `mod reg r/m` byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModRegRm {
    pub mode: Mode,
    pub reg: u8,
    pub rm: u8,
}

impl ModRegRm {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            mode: Mode::from_bits(field(byte, 0, 2)),
            reg: field(byte, 2, 3),
            rm: field(byte, 5, 3),
        }
    }
}
