use crate::bits;
use crate::decoder::{EffectiveAddress, Op, Register, Width};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    Move,
    /// Three-bit group code shared by `00 xxx 0dw`, `00 xxx 10w` and the
    /// `reg` field of `100000 s w`.
    Arith(u8),
    /// Exact first byte of a two-byte short jump.
    Jump(u8),
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    pub class: OpClass,
}

/// Every modeled operation; reverse lookups from opcode bits scan this list.
pub const OPS: &[Op] = &[
    Op::Mov,
    Op::Add,
    Op::Sub,
    Op::Cmp,
    Op::Jo,
    Op::Jno,
    Op::Jb,
    Op::Jnb,
    Op::Je,
    Op::Jne,
    Op::Jbe,
    Op::Ja,
    Op::Js,
    Op::Jns,
    Op::Jp,
    Op::Jnp,
    Op::Jl,
    Op::Jnl,
    Op::Jle,
    Op::Jg,
    Op::Loopnz,
    Op::Loopz,
    Op::Loop,
    Op::Jcxz,
];

pub fn describe(op: Op) -> InstrDesc {
    match op {
        Op::Mov => InstrDesc { op: Op::Mov, mnemonic: "mov", class: OpClass::Move },
        Op::Add => InstrDesc { op: Op::Add, mnemonic: "add", class: OpClass::Arith(0b000) },
        Op::Sub => InstrDesc { op: Op::Sub, mnemonic: "sub", class: OpClass::Arith(0b101) },
        Op::Cmp => InstrDesc { op: Op::Cmp, mnemonic: "cmp", class: OpClass::Arith(0b111) },
        Op::Jo => InstrDesc { op: Op::Jo, mnemonic: "jo", class: OpClass::Jump(0x70) },
        Op::Jno => InstrDesc { op: Op::Jno, mnemonic: "jno", class: OpClass::Jump(0x71) },
        Op::Jb => InstrDesc { op: Op::Jb, mnemonic: "jb", class: OpClass::Jump(0x72) },
        Op::Jnb => InstrDesc { op: Op::Jnb, mnemonic: "jnb", class: OpClass::Jump(0x73) },
        Op::Je => InstrDesc { op: Op::Je, mnemonic: "je", class: OpClass::Jump(0x74) },
        Op::Jne => InstrDesc { op: Op::Jne, mnemonic: "jne", class: OpClass::Jump(0x75) },
        Op::Jbe => InstrDesc { op: Op::Jbe, mnemonic: "jbe", class: OpClass::Jump(0x76) },
        Op::Ja => InstrDesc { op: Op::Ja, mnemonic: "ja", class: OpClass::Jump(0x77) },
        Op::Js => InstrDesc { op: Op::Js, mnemonic: "js", class: OpClass::Jump(0x78) },
        Op::Jns => InstrDesc { op: Op::Jns, mnemonic: "jns", class: OpClass::Jump(0x79) },
        Op::Jp => InstrDesc { op: Op::Jp, mnemonic: "jp", class: OpClass::Jump(0x7A) },
        Op::Jnp => InstrDesc { op: Op::Jnp, mnemonic: "jnp", class: OpClass::Jump(0x7B) },
        Op::Jl => InstrDesc { op: Op::Jl, mnemonic: "jl", class: OpClass::Jump(0x7C) },
        Op::Jnl => InstrDesc { op: Op::Jnl, mnemonic: "jnl", class: OpClass::Jump(0x7D) },
        Op::Jle => InstrDesc { op: Op::Jle, mnemonic: "jle", class: OpClass::Jump(0x7E) },
        Op::Jg => InstrDesc { op: Op::Jg, mnemonic: "jg", class: OpClass::Jump(0x7F) },
        Op::Loopnz => InstrDesc { op: Op::Loopnz, mnemonic: "loopnz", class: OpClass::Jump(0xE0) },
        Op::Loopz => InstrDesc { op: Op::Loopz, mnemonic: "loopz", class: OpClass::Jump(0xE1) },
        Op::Loop => InstrDesc { op: Op::Loop, mnemonic: "loop", class: OpClass::Jump(0xE2) },
        Op::Jcxz => InstrDesc { op: Op::Jcxz, mnemonic: "jcxz", class: OpClass::Jump(0xE3) },
    }
}

pub fn mnemonic(op: Op) -> &'static str {
    describe(op).mnemonic
}

/// Arithmetic mnemonic for a three-bit group code, if it is in the modeled subset.
pub fn arith_op(group: u8) -> Option<Op> {
    OPS.iter().copied().find(|&op| describe(op).class == OpClass::Arith(group))
}

pub fn jump_op(byte: u8) -> Option<Op> {
    OPS.iter().copied().find(|&op| describe(op).class == OpClass::Jump(byte))
}

// Indexed by the 3-bit register code, then by `w`.
const REGISTERS: [[Register; 2]; 8] = [
    [Register::Al, Register::Ax],
    [Register::Cl, Register::Cx],
    [Register::Dl, Register::Dx],
    [Register::Bl, Register::Bx],
    [Register::Ah, Register::Sp],
    [Register::Ch, Register::Bp],
    [Register::Dh, Register::Si],
    [Register::Bh, Register::Di],
];

pub fn register(code: u8, width: Width) -> Register {
    REGISTERS[(code & 0b111) as usize][(width == Width::Word) as usize]
}

/// Inverse of [`register`]: the 3-bit code and width of a register.
pub fn register_code(reg: Register) -> (u8, Width) {
    match reg {
        Register::Al => (0b000, Width::Byte),
        Register::Cl => (0b001, Width::Byte),
        Register::Dl => (0b010, Width::Byte),
        Register::Bl => (0b011, Width::Byte),
        Register::Ah => (0b100, Width::Byte),
        Register::Ch => (0b101, Width::Byte),
        Register::Dh => (0b110, Width::Byte),
        Register::Bh => (0b111, Width::Byte),
        Register::Ax => (0b000, Width::Word),
        Register::Cx => (0b001, Width::Word),
        Register::Dx => (0b010, Width::Word),
        Register::Bx => (0b011, Width::Word),
        Register::Sp => (0b100, Width::Word),
        Register::Bp => (0b101, Width::Word),
        Register::Si => (0b110, Width::Word),
        Register::Di => (0b111, Width::Word),
    }
}

const EFFECTIVE_ADDRESSES: [EffectiveAddress; 8] = [
    EffectiveAddress::BxSi,
    EffectiveAddress::BxDi,
    EffectiveAddress::BpSi,
    EffectiveAddress::BpDi,
    EffectiveAddress::Si,
    EffectiveAddress::Di,
    EffectiveAddress::Bp,
    EffectiveAddress::Bx,
];

pub fn effective_address(rm: u8) -> EffectiveAddress {
    EFFECTIVE_ADDRESSES[(rm & 0b111) as usize]
}

pub fn effective_address_code(ea: EffectiveAddress) -> u8 {
    match ea {
        EffectiveAddress::BxSi => 0b000,
        EffectiveAddress::BxDi => 0b001,
        EffectiveAddress::BpSi => 0b010,
        EffectiveAddress::BpDi => 0b011,
        EffectiveAddress::Si => 0b100,
        EffectiveAddress::Di => 0b101,
        EffectiveAddress::Bp => 0b110,
        EffectiveAddress::Bx => 0b111,
    }
}

/// Opcode families recognized by the leading bits of the first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// `100010 d w` (mov) or `00 xxx 0 d w` (add/sub/cmp).
    RegMem(Op),
    /// `1011 w reg`
    ImmToReg,
    /// `100000 s w`; the operation comes from the following `reg` field.
    ImmToRegMem,
    /// `00 xxx 1 0 w`
    ImmToAcc(Op),
    ShortJump(Op),
}

pub const MOV_REG_MEM: u8 = 0b100010;
pub const MOV_IMM_REG: u8 = 0b1011;
pub const ARITH_IMM_REG_MEM: u8 = 0b100000;

pub fn classify(byte: u8) -> Option<Family> {
    if bits::opcode6(byte) == MOV_REG_MEM {
        return Some(Family::RegMem(Op::Mov));
    }
    if bits::opcode4(byte) == MOV_IMM_REG {
        return Some(Family::ImmToReg);
    }
    if bits::opcode6(byte) == ARITH_IMM_REG_MEM {
        return Some(Family::ImmToRegMem);
    }
    if bits::field(byte, 0, 2) == 0b00 {
        let op = arith_op(bits::arith_group(byte))?;
        return match bits::field(byte, 5, 2) {
            0b10 => Some(Family::ImmToAcc(op)),
            0b00 | 0b01 => Some(Family::RegMem(op)),
            _ => None,
        };
    }
    jump_op(byte).map(Family::ShortJump)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_table_is_total() {
        for code in 0..8u8 {
            for width in [Width::Byte, Width::Word] {
                let r = register(code, width);
                assert_eq!(register_code(r), (code, width));
            }
        }
        assert_eq!(register(0b100, Width::Byte), Register::Ah);
        assert_eq!(register(0b100, Width::Word), Register::Sp);
    }

    #[test]
    fn classify_families() {
        assert_eq!(classify(0x89), Some(Family::RegMem(Op::Mov)));
        assert_eq!(classify(0xB8), Some(Family::ImmToReg));
        assert_eq!(classify(0x83), Some(Family::ImmToRegMem));
        assert_eq!(classify(0x03), Some(Family::RegMem(Op::Add)));
        assert_eq!(classify(0x2B), Some(Family::RegMem(Op::Sub)));
        assert_eq!(classify(0x39), Some(Family::RegMem(Op::Cmp)));
        assert_eq!(classify(0x04), Some(Family::ImmToAcc(Op::Add)));
        assert_eq!(classify(0x2D), Some(Family::ImmToAcc(Op::Sub)));
        assert_eq!(classify(0x3C), Some(Family::ImmToAcc(Op::Cmp)));
        assert_eq!(classify(0x74), Some(Family::ShortJump(Op::Je)));
        assert_eq!(classify(0xE2), Some(Family::ShortJump(Op::Loop)));
    }

    #[test]
    fn classify_rejects_unmodeled() {
        // or r/m, xor acc, push es, nop, hlt
        for b in [0x08u8, 0x34, 0x06, 0x90, 0xF4, 0xC6, 0xE4] {
            assert_eq!(classify(b), None, "{b:#04x}");
        }
    }

    #[test]
    fn descriptor_rows_match_their_op() {
        for &op in OPS {
            let d = describe(op);
            assert_eq!(d.op, op);
            match d.class {
                OpClass::Jump(byte) => assert_eq!(jump_op(byte), Some(op)),
                OpClass::Arith(group) => assert_eq!(arith_op(group), Some(op)),
                OpClass::Move => assert_eq!(op, Op::Mov),
            }
        }
        assert_eq!(OPS.len(), 24);
    }

    #[test]
    fn effective_address_codes_invert_table() {
        for rm in 0..8u8 {
            assert_eq!(effective_address_code(effective_address(rm)), rm);
        }
    }

    #[test]
    fn arith_groups() {
        assert_eq!(arith_op(0b000), Some(Op::Add));
        assert_eq!(arith_op(0b101), Some(Op::Sub));
        assert_eq!(arith_op(0b111), Some(Op::Cmp));
        assert_eq!(arith_op(0b001), None);
        assert_eq!(mnemonic(Op::Loopnz), "loopnz");
    }
}
