//! Resolution of the `mod`/`r/m` pair into an operand.
//!
//! | mod | operand                      | extra bytes |
//! |-----|------------------------------|-------------|
//! | 11  | register (`r/m` + `w`)       | 0           |
//! | 00  | `[ea]`, or `[addr]` for 110  | 0 (2)       |
//! | 01  | `[ea + disp8]`               | 1           |
//! | 10  | `[ea + disp16]`              | 2           |

use crate::bits::{Mode, ModRegRm};
use crate::decoder::{DecodeError, Displacement, MemoryOperand, Operand, Width};
use crate::instructions::{effective_address, register};
use crate::memory::ByteWindow;

/// `r/m` value that means "16-bit direct address" under mod 00.
pub const DIRECT_ADDRESS: u8 = 0b110;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub operand: Operand,
    pub extra: usize,
}

/// Number of displacement bytes implied by `mod`/`r/m`, without reading them.
pub fn extra_bytes(mode: Mode, rm: u8) -> usize {
    match mode {
        Mode::Register => 0,
        Mode::Memory0 if rm == DIRECT_ADDRESS => 2,
        Mode::Memory0 => 0,
        Mode::Memory8 => 1,
        Mode::Memory16 => 2,
    }
}

/// Resolves the `r/m` operand. Displacement bytes are read from `at`
/// (relative to the instruction start), which is where they follow the
/// fixed header.
pub fn resolve(modrm: ModRegRm, width: Width, win: &ByteWindow<'_>, at: usize) -> Result<Resolved, DecodeError> {
    let extra = extra_bytes(modrm.mode, modrm.rm);
    win.require(at + extra)?;
    let operand = match modrm.mode {
        Mode::Register => Operand::Register(register(modrm.rm, width)),
        Mode::Memory0 if modrm.rm == DIRECT_ADDRESS => {
            Operand::Memory(MemoryOperand::Direct(win.read_u16(at)?))
        }
        Mode::Memory0 => based(modrm.rm, Displacement::None),
        Mode::Memory8 => based(modrm.rm, Displacement::Disp8(win.read_u8(at)? as i8)),
        Mode::Memory16 => based(modrm.rm, Displacement::Disp16(win.read_u16(at)?)),
    };
    Ok(Resolved { operand, extra })
}

fn based(rm: u8, disp: Displacement) -> Operand {
    Operand::Memory(MemoryOperand::Based { base: effective_address(rm), disp })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{EffectiveAddress, Register};

    fn run(modrm: u8, tail: &[u8], width: Width) -> Result<Resolved, DecodeError> {
        let mut buf = vec![0x8B, modrm];
        buf.extend_from_slice(tail);
        let win = ByteWindow::new(&buf, 0);
        resolve(ModRegRm::from_byte(modrm), width, &win, 2)
    }

    #[test]
    fn register_direct() {
        let r = run(0b11_000_011, &[], Width::Word).unwrap();
        assert_eq!(r.operand, Operand::Register(Register::Bx));
        assert_eq!(r.extra, 0);
        let r = run(0b11_000_111, &[], Width::Byte).unwrap();
        assert_eq!(r.operand, Operand::Register(Register::Bh));
    }

    #[test]
    fn direct_address_reads_two_bytes() {
        let r = run(0b00_000_110, &[0x34, 0x12], Width::Word).unwrap();
        assert_eq!(r.operand, Operand::Memory(MemoryOperand::Direct(0x1234)));
        assert_eq!(r.extra, 2);
    }

    #[test]
    fn displacement_sizes() {
        let r = run(0b01_000_000, &[0xFD], Width::Word).unwrap();
        assert_eq!(
            r.operand,
            Operand::Memory(MemoryOperand::Based { base: EffectiveAddress::BxSi, disp: Displacement::Disp8(-3) })
        );
        assert_eq!(r.extra, 1);
        let r = run(0b10_000_110, &[0x00, 0x00], Width::Word).unwrap();
        assert_eq!(
            r.operand,
            Operand::Memory(MemoryOperand::Based { base: EffectiveAddress::Bp, disp: Displacement::Disp16(0) })
        );
        assert_eq!(r.extra, 2);
        let r = run(0b00_000_111, &[], Width::Byte).unwrap();
        assert_eq!(r.extra, 0);
    }

    #[test]
    fn missing_displacement_is_truncation() {
        let err = run(0b10_000_000, &[0x01], Width::Word).unwrap_err();
        assert_eq!(err, DecodeError::TruncatedInstruction { offset: 0, needed: 4, available: 3 });
    }
}
