use crate::addressing::resolve;
use crate::bits::{self, ModRegRm, Mode};
use crate::decoder::{DecodeError, Decoded, Decoder, Form, Op, Operand, Width};
use crate::immediate;
use crate::instructions::{arith_op, classify, register, Family};
use crate::memory::ByteWindow;

/// 8086 decoder for the mov / add / sub / cmp / short-jump subset.
#[derive(Debug, Default, Clone, Copy)]
pub struct I8086Decoder;

impl I8086Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for I8086Decoder {
    fn decode(&self, bytes: &[u8], offset: usize) -> Result<Decoded, DecodeError> {
        let win = ByteWindow::new(bytes, offset);
        let b0 = win.read_u8(0)?;
        let unrecognized = DecodeError::UnrecognizedOpcode { byte: b0, offset };
        match classify(b0).ok_or(unrecognized)? {
            Family::RegMem(op) => reg_mem(&win, b0, op),
            Family::ImmToReg => imm_to_reg(&win, b0),
            Family::ImmToRegMem => imm_to_reg_mem(&win, b0),
            Family::ImmToAcc(op) => imm_to_acc(&win, b0, op),
            Family::ShortJump(op) => short_jump(&win, op),
        }
    }
}

// 100010 d w | mod reg r/m | disp-lo | disp-hi   (and 00 xxx 0 d w)
fn reg_mem(win: &ByteWindow<'_>, b0: u8, op: Op) -> Result<Decoded, DecodeError> {
    let modrm = ModRegRm::from_byte(win.read_u8(1)?);
    let width = Width::from_w(bits::wide(b0));
    let rm = resolve(modrm, width, win, 2)?;
    let reg = Operand::Register(register(modrm.reg, width));
    let (dst, src) = if bits::direction(b0) { (reg, rm.operand) } else { (rm.operand, reg) };
    Ok(Decoded {
        op,
        form: Form::RegMem,
        opcode: b0,
        offset: win.start(),
        len: (2 + rm.extra) as u8,
        dst,
        src: Some(src),
        size: None,
    })
}

// 1011 w reg | data | data if w
fn imm_to_reg(win: &ByteWindow<'_>, b0: u8) -> Result<Decoded, DecodeError> {
    let width = Width::from_w(bits::wide_imm_reg(b0));
    let len = 1 + width.bytes();
    let raw = win.slice(len)?;
    let value = immediate::decode(&raw[1..], width, true);
    Ok(Decoded {
        op: Op::Mov,
        form: Form::ImmToReg,
        opcode: b0,
        offset: win.start(),
        len: len as u8,
        dst: Operand::Register(register(bits::imm_reg(b0), width)),
        src: Some(Operand::Immediate(value)),
        size: None,
    })
}

// 100000 s w | mod xxx r/m | disp-lo | disp-hi | data | data if s:w = 01
fn imm_to_reg_mem(win: &ByteWindow<'_>, b0: u8) -> Result<Decoded, DecodeError> {
    let modrm = ModRegRm::from_byte(win.read_u8(1)?);
    let op = arith_op(modrm.reg).ok_or(DecodeError::UnrecognizedOpcode { byte: b0, offset: win.start() })?;
    let width = Width::from_w(bits::wide(b0));
    let rm = resolve(modrm, width, win, 2)?;

    // s=1 sign-extends a single data byte to the destination width
    let data_width = if !bits::sign(b0) && width == Width::Word { Width::Word } else { Width::Byte };
    let at = 2 + rm.extra;
    let len = at + data_width.bytes();
    let raw = win.slice(len)?;
    let value = immediate::decode(&raw[at..], data_width, true);

    let size = match modrm.mode {
        Mode::Register => None,
        _ => Some(width),
    };
    Ok(Decoded {
        op,
        form: Form::ImmToRegMem,
        opcode: b0,
        offset: win.start(),
        len: len as u8,
        dst: rm.operand,
        src: Some(Operand::Immediate(value)),
        size,
    })
}

// 00 xxx 1 0 w | data | data if w
fn imm_to_acc(win: &ByteWindow<'_>, b0: u8, op: Op) -> Result<Decoded, DecodeError> {
    let width = Width::from_w(bits::wide(b0));
    let len = 1 + width.bytes();
    let raw = win.slice(len)?;
    let value = immediate::decode(&raw[1..], width, true);
    Ok(Decoded {
        op,
        form: Form::ImmToAcc,
        opcode: b0,
        offset: win.start(),
        len: len as u8,
        dst: Operand::Register(register(0, width)),
        src: Some(Operand::Immediate(value)),
        size: None,
    })
}

// opcode | ip-inc8
fn short_jump(win: &ByteWindow<'_>, op: Op) -> Result<Decoded, DecodeError> {
    let inc = immediate::byte_value(win.read_u8(1)?, true);
    Ok(Decoded {
        op,
        form: Form::ShortJump,
        opcode: win.read_u8(0)?,
        offset: win.start(),
        len: 2,
        // relative to the start of the instruction, as `$` is in nasm
        dst: Operand::RelativeOffset(inc + 2),
        src: None,
        size: None,
    })
}
