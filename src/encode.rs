//! Re-encoding of decoded records back into machine bytes. Only the shapes
//! the decoder produces are accepted. The `d` and `s` bits come from the
//! recorded [`Decoded::opcode`], so equivalent encodings come back as they
//! were read.

use thiserror::Error;

use crate::addressing::DIRECT_ADDRESS;
use crate::bits;
use crate::decoder::{Decoded, Displacement, Form, MemoryOperand, Op, Operand, Register, Width};
use crate::instructions::{
    describe, effective_address_code, register_code, OpClass, ARITH_IMM_REG_MEM, MOV_IMM_REG, MOV_REG_MEM,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("{op:?} has no {form:?} encoding")]
    NoEncoding { op: Op, form: Form },
    #[error("operand shape not encodable as {form:?}")]
    BadOperands { form: Form },
    #[error("immediate {value} does not fit {width:?}")]
    ImmediateRange { value: i32, width: Width },
    #[error("jump offset {0} out of short range")]
    JumpRange(i32),
}

pub fn encode(d: &Decoded) -> Result<Vec<u8>, EncodeError> {
    let bad = EncodeError::BadOperands { form: d.form };
    match d.form {
        Form::RegMem => {
            let src = d.src.ok_or(bad.clone())?;
            // d=1: `reg` names the destination
            let reg_is_dst = bits::direction(d.opcode);
            let (reg, rm) = match (reg_is_dst, d.dst, src) {
                (true, Operand::Register(r), rm @ (Operand::Register(_) | Operand::Memory(_))) => (r, rm),
                (false, rm @ (Operand::Register(_) | Operand::Memory(_)), Operand::Register(r)) => (r, rm),
                _ => return Err(bad),
            };
            let (reg_code, width) = register_code(reg);
            let dir = reg_is_dst as u8;
            let mut out = vec![(reg_mem_opcode(d.op, d.form)? << 2) | (dir << 1) | width_bit(width)];
            push_rm(&mut out, reg_code, rm, width, d.form)?;
            Ok(out)
        }
        Form::ImmToReg => {
            let (Operand::Register(r), Some(Operand::Immediate(v))) = (d.dst, d.src) else { return Err(bad) };
            if d.op != Op::Mov {
                return Err(EncodeError::NoEncoding { op: d.op, form: d.form });
            }
            let (code, width) = register_code(r);
            let mut out = vec![(MOV_IMM_REG << 4) | (width_bit(width) << 3) | code];
            push_imm(&mut out, v, width)?;
            Ok(out)
        }
        Form::ImmToRegMem => {
            let Some(Operand::Immediate(v)) = d.src else { return Err(bad) };
            let width = match (d.dst, d.size) {
                (Operand::Register(r), _) => register_code(r).1,
                (Operand::Memory(_), Some(w)) => w,
                _ => return Err(bad),
            };
            let group = arith_group(d.op, d.form)?;
            let sign_ext = bits::sign(d.opcode);
            let data_width = if !sign_ext && width == Width::Word { Width::Word } else { Width::Byte };
            // a sign-extended byte has to read back as the same value
            if sign_ext && i8::try_from(v).is_err() {
                return Err(EncodeError::ImmediateRange { value: v, width: Width::Byte });
            }
            let s = sign_ext as u8;
            let mut out = vec![(ARITH_IMM_REG_MEM << 2) | (s << 1) | width_bit(width)];
            push_rm(&mut out, group, d.dst, width, d.form)?;
            push_imm(&mut out, v, data_width)?;
            Ok(out)
        }
        Form::ImmToAcc => {
            let (Operand::Register(acc @ (Register::Al | Register::Ax)), Some(Operand::Immediate(v))) = (d.dst, d.src)
            else {
                return Err(bad);
            };
            let width = register_code(acc).1;
            let group = arith_group(d.op, d.form)?;
            let mut out = vec![(group << 3) | 0b100 | width_bit(width)];
            push_imm(&mut out, v, width)?;
            Ok(out)
        }
        Form::ShortJump => {
            let Operand::RelativeOffset(rel) = d.dst else { return Err(bad) };
            let OpClass::Jump(opcode) = describe(d.op).class else {
                return Err(EncodeError::NoEncoding { op: d.op, form: d.form });
            };
            let inc = i8::try_from(rel - 2).map_err(|_| EncodeError::JumpRange(rel))?;
            Ok(vec![opcode, inc as u8])
        }
    }
}

fn width_bit(w: Width) -> u8 {
    (w == Width::Word) as u8
}

fn reg_mem_opcode(op: Op, form: Form) -> Result<u8, EncodeError> {
    match describe(op).class {
        OpClass::Move => Ok(MOV_REG_MEM),
        OpClass::Arith(group) => Ok(group << 1),
        OpClass::Jump(_) => Err(EncodeError::NoEncoding { op, form }),
    }
}

fn arith_group(op: Op, form: Form) -> Result<u8, EncodeError> {
    match describe(op).class {
        OpClass::Arith(group) => Ok(group),
        _ => Err(EncodeError::NoEncoding { op, form }),
    }
}

fn push_rm(out: &mut Vec<u8>, reg: u8, rm: Operand, width: Width, form: Form) -> Result<(), EncodeError> {
    match rm {
        Operand::Register(r) => {
            let (code, w) = register_code(r);
            if w != width {
                return Err(EncodeError::BadOperands { form });
            }
            out.push(0b11_000_000 | (reg << 3) | code);
        }
        Operand::Memory(MemoryOperand::Direct(addr)) => {
            out.push((reg << 3) | DIRECT_ADDRESS);
            out.extend_from_slice(&addr.to_le_bytes());
        }
        Operand::Memory(MemoryOperand::Based { base, disp }) => {
            let code = effective_address_code(base);
            match disp {
                Displacement::None => {
                    // [bp] alone has no mod 00 form
                    if code == DIRECT_ADDRESS {
                        return Err(EncodeError::BadOperands { form });
                    }
                    out.push((reg << 3) | code);
                }
                Displacement::Disp8(v) => {
                    out.push(0b01_000_000 | (reg << 3) | code);
                    out.push(v as u8);
                }
                Displacement::Disp16(v) => {
                    out.push(0b10_000_000 | (reg << 3) | code);
                    out.extend_from_slice(&v.to_le_bytes());
                }
            }
        }
        _ => return Err(EncodeError::BadOperands { form }),
    }
    Ok(())
}

fn push_imm(out: &mut Vec<u8>, v: i32, width: Width) -> Result<(), EncodeError> {
    let range = EncodeError::ImmediateRange { value: v, width };
    match width {
        Width::Byte => {
            let b = i8::try_from(v).map(|b| b as u8).or_else(|_| u8::try_from(v)).map_err(|_| range)?;
            out.push(b);
        }
        Width::Word => {
            let w = i16::try_from(v).map(|w| w as u16).or_else(|_| u16::try_from(v)).map_err(|_| range)?;
            out.extend_from_slice(&w.to_le_bytes());
        }
    }
    Ok(())
}
