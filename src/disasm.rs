use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decoder::{Decoded, Displacement, EffectiveAddress, MemoryOperand, Operand, Register};
use crate::instructions::mnemonic;

pub fn fmt_decoded(d: &Decoded) -> String {
    d.to_string()
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Register::Al => "al",
            Register::Cl => "cl",
            Register::Dl => "dl",
            Register::Bl => "bl",
            Register::Ah => "ah",
            Register::Ch => "ch",
            Register::Dh => "dh",
            Register::Bh => "bh",
            Register::Ax => "ax",
            Register::Cx => "cx",
            Register::Dx => "dx",
            Register::Bx => "bx",
            Register::Sp => "sp",
            Register::Bp => "bp",
            Register::Si => "si",
            Register::Di => "di",
        };
        f.write_str(name)
    }
}

impl fmt::Display for EffectiveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expr = match self {
            EffectiveAddress::BxSi => "bx + si",
            EffectiveAddress::BxDi => "bx + di",
            EffectiveAddress::BpSi => "bp + si",
            EffectiveAddress::BpDi => "bp + di",
            EffectiveAddress::Si => "si",
            EffectiveAddress::Di => "di",
            EffectiveAddress::Bp => "bp",
            EffectiveAddress::Bx => "bx",
        };
        f.write_str(expr)
    }
}

impl fmt::Display for MemoryOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MemoryOperand::Direct(addr) => write!(f, "[{addr}]"),
            MemoryOperand::Based { base, disp } => match disp {
                Displacement::None | Displacement::Disp8(0) => write!(f, "[{base}]"),
                // keep the sign so the text assembles back to a disp8
                Displacement::Disp8(d) if d < 0 => write!(f, "[{base} - {}]", -(d as i16)),
                Displacement::Disp8(d) => write!(f, "[{base} + {d}]"),
                Displacement::Disp16(d) => write!(f, "[{base} + {d}]"),
            },
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(r) => write!(f, "{r}"),
            Operand::Memory(m) => write!(f, "{m}"),
            Operand::Immediate(v) => write!(f, "{v}"),
            Operand::RelativeOffset(v) => write!(f, "${v:+}"),
        }
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", mnemonic(self.op))?;
        if let Some(size) = self.size {
            write!(f, "{} ", size.keyword())?;
        }
        write!(f, "{}", self.dst)?;
        if let Some(src) = &self.src {
            write!(f, ", {src}")?;
        }
        Ok(())
    }
}

/// How a decoded pass is laid out as assembly text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Emit the `bits 16` directive and a blank line first.
    pub header: bool,
    /// Show the buffer offset of each instruction.
    pub offsets: bool,
    /// Show the raw bytes of each instruction.
    pub show_bytes: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            header: true,
            offsets: false,
            show_bytes: false,
        }
    }
}

pub const HEADER: &str = "bits 16";

/// Renders decoded instructions into one listing. `bytes` is the buffer they
/// were decoded from, used only when raw bytes are shown. Offsets and bytes
/// go on a `;` comment line above each instruction.
pub fn render_listing(decoded: &[Decoded], bytes: &[u8], cfg: &ListingConfig) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(decoded.len() + 2);
    if cfg.header {
        lines.push(HEADER.to_string());
        lines.push(String::new());
    }
    for d in decoded {
        let mut line = String::new();
        if cfg.offsets || cfg.show_bytes {
            line.push_str("; ");
            if cfg.offsets {
                line.push_str(&format!("{:04x}: ", d.offset));
            }
            if cfg.show_bytes {
                let raw = bytes.get(d.offset..d.end()).unwrap_or(&[]);
                for b in raw {
                    line.push_str(&format!("{b:02x} "));
                }
            }
            line = format!("{}\n", line.trim_end());
        }
        line.push_str(&fmt_decoded(d));
        lines.push(line);
    }
    lines.join("\n")
}
