pub mod addressing;
pub mod bits;
pub mod decoder;
pub mod disasm;
pub mod dispatch;
pub mod encode;
pub mod immediate;
pub mod instructions;
pub mod memory;

pub mod isa {
    pub mod i8086; // 8086 mov/add/sub/cmp/short-jump subset
}

pub use decoder::{DecodeError, Decoded, Decoder, Operand, Width};
pub use disasm::{render_listing, ListingConfig};
pub use dispatch::{decode_all, disassemble};
pub use isa::i8086::I8086Decoder;
