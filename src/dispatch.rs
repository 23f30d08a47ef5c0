use tracing::{debug, trace};

use crate::decoder::{DecodeError, Decoded, Decoder};
use crate::disasm::fmt_decoded;
use crate::isa::i8086::I8086Decoder;

/// Decodes the whole buffer front to back. The first error aborts the pass;
/// nothing after a bad instruction is decoded.
pub fn decode_all<D: Decoder>(dec: &D, bytes: &[u8]) -> Result<Vec<Decoded>, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    debug!(len = bytes.len(), "decode pass start");
    let mut out = Vec::new();
    let mut cursor = 0usize;
    while cursor < bytes.len() {
        let d = dec.decode(bytes, cursor)?;
        trace!(offset = cursor, len = d.len, text = %d, "decoded");
        cursor += d.len as usize;
        out.push(d);
    }
    debug!(count = out.len(), "decode pass done");
    Ok(out)
}

/// Decodes `bytes` with the 8086 decoder and renders one line per instruction.
pub fn disassemble(bytes: &[u8]) -> Result<Vec<String>, DecodeError> {
    let decoded = decode_all(&I8086Decoder::new(), bytes)?;
    Ok(decoded.iter().map(fmt_decoded).collect())
}
