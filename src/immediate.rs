//! Little-endian immediate and displacement reconstruction.

use crate::decoder::Width;

#[inline]
pub fn sign_ext(v: u32, bits: u32) -> i32 {
    let s = 32 - bits;
    ((v << s) as i32) >> s
}

/// One byte, optionally read as two's complement.
pub fn byte_value(lo: u8, signed: bool) -> i32 {
    if signed { sign_ext(lo as u32, 8) } else { lo as i32 }
}

/// Two bytes, low byte first, optionally read as two's complement.
pub fn word_value(lo: u8, hi: u8, signed: bool) -> i32 {
    let v = u16::from_le_bytes([lo, hi]) as u32;
    if signed { sign_ext(v, 16) } else { v as i32 }
}

/// Decodes `width` bytes from the front of `raw`. `raw` must hold at least
/// `width` bytes; callers check the buffer bounds before slicing.
pub fn decode(raw: &[u8], width: Width, signed: bool) -> i32 {
    match width {
        Width::Byte => byte_value(raw[0], signed),
        Width::Word => word_value(raw[0], raw[1], signed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_byte() {
        assert_eq!(byte_value(0xFF, true), -1);
        assert_eq!(byte_value(0x7F, true), 127);
        assert_eq!(byte_value(0x80, true), -128);
        assert_eq!(byte_value(0xFF, false), 255);
    }

    #[test]
    fn signed_word() {
        assert_eq!(word_value(0xFF, 0xFF, true), -1);
        assert_eq!(word_value(0x00, 0x80, true), -32768);
        assert_eq!(word_value(0xFF, 0x7F, true), 32767);
        assert_eq!(word_value(0xFF, 0xFF, false), 65535);
        assert_eq!(decode(&[0x2C, 0x01], Width::Word, true), 300);
        assert_eq!(decode(&[0xF6], Width::Byte, true), -10);
    }
}
