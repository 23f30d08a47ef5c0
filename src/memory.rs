use crate::decoder::DecodeError;

/// Read-only view of one instruction's bytes, anchored at its first byte.
/// Every read is bounds-checked against the end of the buffer so a short
/// tail surfaces as [`DecodeError::TruncatedInstruction`].
#[derive(Debug, Clone, Copy)]
pub struct ByteWindow<'a> {
    bytes: &'a [u8],
    start: usize,
}

impl<'a> ByteWindow<'a> {
    pub fn new(bytes: &'a [u8], start: usize) -> Self {
        Self { bytes, start }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn available(&self) -> usize {
        self.bytes.len().saturating_sub(self.start)
    }

    /// Fails unless at least `needed` bytes remain from the window start.
    pub fn require(&self, needed: usize) -> Result<(), DecodeError> {
        let available = self.available();
        if needed > available {
            return Err(DecodeError::TruncatedInstruction { offset: self.start, needed, available });
        }
        Ok(())
    }

    pub fn read_u8(&self, idx: usize) -> Result<u8, DecodeError> {
        self.require(idx + 1)?;
        Ok(self.bytes[self.start + idx])
    }

    pub fn read_u16(&self, idx: usize) -> Result<u16, DecodeError> {
        self.require(idx + 2)?;
        let off = self.start + idx;
        Ok(u16::from_le_bytes([self.bytes[off], self.bytes[off + 1]]))
    }

    /// The first `len` bytes of the instruction.
    pub fn slice(&self, len: usize) -> Result<&'a [u8], DecodeError> {
        self.require(len)?;
        Ok(&self.bytes[self.start..self.start + len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let buf = [0xAA, 0x34, 0x12];
        let w = ByteWindow::new(&buf, 1);
        assert_eq!(w.read_u8(0).unwrap(), 0x34);
        assert_eq!(w.read_u16(0).unwrap(), 0x1234);
        assert_eq!(w.available(), 2);
    }

    #[test]
    fn short_read_reports_truncation() {
        let buf = [0x89];
        let w = ByteWindow::new(&buf, 0);
        assert_eq!(
            w.read_u8(1),
            Err(DecodeError::TruncatedInstruction { offset: 0, needed: 2, available: 1 })
        );
        assert!(w.slice(1).is_ok());
    }
}
