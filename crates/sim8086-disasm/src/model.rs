use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use sim8086::disasm::fmt_decoded;
use sim8086::Decoded;

/// Reads `path`, drops `skip` leading bytes and keeps at most `len` after that.
pub fn load_raw_bin(path: &Path, skip: usize, len: Option<usize>) -> Result<Vec<u8>> {
    let file = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    anyhow::ensure!(!payload.is_empty(), "nothing to read from {}", path.display());
    Ok(payload.to_vec())
}

/// `listing_37` -> `listing_37.asm`, `prog.bin` -> `prog.bin.asm`
pub fn default_out_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".asm");
    PathBuf::from(name)
}

#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub offset: usize,
    pub bytes: Vec<u8>,
    pub text: String,
    pub instruction: Decoded,
}

pub fn records(decoded: &[Decoded], bytes: &[u8]) -> Vec<Record> {
    decoded
        .iter()
        .map(|d| Record {
            offset: d.offset,
            bytes: bytes.get(d.offset..d.end()).unwrap_or(&[]).to_vec(),
            text: fmt_decoded(d),
            instruction: *d,
        })
        .collect()
}
