#[cfg(test)]
mod tests;

use bincode::config as bincode_config;
use serde::{Deserialize, Serialize};
use std::io::prelude::*;
use std::io::{Error as IoError, ErrorKind, Result};

/// The fixed ten-byte file header preceding the stored entries: bits per
/// element (64 when uncompressed), the sparseness factor, then the entry
/// count as a `u64`. It serializes as little-endian bincode, which for
/// these fields is exactly the raw bytes in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsaHeader {
    pub bits_per_element: u8,
    pub sparseness_factor: u8,
    pub sa_length: u64,
}

impl SsaHeader {
    pub fn dump<W: Write>(&self, file: W) -> Result<()> {
        let mut cfg = bincode_config();
        cfg.little_endian();
        cfg.serialize_into(file, self).map_err(error_conv)
    }

    pub fn load<R: Read>(file: R) -> Result<Self> {
        let mut cfg = bincode_config();
        cfg.little_endian();
        cfg.deserialize_from(file).map_err(error_conv)
    }
}

/// Bits needed to address a text of the given length, the width used for
/// compressed entries.
pub fn entry_bits(text_len: u64) -> u8 {
    ((64 - text_len.leading_zeros()) as u8).max(1)
}

/// Squeeze the entries into `bits`-wide fields, big-endian within each
/// word, truncating the vector to the packed length.
pub fn compress_sa(sa: &mut Vec<u64>, bits: u8) {
    if sa.is_empty() {
        return;
    }

    let mut element = 0u64;
    let mut shift = 64 - bits as i32;
    let mut packed = 0usize;

    for i in 0..sa.len() {
        let v = sa[i];
        if shift < 0 {
            // the entry straddles a word boundary
            element |= v >> -shift;
            sa[packed] = element;
            packed += 1;
            element = 0;
            shift += 64;
        }
        element |= v << shift;
        shift -= bits as i32;
    }

    sa[packed] = element;
    sa.truncate(packed + 1);
}

/// Expand `count` entries of `bits` width back out of the packed words.
pub fn decompress_sa(packed: &[u64], count: usize, bits: u8) -> Vec<u64> {
    let mut sa = Vec::with_capacity(count);
    let mut shift = 0i32;
    let mut i = 0usize;

    for _ in 0..count {
        let mut v = (packed[i] << shift) >> (64 - bits as i32);
        shift += bits as i32;
        if shift >= 64 {
            i += 1;
            shift -= 64;
            if shift > 0 {
                v |= packed[i] >> (64 - shift);
            }
        }
        sa.push(v);
    }
    sa
}

/// Write header and suffix array, bit-compressing the entries when asked
/// to. Compressed entries are as wide as an index into the original text,
/// whose length the entry count and the sparseness factor recover.
pub fn write_ssa<W: Write>(
    mut file: W,
    sparseness_factor: u8,
    sa: &[i64],
    compressed: bool,
) -> Result<()> {
    let bits_per_element = if compressed {
        entry_bits(sa.len() as u64 * sparseness_factor as u64)
    } else {
        64
    };
    let header = SsaHeader {
        bits_per_element,
        sparseness_factor,
        sa_length: sa.len() as u64,
    };
    header.dump(&mut file)?;

    if compressed {
        let mut words: Vec<u64> = sa.iter().map(|&v| v as u64).collect();
        compress_sa(&mut words, bits_per_element);
        for w in words {
            file.write_all(&w.to_le_bytes())?;
        }
    } else {
        for &v in sa {
            file.write_all(&(v as u64).to_le_bytes())?;
        }
    }
    Ok(())
}

/// Read a file written by [`write_ssa`] back into header and entries.
pub fn read_ssa<R: Read>(mut file: R) -> Result<(SsaHeader, Vec<i64>)> {
    let header = SsaHeader::load(&mut file)?;
    let count = header.sa_length as usize;

    let mut raw = Vec::new();
    file.read_to_end(&mut raw)?;
    if raw.len() % 8 != 0 {
        return Err(IoError::new(ErrorKind::InvalidData, "truncated payload"));
    }
    let words: Vec<u64> = raw
        .chunks_exact(8)
        .map(|c| {
            let mut b = [0u8; 8];
            b.copy_from_slice(c);
            u64::from_le_bytes(b)
        })
        .collect();

    let entries = if header.bits_per_element == 64 {
        if words.len() < count {
            return Err(IoError::new(ErrorKind::InvalidData, "truncated payload"));
        }
        words[..count].iter().map(|&w| w as i64).collect()
    } else {
        let needed = (count * header.bits_per_element as usize + 63) / 64;
        if words.len() < needed {
            return Err(IoError::new(ErrorKind::InvalidData, "truncated payload"));
        }
        decompress_sa(&words, count, header.bits_per_element)
            .into_iter()
            .map(|w| w as i64)
            .collect()
    };

    Ok((header, entries))
}

fn error_conv(err: bincode::Error) -> IoError {
    use bincode::ErrorKind as BincodeErrorKind;

    match *err {
        BincodeErrorKind::Io(e) => e,
        BincodeErrorKind::Custom(e) => IoError::new(ErrorKind::Other, e),
        e => IoError::new(ErrorKind::InvalidData, e),
    }
}
