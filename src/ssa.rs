use super::alphabet::Alphabet;
use super::pack::PackedText;
use super::sais;
use super::sais::Error;

/// Canonicalise leucine to isoleucine, the usual preprocessing of
/// proteomic texts whose mass spectrometry cannot tell the two apart.
pub fn translate_l_to_i(text: &mut [u8]) {
    for c in text.iter_mut() {
        if *c == b'L' {
            *c = b'I';
        }
    }
}

/// Build the sparse suffix array of `text`: the suffixes starting at
/// multiples of `sparseness`, in lexicographic order, as positions into
/// `text`.
///
/// A sparseness factor of one bypasses packing and sorts the raw bytes.
/// Wider factors sort the packed sequence instead; the group width
/// `sparseness · bits_per_char` must stay below 32 bits so the packed
/// alphabet fits the engine.
pub fn build_sparse_sa(text: &[u8], sparseness: u8, alphabet: &Alphabet) -> Result<Vec<i64>, Error> {
    if sparseness < 1 || sparseness > 8 {
        return Err(Error::InvalidArgument);
    }

    let n = text.len();
    let k = sparseness as usize;
    let sa_len = (n + k - 1) / k;
    let mut sa = alloc_sa(sa_len)?;

    if sparseness == 1 {
        sais::suffix_array_bytes(text, &mut sa, None)?;
        return Ok(sa);
    }

    match PackedText::pack(text, sparseness, alphabet)? {
        PackedText::Bytes(packed) => sais::suffix_array_bytes(&packed, &mut sa, None)?,
        PackedText::Pairs(packed) => sais::suffix_array_pairs(&packed, &mut sa, None)?,
        PackedText::Words(packed) => {
            let bits = sparseness as u32 * alphabet.bits_per_char() as u32;
            if bits > 31 {
                // a full 32-bit group would need an alphabet beyond the
                // engine's 2^31 cap
                return Err(Error::InvalidArgument);
            }
            let mut wide: Vec<i64> = packed.iter().map(|&w| w as i64).collect();
            sais::suffix_array_ints(&mut wide, &mut sa, 1i64 << bits)?;
        }
        PackedText::Wide(_) => return Err(Error::InvalidArgument),
    }

    for v in sa.iter_mut() {
        *v *= k as i64;
    }
    Ok(sa)
}

/// Reference construction: build the full suffix array of the raw text,
/// then keep the entries divisible by the sparseness factor in order.
pub fn build_sparse_sa_subsampled(text: &[u8], sparseness: u8) -> Result<Vec<i64>, Error> {
    if sparseness < 1 || sparseness > 8 {
        return Err(Error::InvalidArgument);
    }

    let n = text.len();
    let mut sa = alloc_sa(n)?;
    sais::suffix_array_bytes(text, &mut sa, None)?;

    if sparseness > 1 {
        let k = sparseness as i64;
        let mut kept = 0;
        for i in 0..n {
            if sa[i] % k == 0 {
                sa[kept] = sa[i];
                kept += 1;
            }
        }
        sa.truncate(kept);
    }
    Ok(sa)
}

fn alloc_sa(len: usize) -> Result<Vec<i64>, Error> {
    let mut sa = Vec::new();
    sa.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
    sa.resize(len, 0);
    Ok(sa)
}
