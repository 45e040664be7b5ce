//! Linear-time suffix array construction by induced sorting.
//!
//! The algorithm follows [Two Efficient Algorithms for Linear Time Suffix
//! Array Construction](https://ieeexplore.ieee.org/document/5582081):
//! lms suffixes are radix-sorted into their bucket ends, a partial
//! induction orders them while tracking distinct lms substring names in
//! the sign bits of the workspace, a reduced problem is solved
//! recursively whenever names collide, and a final pair of induction
//! scans produces the suffix array.

mod buckets;
mod ints;
mod lms;
mod tag;
mod wide;

use std::error;
use std::fmt;

use self::buckets::heap_buckets;
use self::wide::Symbol;

/// Failures the engine can report. Anything else is a caller contract
/// violation and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A precondition failed before any state was touched: the suffix
    /// array is shorter than the text, a frequency table has the wrong
    /// length, or an alphabet size is out of range.
    InvalidArgument,
    /// Bucket memory could not be allocated. The workspace may hold
    /// partial state and must be discarded.
    OutOfMemory,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidArgument => write!(f, "invalid argument"),
            Error::OutOfMemory => write!(f, "bucket allocation failed"),
        }
    }
}

impl error::Error for Error {}

/// Build the suffix array of a byte text into `sa[0..text.len())`.
///
/// `sa` must be at least as long as `text`; anything beyond is used as
/// scratch and speeds up deep recursions. `freq`, when given, must hold
/// 256 counters and receives the byte frequencies of the text.
pub fn suffix_array_bytes(
    text: &[u8],
    sa: &mut [i64],
    freq: Option<&mut [i64]>,
) -> Result<(), Error> {
    suffix_array_wide(text, sa, freq)
}

/// Build the suffix array of a 16-bit symbol text into
/// `sa[0..text.len())`; the alphabet is implicitly `2^16`. `freq`, when
/// given, must hold 65536 counters.
pub fn suffix_array_pairs(
    text: &[u16],
    sa: &mut [i64],
    freq: Option<&mut [i64]>,
) -> Result<(), Error> {
    suffix_array_wide(text, sa, freq)
}

/// Build the suffix array of an integer text over the alphabet `[0, k)`
/// into `sa[0..text.len())`.
///
/// The text must be writable: when lms names collide under tight slack,
/// unique names are marked in the sign bits of `text` and cleared again
/// before returning. Every element must lie in `[0, k)`.
pub fn suffix_array_ints(text: &mut [i64], sa: &mut [i64], k: i64) -> Result<(), Error> {
    if sa.len() < text.len() || k < 1 || k > 1 << 31 {
        return Err(Error::InvalidArgument);
    }

    let n = text.len();
    if n < 2 {
        if n == 1 {
            sa[0] = 0;
        }
        return Ok(());
    }

    ints::sort(text, sa, k)
}

fn suffix_array_wide<S: Symbol>(
    text: &[S],
    sa: &mut [i64],
    freq: Option<&mut [i64]>,
) -> Result<(), Error> {
    if sa.len() < text.len() {
        return Err(Error::InvalidArgument);
    }
    if let Some(freq) = &freq {
        if freq.len() != S::ALPHABET {
            return Err(Error::InvalidArgument);
        }
    }

    let n = text.len();
    if n < 2 {
        if let Some(freq) = freq {
            for f in freq.iter_mut() {
                *f = 0;
            }
            if n == 1 {
                freq[text[0].index()] += 1;
            }
        }
        if n == 1 {
            sa[0] = 0;
        }
        return Ok(());
    }

    let mut buckets = heap_buckets(8 * S::ALPHABET)?;
    wide::sort(text, sa, &mut buckets, freq)
}
