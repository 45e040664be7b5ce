//! Sparse suffix array construction for small-alphabet texts.
//!
//! A sparse suffix array holds the suffixes starting at multiples of a
//! sparseness factor `k`. Instead of building the full array and
//! subsampling it, the text is bit-packed — every group of `k`
//! consecutive characters becomes one wider symbol — and the suffix
//! array of the packed sequence is built directly with a linear-time
//! induced-sorting algorithm, as described in
//! [Two Efficient Algorithms for Linear Time Suffix Array
//! Construction](https://ieeexplore.ieee.org/document/5582081).
//! Packed positions scale back to text coordinates by `k`.
//!
//! The [`sais`] module exposes the sorting engine on its own; the rest
//! of the crate is the packing pipeline and the on-disk format used by
//! the `build_ssa` driver.

mod alphabet;
mod pack;
pub mod sais;
mod ssa;
mod store;
#[cfg(test)]
mod tests;

pub use alphabet::Alphabet;
pub use pack::PackedText;
pub use sais::{suffix_array_bytes, suffix_array_ints, suffix_array_pairs, Error};
pub use ssa::{build_sparse_sa, build_sparse_sa_subsampled, translate_l_to_i};
pub use store::{compress_sa, decompress_sa, entry_bits, read_ssa, write_ssa, SsaHeader};
