use super::Error;

/// Entries of the stack-hosted bucket buffer available to every level of
/// the recursion. Alphabets with `6·k` at most this size never allocate.
pub const LOCAL_BUFFER_SIZE: usize = 1024;

/// Index into a 2k layout: character `c`, s-end flag `s`.
#[inline]
pub fn index2(c: usize, s: usize) -> usize {
    2 * c + s
}

/// Index into a 4k layout: character `c`, type transition `t` in `0..4`.
/// The transition is `2·is_l(i) + is_l(i - 1)` for position `i`.
#[inline]
pub fn index4(c: usize, t: usize) -> usize {
    4 * c + t
}

/// Where the bucket counters of one recursion level live.
///
/// The descriptor carries no borrow of its own; [`BucketSpace::split`]
/// hands out disjoint `(workspace, buckets)` views for the passes that
/// need both, and the passes that only touch the workspace use the
/// suffix array directly in between.
pub enum BucketSpace {
    /// Counters embedded at this offset in the suffix array's own tail.
    Tail(usize),
    /// This many counters at the front of the shared stack buffer.
    Local(usize),
    /// Counters in an engine-owned heap allocation.
    Heap(Vec<i64>),
}

impl BucketSpace {
    pub fn split<'a>(
        &'a mut self,
        sa: &'a mut [i64],
        local: &'a mut [i64],
    ) -> (&'a mut [i64], &'a mut [i64]) {
        match self {
            BucketSpace::Tail(at) => sa.split_at_mut(*at),
            BucketSpace::Local(width) => (sa, &mut local[..*width]),
            BucketSpace::Heap(v) => (sa, &mut v[..]),
        }
    }
}

/// Allocate a zeroed counter area, reporting failure instead of aborting.
pub fn heap_buckets(len: usize) -> Result<Vec<i64>, Error> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
    v.resize(len, 0);
    Ok(v)
}
