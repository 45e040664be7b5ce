//! Induced sorting for the fixed byte and byte-pair alphabets, the
//! non-recursive top level of the engine as described in
//! [Two Efficient Algorithms for Linear Time Suffix Array
//! Construction](https://ieeexplore.ieee.org/document/5582081).
//! Colliding lms substring names hand a reduced problem to the recursive
//! integer core.

use super::buckets::{index2, index4};
use super::ints;
use super::lms;
use super::tag;
use super::Error;

/// Input symbol of the fixed-alphabet entry points.
pub trait Symbol: Copy + Ord {
    const ALPHABET: usize;

    fn index(self) -> usize;
}

impl Symbol for u8 {
    const ALPHABET: usize = 1 << 8;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl Symbol for u16 {
    const ALPHABET: usize = 1 << 16;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Sort the suffixes of `t` into `sa[0..n)` using `sa`'s tail as scratch.
/// `buckets` must hold `8·ALPHABET` counters. Requires `n >= 2`.
pub fn sort<S: Symbol>(
    t: &[S],
    sa: &mut [i64],
    buckets: &mut [i64],
    freq: Option<&mut [i64]>,
) -> Result<(), Error> {
    let n = t.len();
    debug_assert!(n >= 2);
    debug_assert!(sa.len() >= n);
    debug_assert!(buckets.len() == 8 * S::ALPHABET);

    let m = count_and_gather_lms_suffixes(t, sa, buckets);
    initialize_buckets_start_and_end::<S>(buckets, freq);

    if m > 0 {
        let first_lms = sa[n - m] as usize;
        let left_count = initialize_buckets_for_lms_radix_sort(t, buckets, first_lms);

        radix_sort_lms_suffixes(t, sa, n, m, buckets);

        initialize_buckets_for_partial_sorting(t, buckets, first_lms, left_count);
        induce_partial_order(t, sa, n, buckets, first_lms, left_count);

        let names = lms::renumber_and_gather_lms_suffixes(sa, n, m);
        if names < m as i64 {
            // sub-problem text sits in the tail; its workspace is the rest
            let (sub_sa, sub_t) = sa.split_at_mut(sa.len() - m);
            ints::sort(sub_t, sub_sa, names)?;

            gather_lms_suffixes(t, sa);
            lms::reconstruct_lms_suffixes(sa, n, m);
        }

        place_lms_suffixes_interval::<S>(sa, n, m, buckets);
    } else {
        for v in sa[..n].iter_mut() {
            *v = 0;
        }
    }

    induce_final_order(t, sa, n, buckets);
    Ok(())
}

/// Right-to-left type scan: gathers the lms suffix positions into
/// `sa[n - m..n)` and fills the `(character, transition)` histogram.
/// Returns the number of lms suffixes.
fn count_and_gather_lms_suffixes<S: Symbol>(t: &[S], sa: &mut [i64], buckets: &mut [i64]) -> usize {
    for b in buckets[..4 * S::ALPHABET].iter_mut() {
        *b = 0;
    }

    let n = t.len();
    let mut m = n - 1;
    let mut c_next = t[n - 1];
    let mut next_l = true;

    for i in (0..n - 1).rev() {
        let c = t[i];
        let cur_l = c > c_next || (c == c_next && next_l);
        sa[m] = (i + 1) as i64;
        if cur_l && !next_l {
            m -= 1;
        }
        buckets[index4(c_next.index(), 2 * next_l as usize + cur_l as usize)] += 1;
        c_next = c;
        next_l = cur_l;
    }

    // position 0 is preceded by the sentinel, which is never l-type
    sa[m] = 0;
    buckets[index4(c_next.index(), 2 * next_l as usize)] += 1;

    n - 1 - m
}

/// Re-gather the lms suffix positions into the tail of `sa` after the
/// recursion destroyed the first copy.
fn gather_lms_suffixes<S: Symbol>(t: &[S], sa: &mut [i64]) {
    let n = t.len();
    let mut m = n - 1;
    let mut c_next = t[n - 1];
    let mut next_l = true;

    for i in (0..n - 1).rev() {
        let c = t[i];
        let cur_l = c > c_next || (c == c_next && next_l);
        sa[m] = (i + 1) as i64;
        if cur_l && !next_l {
            m -= 1;
        }
        c_next = c;
        next_l = cur_l;
    }
    sa[m] = 0;
}

/// Derive the per-character start and end tables from the histogram and
/// report the symbol frequencies when asked for.
fn initialize_buckets_start_and_end<S: Symbol>(buckets: &mut [i64], freq: Option<&mut [i64]>) {
    let a = S::ALPHABET;
    let mut sum = 0;
    for c in 0..a {
        let total = buckets[index4(c, 0)]
            + buckets[index4(c, 1)]
            + buckets[index4(c, 2)]
            + buckets[index4(c, 3)];
        buckets[6 * a + c] = sum;
        sum += total;
        buckets[7 * a + c] = sum;
    }

    if let Some(freq) = freq {
        for c in 0..a {
            freq[c] = buckets[7 * a + c] - buckets[6 * a + c];
        }
    }
}

/// Remove the text prefix before the first lms suffix from the histogram
/// and lay out the radix-sort cursors in the scratch region. Returns the
/// number of workspace slots owned by the left-to-right scan.
fn initialize_buckets_for_lms_radix_sort<S: Symbol>(
    t: &[S],
    buckets: &mut [i64],
    first_lms: usize,
) -> i64 {
    let mut c_next = t[first_lms];
    let mut next_l = false;

    for i in (0..first_lms).rev() {
        let c = t[i];
        let cur_l = c > c_next || (c == c_next && next_l);
        buckets[index4(c_next.index(), 2 * next_l as usize + cur_l as usize)] -= 1;
        c_next = c;
        next_l = cur_l;
    }
    buckets[index4(c_next.index(), 2 * next_l as usize)] -= 1;

    let (hist, temp) = buckets.split_at_mut(4 * S::ALPHABET);
    let mut sum = 0;
    for c in 0..S::ALPHABET {
        temp[index2(c, 1)] = sum;
        sum += hist[index4(c, 1)] + hist[index4(c, 3)];
        temp[index2(c, 0)] = sum;
    }
    sum
}

/// Scatter the gathered lms suffixes (all but the first) to the s-type
/// ends of their character buckets.
fn radix_sort_lms_suffixes<S: Symbol>(
    t: &[S],
    sa: &mut [i64],
    n: usize,
    m: usize,
    buckets: &mut [i64],
) {
    let cursors = &mut buckets[4 * S::ALPHABET..];
    for i in (n - m + 1..n).rev() {
        let p = sa[i];
        let b = &mut cursors[index2(t[p as usize].index(), 0)];
        *b -= 1;
        sa[*b as usize] = p;
    }
}

/// Turn the consumed histogram into the cursor sets of the partial
/// induction: scratch holds the left-to-right cursors, the low region the
/// right-to-left cursors and the per-character lms boundaries.
fn initialize_buckets_for_partial_sorting<S: Symbol>(
    t: &[S],
    buckets: &mut [i64],
    first_lms: usize,
    left_count: i64,
) {
    let a = S::ALPHABET;
    buckets[index4(t[first_lms].index(), 1)] += 1;

    let mut sum0 = left_count + 1;
    let mut sum1 = 0;
    for c in 0..a {
        buckets[4 * a + index2(c, 0)] = sum0;
        sum0 += buckets[index4(c, 0)] + buckets[index4(c, 2)];
        sum1 += buckets[index4(c, 1)];
        buckets[index2(c, 0)] = sum0;
        buckets[index2(c, 1)] = sum1;
    }
}

/// Left-to-right pass of the partial induction. Each processed slot pulls
/// its left neighbour into place and records whether that neighbour opens
/// a new distinct-name run. Returns the running name counter.
fn partial_sorting_scan_left_to_right<S: Symbol>(
    t: &[S],
    sa: &mut [i64],
    n: usize,
    buckets: &mut [i64],
    left_count: i64,
) -> i64 {
    let a = S::ALPHABET;

    let v = index2(t[n - 1].index(), (t[n - 2] >= t[n - 1]) as usize);
    sa[buckets[4 * a + v] as usize] = tag::mark((n - 1) as i64);
    buckets[4 * a + v] += 1;
    let mut d = 1;
    buckets[2 * a + v] = d;

    for i in 0..left_count as usize {
        let e = sa[i];
        d += tag::is_marked(e) as i64;
        let p = tag::strip(e) as usize;
        debug_assert!(p >= 2);

        let v = index2(t[p - 1].index(), (t[p - 2] >= t[p - 1]) as usize);
        let w = buckets[4 * a + v] as usize;
        sa[w] = tag::mark_if((p - 1) as i64, buckets[2 * a + v] != d);
        buckets[4 * a + v] += 1;
        buckets[2 * a + v] = d;
    }
    d
}

/// Between the two partial scans, slide every distinct-name mark one run
/// leftwards inside its bucket with a cumulative-xor sweep, so a mark ends
/// up on the first member of each run.
fn partial_sorting_shift_markers<S: Symbol>(sa: &mut [i64], buckets: &[i64]) {
    let a = S::ALPHABET;
    for c in (1..a).rev() {
        let mut s = tag::MARK;
        let from = buckets[index2(c - 1, 0)] as usize;
        let to = buckets[4 * a + index2(c, 0)] as usize;
        for i in (from..to).rev() {
            let p = sa[i];
            let q = (p & tag::MARK) ^ s;
            s ^= q;
            sa[i] = p ^ q;
        }
    }
}

/// Right-to-left pass of the partial induction; symmetric to the
/// left-to-right pass with a strict comparison as the class tie-break.
/// Deposits the sorted lms suffixes in the head of the workspace.
fn partial_sorting_scan_right_to_left<S: Symbol>(
    t: &[S],
    sa: &mut [i64],
    n: usize,
    buckets: &mut [i64],
    first_lms: usize,
    left_count: i64,
    mut d: i64,
) {
    let a = S::ALPHABET;
    for i in (left_count as usize + 1..n - first_lms).rev() {
        let e = sa[i];
        d += tag::is_marked(e) as i64;
        let p = tag::strip(e) as usize;
        debug_assert!(p >= 2);

        let v = index2(t[p - 1].index(), (t[p - 2] > t[p - 1]) as usize);
        buckets[v] -= 1;
        let w = buckets[v] as usize;
        sa[w] = tag::mark_if((p - 1) as i64, buckets[2 * a + v] != d);
        buckets[2 * a + v] = d;
    }
}

fn induce_partial_order<S: Symbol>(
    t: &[S],
    sa: &mut [i64],
    n: usize,
    buckets: &mut [i64],
    first_lms: usize,
    left_count: i64,
) {
    let a = S::ALPHABET;
    for b in buckets[2 * a..4 * a].iter_mut() {
        *b = 0;
    }

    let d = partial_sorting_scan_left_to_right(t, sa, n, buckets, left_count);
    partial_sorting_shift_markers::<S>(sa, buckets);
    partial_sorting_scan_right_to_left(t, sa, n, buckets, first_lms, left_count, d);
}

/// Move the sorted lms suffixes from the head of the workspace to the
/// s-type ends of their buckets, zeroing everything in between.
fn place_lms_suffixes_interval<S: Symbol>(sa: &mut [i64], n: usize, mut m: usize, buckets: &[i64]) {
    let a = S::ALPHABET;
    let mut j = n;
    for c in (0..a - 1).rev() {
        let l = (buckets[index2(c, 1) + index2(1, 0)] - buckets[index2(c, 1)]) as usize;
        if l > 0 {
            let i = buckets[7 * a + c] as usize;
            for v in sa[i..j].iter_mut() {
                *v = 0;
            }
            m -= l;
            sa.copy_within(m..m + l, i - l);
            j = i - l;
        }
    }
    for v in sa[..j].iter_mut() {
        *v = 0;
    }
}

fn final_sorting_scan_left_to_right<S: Symbol>(t: &[S], sa: &mut [i64], n: usize, buckets: &mut [i64]) {
    let a = S::ALPHABET;
    let start = &mut buckets[6 * a..7 * a];

    let w = start[t[n - 1].index()] as usize;
    sa[w] = tag::mark_if((n - 1) as i64, t[n - 2] < t[n - 1]);
    start[t[n - 1].index()] += 1;

    for i in 0..n {
        let e = sa[i];
        sa[i] = tag::flip(e);
        if e > 0 {
            let p = (e - 1) as usize;
            let left = t[p - (p > 0) as usize];
            let w = start[t[p].index()] as usize;
            sa[w] = tag::mark_if(p as i64, left < t[p]);
            start[t[p].index()] += 1;
        }
    }
}

fn final_sorting_scan_right_to_left<S: Symbol>(t: &[S], sa: &mut [i64], n: usize, buckets: &mut [i64]) {
    let a = S::ALPHABET;
    let end = &mut buckets[7 * a..8 * a];

    for i in (0..n).rev() {
        let e = sa[i];
        sa[i] = tag::strip(e);
        if e > 0 {
            let p = (e - 1) as usize;
            let left = t[p - (p > 0) as usize];
            end[t[p].index()] -= 1;
            let w = end[t[p].index()] as usize;
            sa[w] = tag::mark_if(p as i64, left > t[p]);
        }
    }
}

fn induce_final_order<S: Symbol>(t: &[S], sa: &mut [i64], n: usize, buckets: &mut [i64]) {
    final_sorting_scan_left_to_right(t, sa, n, buckets);
    final_sorting_scan_right_to_left(t, sa, n, buckets);
}
