//! Induced sorting for writable integer alphabets as described in
//! [Two Efficient Algorithms for Linear Time Suffix Array
//! Construction](https://ieeexplore.ieee.org/document/5582081),
//! specialized for the reduced problems of the recursion: the bucket
//! counters live in the workspace tail, the shared stack buffer or a
//! heap allocation depending on slack, and colliding lms names are
//! either gathered into the tail or compacted through temporary sign-bit
//! marks on the text.

use super::buckets::{heap_buckets, index2, index4, BucketSpace, LOCAL_BUFFER_SIZE};
use super::lms;
use super::tag;
use super::Error;

/// Sort the suffixes of `t` over the alphabet `[0, k)` into `sa[0..n)`,
/// using the tail of `sa` as scratch.
pub fn sort(t: &mut [i64], sa: &mut [i64], k: i64) -> Result<(), Error> {
    let mut local = [0i64; LOCAL_BUFFER_SIZE];
    sort_recursive(t, sa, k, &mut local)
}

fn sort_recursive(
    t: &mut [i64],
    sa: &mut [i64],
    k: i64,
    local: &mut [i64; LOCAL_BUFFER_SIZE],
) -> Result<(), Error> {
    let n = t.len();
    if n < 2 {
        if n == 1 {
            sa[0] = 0;
        }
        return Ok(());
    }

    let fs = sa.len() - n;
    if k > 0 && ((fs as i64 / k) >= 6 || (LOCAL_BUFFER_SIZE as i64 / k) >= 6) {
        sort_six_k(t, sa, k, local)
    } else {
        sort_one_k(t, sa, k, local)
    }
}

/// The histogram layout: six counters per character.
fn sort_six_k(
    t: &mut [i64],
    sa: &mut [i64],
    k: i64,
    local: &mut [i64; LOCAL_BUFFER_SIZE],
) -> Result<(), Error> {
    let n = t.len();
    let len = sa.len();
    let ku = k as usize;

    let mut space = if LOCAL_BUFFER_SIZE / ku >= 6 {
        BucketSpace::Local(6 * ku)
    } else {
        BucketSpace::Tail(len - 6 * ku)
    };

    let m = {
        let (work, bkt) = space.split(sa, local);
        count_and_gather_lms_suffixes_4k(t, work, ku, bkt)
    };

    if m > 1 {
        for v in sa[..n - m].iter_mut() {
            *v = 0;
        }

        let first_lms = sa[n - m] as usize;
        let left_count = {
            let (_, bkt) = space.split(sa, local);
            initialize_buckets_for_lms_radix_sort_6k(t, ku, bkt, first_lms)
        };

        {
            let (work, bkt) = space.split(sa, local);
            radix_sort_lms_suffixes_6k(t, work, n, m, &mut bkt[4 * ku..5 * ku]);
            if ((n / 8192) as i64) < k {
                radix_sort_set_markers_6k(work, ku, &bkt[4 * ku..5 * ku]);
            }
        }

        {
            let (work, bkt) = space.split(sa, local);
            initialize_buckets_for_partial_sorting_6k(t, ku, bkt, first_lms, left_count);
            induce_partial_order_6k(t, work, n, ku, bkt, first_lms, left_count);
        }

        let names = if ((n / 8192) as i64) < k {
            renumber_and_mark_distinct_lms_4k(sa, n, m)
        } else {
            lms::renumber_and_gather_lms_suffixes(sa, n, m)
        };

        if names < m as i64 {
            let f = if ((n / 8192) as i64) < k {
                compact_lms_suffixes(t, sa, n, m)
            } else {
                0
            };

            {
                let (rest, sub_t) = sa.split_at_mut(len - m + f);
                let sub_sa = &mut rest[..len - m];
                sort_recursive(sub_t, sub_sa, names - f as i64, local)?;
            }

            reconstruct_compacted_lms_2k(t, sa, n, ku, m, f, &mut space, local);
        } else {
            let (_, bkt) = space.split(sa, local);
            count_lms_suffixes_2k(t, ku, bkt);
        }

        let (work, bkt) = space.split(sa, local);
        initialize_buckets_start_and_end_4k(ku, bkt);
        place_lms_suffixes_histogram_4k(work, n, ku, m, bkt);
        induce_final_order_4k(t, work, n, ku, bkt);
    } else {
        sa[0] = sa[n - 1];

        let (work, bkt) = space.split(sa, local);
        initialize_buckets_start_and_end_6k(ku, bkt);
        place_lms_suffixes_histogram_6k(work, n, ku, m, bkt);
        induce_final_order_6k(t, work, n, ku, bkt);
    }

    Ok(())
}

/// The narrow-slack layout: one counter per character, re-counted
/// between passes.
fn sort_one_k(
    t: &mut [i64],
    sa: &mut [i64],
    k: i64,
    local: &mut [i64; LOCAL_BUFFER_SIZE],
) -> Result<(), Error> {
    let n = t.len();
    let len = sa.len();
    let fs = len - n;
    let ku = k as usize;

    let mut space = if fs >= ku {
        BucketSpace::Tail(len - ku)
    } else {
        BucketSpace::Heap(heap_buckets(ku)?)
    };

    let m = {
        let (work, bkt) = space.split(sa, local);
        for v in work[..n].iter_mut() {
            *v = 0;
        }
        count_suffixes(t, bkt);
        initialize_buckets_end_1k(bkt);
        radix_sort_lms_suffixes_1k(t, work, bkt)
    };

    if m > 1 {
        {
            let (work, bkt) = space.split(sa, local);
            induce_partial_order_1k(t, work, n, bkt);
        }

        let names = renumber_and_mark_distinct_lms_1k(t, sa, n, m);
        if names < m as i64 {
            // give the memory back before recursing, the sub-problem may
            // need its own buffer
            if let BucketSpace::Heap(v) = &mut space {
                *v = Vec::new();
            }

            let f = compact_lms_suffixes(t, sa, n, m);

            {
                let (rest, sub_t) = sa.split_at_mut(len - m + f);
                let sub_sa = &mut rest[..len - m];
                sort_recursive(sub_t, sub_sa, names - f as i64, local)?;
            }

            reconstruct_compacted_lms_1k(t, sa, n, m, f);

            if let BucketSpace::Heap(v) = &mut space {
                *v = heap_buckets(ku)?;
            }
        }

        let (work, bkt) = space.split(sa, local);
        count_suffixes(t, bkt);
        initialize_buckets_end_1k(bkt);
        place_lms_suffixes_interval_1k(t, work, k, m, bkt);
    }

    let (work, bkt) = space.split(sa, local);
    induce_final_order_1k(t, work, n, bkt);
    Ok(())
}

// -- counting and gathering --------------------------------------------

/// Gather the lms suffixes into `sa[n - m..n)` while histogramming every
/// `(character, transition)` pair. Returns the number of lms suffixes.
fn count_and_gather_lms_suffixes_4k(t: &[i64], sa: &mut [i64], k: usize, buckets: &mut [i64]) -> usize {
    for b in buckets[..4 * k].iter_mut() {
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
        buckets[index4(c_next as usize, 2 * next_l as usize + cur_l as usize)] += 1;
        c_next = c;
        next_l = cur_l;
    }

    sa[m] = 0;
    buckets[index4(c_next as usize, 2 * next_l as usize)] += 1;

    n - 1 - m
}

/// As above with the coarser per-character histogram split only by the
/// lms property.
fn count_and_gather_lms_suffixes_2k(t: &[i64], sa: &mut [i64], k: usize, buckets: &mut [i64]) -> usize {
    for b in buckets[..2 * k].iter_mut() {
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
        let is_lms = cur_l && !next_l;
        if is_lms {
            m -= 1;
        }
        buckets[index2(c_next as usize, is_lms as usize)] += 1;
        c_next = c;
        next_l = cur_l;
    }

    sa[m] = 0;
    buckets[index2(c_next as usize, 0)] += 1;

    n - 1 - m
}

/// The compacted variant: text positions holding unique lms names carry a
/// sign-bit mark and are skipped by the gather; the histogram counts the
/// stripped characters. The marks classify as s-type on their own, so the
/// type scan stays correct on the raw values.
fn count_and_gather_compacted_lms_suffixes_2k(
    t: &[i64],
    sa: &mut [i64],
    k: usize,
    buckets: &mut [i64],
) -> usize {
    for b in buckets[..2 * k].iter_mut() {
        *b = 0;
    }

    let n = t.len();
    let mut m = n - 1;
    let mut c_next = t[n - 1];
    let mut next_l = true;

    for i in (0..n - 1).rev() {
        let c = t[i];
        let cur_l = c > c_next || (c == c_next && next_l);
        let class = 2 * next_l as usize + cur_l as usize;
        sa[m] = (i + 1) as i64;
        if class == (c_next >= 0) as usize {
            m -= 1;
        }
        buckets[index2(tag::strip(c_next) as usize, (class == 1) as usize)] += 1;
        c_next = c;
        next_l = cur_l;
    }

    let class = 2 * next_l as usize;
    sa[m] = 0;
    if class == (c_next >= 0) as usize {
        m -= 1;
    }
    buckets[index2(tag::strip(c_next) as usize, (class == 1) as usize)] += 1;

    n - 1 - m
}

/// Plain character frequency count for the 1k layout.
fn count_suffixes(t: &[i64], buckets: &mut [i64]) {
    for b in buckets.iter_mut() {
        *b = 0;
    }
    for &c in t.iter() {
        buckets[c as usize] += 1;
    }
}

/// Count lms suffixes per character without touching the workspace.
fn count_lms_suffixes_2k(t: &[i64], k: usize, buckets: &mut [i64]) {
    for b in buckets[..2 * k].iter_mut() {
        *b = 0;
    }

    let n = t.len();
    let mut c_next = t[n - 1];
    let mut next_l = true;

    for i in (0..n - 1).rev() {
        let c = t[i];
        let cur_l = c > c_next || (c == c_next && next_l);
        buckets[index2(c_next as usize, (cur_l && !next_l) as usize)] += 1;
        c_next = c;
        next_l = cur_l;
    }
    buckets[index2(c_next as usize, 0)] += 1;
}

/// Gather the lms suffix positions into the tail of `sa`. Returns their
/// count.
fn gather_lms_suffixes_ints(t: &[i64], sa: &mut [i64]) -> usize {
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
    n - 1 - m
}

/// As above, skipping the positions whose text value carries the
/// unique-name mark.
fn gather_compacted_lms_suffixes_ints(t: &[i64], sa: &mut [i64]) -> usize {
    let n = t.len();
    let mut m = n - 1;
    let mut c_next = t[n - 1];
    let mut next_l = true;

    for i in (0..n - 1).rev() {
        let c = t[i];
        let cur_l = c > c_next || (c == c_next && next_l);
        let class = 2 * next_l as usize + cur_l as usize;
        sa[m] = (i + 1) as i64;
        if class == (c_next >= 0) as usize {
            m -= 1;
        }
        c_next = c;
        next_l = cur_l;
    }
    n - 1 - m
}

// -- bucket initialization ---------------------------------------------

fn initialize_buckets_start_and_end_6k(k: usize, buckets: &mut [i64]) {
    let mut sum = 0;
    for c in 0..k {
        let total = buckets[index4(c, 0)]
            + buckets[index4(c, 1)]
            + buckets[index4(c, 2)]
            + buckets[index4(c, 3)];
        buckets[4 * k + c] = sum;
        sum += total;
        buckets[5 * k + c] = sum;
    }
}

fn initialize_buckets_start_and_end_4k(k: usize, buckets: &mut [i64]) {
    let mut sum = 0;
    for c in 0..k {
        let total = buckets[index2(c, 0)] + buckets[index2(c, 1)];
        buckets[2 * k + c] = sum;
        sum += total;
        buckets[3 * k + c] = sum;
    }
}

fn initialize_buckets_start_1k(buckets: &mut [i64]) {
    let mut sum = 0;
    for b in buckets.iter_mut() {
        let count = *b;
        *b = sum;
        sum += count;
    }
}

fn initialize_buckets_end_1k(buckets: &mut [i64]) {
    let mut sum = 0;
    for b in buckets.iter_mut() {
        sum += *b;
        *b = sum;
    }
}

/// Remove the text prefix before the first lms suffix from the histogram
/// and build the radix-sort cursors at `buckets[4k..5k)`. Returns the
/// number of workspace slots owned by the left-to-right scan.
fn initialize_buckets_for_lms_radix_sort_6k(
    t: &[i64],
    k: usize,
    buckets: &mut [i64],
    first_lms: usize,
) -> i64 {
    let mut c_next = t[first_lms];
    let mut next_l = false;

    for i in (0..first_lms).rev() {
        let c = t[i];
        let cur_l = c > c_next || (c == c_next && next_l);
        buckets[index4(c_next as usize, 2 * next_l as usize + cur_l as usize)] -= 1;
        c_next = c;
        next_l = cur_l;
    }
    buckets[index4(c_next as usize, 2 * next_l as usize)] -= 1;

    let mut sum = 0;
    for c in 0..k {
        sum += buckets[index4(c, 1)] + buckets[index4(c, 3)];
        buckets[4 * k + c] = sum;
    }
    sum
}

/// Turn the consumed histogram into the interleaved cursor and name
/// cells of the partial induction: `buckets[4c]` and `buckets[4c + 1]`
/// are the two scan cursors of character `c`, `buckets[4c + 2..4c + 4)`
/// its distinct-name cells, and the scratch region keeps the boundaries
/// needed by the marker shift and the right-to-left pass.
fn initialize_buckets_for_partial_sorting_6k(
    t: &[i64],
    k: usize,
    buckets: &mut [i64],
    first_lms: usize,
    left_count: i64,
) {
    let first_c = t[first_lms] as usize;
    let mut sum0 = left_count + 1;
    let mut sum1 = 0;
    let mut sum2 = 0;

    for c in 0..k {
        if c == first_c {
            sum1 += 1;
        }

        let ss = buckets[index4(c, 0)];
        let ls = buckets[index4(c, 1)];
        let sl = buckets[index4(c, 2)];
        let ll = buckets[index4(c, 3)];

        buckets[index4(c, 0)] = sum0;
        buckets[index4(c, 1)] = sum2;
        buckets[index4(c, 2)] = 0;
        buckets[index4(c, 3)] = 0;

        sum0 += ss + sl;
        sum1 += ls;
        sum2 += ls + ll;

        buckets[4 * k + index2(c, 0)] = sum0;
        buckets[4 * k + index2(c, 1)] = sum1;
    }
}

// -- lms radix sorting -------------------------------------------------

/// Scatter the gathered lms suffixes (all but the first) to the s-type
/// ends of their character buckets.
fn radix_sort_lms_suffixes_6k(t: &[i64], sa: &mut [i64], n: usize, m: usize, cursors: &mut [i64]) {
    for i in (n - m + 1..n).rev() {
        let p = sa[i];
        let b = &mut cursors[t[p as usize] as usize];
        *b -= 1;
        sa[*b as usize] = p;
    }
}

/// Mark the first slot of each character's lms group; the marks seed the
/// in-place distinct-name renumbering of large alphabets.
fn radix_sort_set_markers_6k(sa: &mut [i64], k: usize, cursors: &[i64]) {
    for c in 0..k - 1 {
        let i = cursors[c] as usize;
        sa[i] = tag::mark(sa[i]);
    }
}

/// Single right-to-left scan of the 1k layout: classifies, radix-sorts
/// the lms suffixes into their bucket ends and blanks the slot of the
/// first one, which the induction seeds on its own. Returns the lms
/// count.
fn radix_sort_lms_suffixes_1k(t: &[i64], sa: &mut [i64], buckets: &mut [i64]) -> usize {
    let n = t.len();
    let mut m = 0;
    let mut c_next = t[n - 1];
    let mut next_l = true;
    let mut last_c = 0usize;

    for i in (0..n - 1).rev() {
        let c = t[i];
        let cur_l = c > c_next || (c == c_next && next_l);
        if cur_l && !next_l {
            last_c = c_next as usize;
            buckets[last_c] -= 1;
            sa[buckets[last_c] as usize] = (i + 1) as i64;
            m += 1;
        }
        c_next = c;
        next_l = cur_l;
    }

    if m > 1 {
        sa[buckets[last_c] as usize] = 0;
    }
    m
}

// -- partial induction, 6k layout --------------------------------------

fn partial_sorting_scan_left_to_right_6k(
    t: &[i64],
    sa: &mut [i64],
    n: usize,
    buckets: &mut [i64],
    left_count: i64,
) -> i64 {
    let v = index4(t[n - 1] as usize, (t[n - 2] >= t[n - 1]) as usize);
    sa[buckets[v] as usize] = tag::mark((n - 1) as i64);
    buckets[v] += 1;
    let mut d = 1;
    buckets[2 + v] = d;

    for i in 0..left_count as usize {
        let e = sa[i];
        d += tag::is_marked(e) as i64;
        let p = tag::strip(e) as usize;
        debug_assert!(p >= 2);

        let v = index4(t[p - 1] as usize, (t[p - 2] >= t[p - 1]) as usize);
        let w = buckets[v] as usize;
        sa[w] = tag::mark_if((p - 1) as i64, buckets[2 + v] != d);
        buckets[v] += 1;
        buckets[2 + v] = d;
    }
    d
}

/// Slide every distinct-name mark one run leftwards inside its bucket
/// with a cumulative-xor sweep.
fn partial_sorting_shift_markers_6k(sa: &mut [i64], k: usize, buckets: &[i64]) {
    for c in (1..k).rev() {
        let mut s = tag::MARK;
        let from = buckets[4 * k + index2(c - 1, 0)] as usize;
        let to = buckets[index4(c, 0)] as usize;
        for i in (from..to).rev() {
            let p = sa[i];
            let q = (p & tag::MARK) ^ s;
            s ^= q;
            sa[i] = p ^ q;
        }
    }
}

/// Reload the scan cursors of the right-to-left pass from the scratch
/// boundaries.
fn partial_sorting_shift_buckets_6k(k: usize, buckets: &mut [i64]) {
    for c in 0..k {
        buckets[index4(c, 0)] = buckets[4 * k + index2(c, 0)];
        buckets[index4(c, 1)] = buckets[4 * k + index2(c, 1)];
    }
}

fn partial_sorting_scan_right_to_left_6k(
    t: &[i64],
    sa: &mut [i64],
    n: usize,
    buckets: &mut [i64],
    first_lms: usize,
    left_count: i64,
    mut d: i64,
) {
    for i in (left_count as usize + 1..n - first_lms).rev() {
        let e = sa[i];
        d += tag::is_marked(e) as i64;
        let p = tag::strip(e) as usize;
        debug_assert!(p >= 2);

        let v = index4(t[p - 1] as usize, (t[p - 2] > t[p - 1]) as usize);
        buckets[v] -= 1;
        let w = buckets[v] as usize;
        sa[w] = tag::mark_if((p - 1) as i64, buckets[2 + v] != d);
        buckets[2 + v] = d;
    }
}

fn induce_partial_order_6k(
    t: &[i64],
    sa: &mut [i64],
    n: usize,
    k: usize,
    buckets: &mut [i64],
    first_lms: usize,
    left_count: i64,
) {
    let d = partial_sorting_scan_left_to_right_6k(t, sa, n, buckets, left_count);
    partial_sorting_shift_markers_6k(sa, k, buckets);
    partial_sorting_shift_buckets_6k(k, buckets);
    partial_sorting_scan_right_to_left_6k(t, sa, n, buckets, first_lms, left_count, d);
}

// -- partial induction, 1k layout --------------------------------------

/// Left-to-right pass over the whole workspace. Entries tagged with
/// "left neighbour is s-type" are stripped and kept, everything else is
/// consumed and pulls its left neighbour in.
fn partial_sorting_scan_left_to_right_1k(t: &[i64], sa: &mut [i64], n: usize, buckets: &mut [i64]) {
    let w = buckets[t[n - 1] as usize] as usize;
    sa[w] = tag::mark_if((n - 1) as i64, t[n - 2] < t[n - 1]);
    buckets[t[n - 1] as usize] += 1;

    for i in 0..n {
        let e = sa[i];
        sa[i] = tag::strip(e);
        if e > 0 {
            sa[i] = 0;
            debug_assert!(e >= 2);
            let q = (e - 1) as usize;
            let w = buckets[t[q] as usize] as usize;
            sa[w] = tag::mark_if(e - 1, t[q - 1] < t[q]);
            buckets[t[q] as usize] += 1;
        }
    }
}

/// Right-to-left pass; the entries it tags are exactly the lms suffixes
/// in sorted order and stay in place for the gather.
fn partial_sorting_scan_right_to_left_1k(t: &[i64], sa: &mut [i64], n: usize, buckets: &mut [i64]) {
    for i in (0..n).rev() {
        let e = sa[i];
        if e > 0 {
            sa[i] = 0;
            debug_assert!(e >= 2);
            let q = (e - 1) as usize;
            buckets[t[q] as usize] -= 1;
            let w = buckets[t[q] as usize] as usize;
            sa[w] = tag::mark_if(e - 1, t[q - 1] > t[q]);
        }
    }
}

/// Compact the tagged entries to the head of the workspace, stripping
/// the tags.
fn partial_sorting_gather_lms_suffixes_1k(sa: &mut [i64], n: usize) {
    let mut l = 0;
    for i in 0..n {
        let e = sa[i];
        sa[l] = tag::strip(e);
        l += tag::is_marked(e) as usize;
    }
}

fn induce_partial_order_1k(t: &[i64], sa: &mut [i64], n: usize, buckets: &mut [i64]) {
    count_suffixes(t, buckets);
    initialize_buckets_start_1k(buckets);
    partial_sorting_scan_left_to_right_1k(t, sa, n, buckets);

    count_suffixes(t, buckets);
    initialize_buckets_end_1k(buckets);
    partial_sorting_scan_right_to_left_1k(t, sa, n, buckets);

    partial_sorting_gather_lms_suffixes_1k(sa, n);
}

// -- renumbering -------------------------------------------------------

/// Renumber the sorted lms substrings in place, leaving a mark on the
/// names that differ from both neighbours. Used when the alphabet is
/// large relative to the text, where gathering would cost an extra copy.
fn renumber_and_mark_distinct_lms_4k(sa: &mut [i64], n: usize, m: usize) -> i64 {
    for v in sa[m..m + (n >> 1)].iter_mut() {
        *v = 0;
    }

    let name = {
        let (sorted, names) = sa.split_at_mut(m);
        let mut name = 1i64;
        let mut prev = 0i64;
        for e in sorted.iter_mut() {
            let raw = *e;
            *e = tag::strip(raw);
            names[(tag::strip(raw) >> 1) as usize] = name | (raw & prev & tag::MARK);
            name += tag::is_marked(raw) as i64;
            prev = raw;
        }
        name - 1
    };

    if name < m as i64 {
        lms::mark_distinct_lms_suffixes(sa, m, n >> 1);
    }
    name
}

/// Renumbering for the 1k layout: without the transition histogram the
/// distinct-name tags are unavailable, so adjacent sorted lms substrings
/// are compared against the text, guided by their recorded lengths.
fn renumber_and_mark_distinct_lms_1k(t: &[i64], sa: &mut [i64], n: usize, m: usize) -> i64 {
    gather_lms_suffixes_ints(t, sa);
    for v in sa[m..n - m].iter_mut() {
        *v = 0;
    }

    // substring lengths, tagged, scattered at position / 2
    for i in n - m..n - 1 {
        let p = sa[i] as usize;
        sa[m + (p >> 1)] = tag::mark(sa[i + 1] - sa[i] + 1);
    }
    let p = sa[n - 1] as usize;
    sa[m + (p >> 1)] = tag::mark(1);

    lms::clamp_lms_suffixes_length(sa, m, n >> 1);

    let mut name = 1i64;
    {
        let mut p = sa[0] as usize;
        let mut plen = sa[m + (p >> 1)] as usize;
        let mut pdiff = tag::MARK;

        for i in 1..m {
            let q = sa[i] as usize;
            let qlen = sa[m + (q >> 1)] as usize;
            let mut qdiff = tag::MARK;

            if plen == qlen {
                let mut l = 0;
                while l < qlen {
                    if t[p + l] != t[q + l] {
                        break;
                    }
                    l += 1;
                }
                if l == qlen {
                    qdiff = 0;
                }
            }

            sa[m + (p >> 1)] = name | (pdiff & qdiff);
            name += (qdiff < 0) as i64;

            p = q;
            plen = qlen;
            pdiff = qdiff;
        }

        sa[m + (p >> 1)] = name | pdiff;
        name += 1;
    }

    if name <= m as i64 {
        lms::mark_distinct_lms_suffixes(sa, m, n >> 1);
    }
    name - 1
}

// -- compaction and merging --------------------------------------------

/// First compaction step: unique names mark their text position and are
/// replaced by their final rank; non-unique names shift down into a
/// dense sub-alphabet. Returns the number of unique names.
fn renumber_unique_and_nonunique_lms(t: &mut [i64], sa: &mut [i64], m: usize) -> i64 {
    let (sorted, names) = sa.split_at_mut(m);

    let mut f = 0i64;
    for (i, &e) in sorted.iter().enumerate() {
        let p = e as usize;
        let mut s = names[p >> 1];
        if s < 0 {
            t[p] = tag::mark(t[p]);
            f += 1;
            s = i as i64 + tag::MARK + f;
        }
        names[p >> 1] = s - f;
    }
    f
}

/// Second compaction step: stable-partition the name slots into the
/// unique ranks (prefix) and the non-unique sub-problem (tail).
fn compact_unique_and_nonunique_lms(sa: &mut [i64], m: usize, span: usize) {
    let mut l = m - 1;
    let mut r = sa.len() - 1;

    for i in (m..m + span).rev() {
        let e = sa[i];
        sa[l] = tag::strip(e);
        if tag::is_marked(e) {
            l -= 1;
        }
        sa[r] = e - 1;
        if e > 0 {
            r -= 1;
        }
    }
}

/// Mark unique lms names in the text and move the reduced problem to the
/// end of the workspace. Returns the number of unique names.
fn compact_lms_suffixes(t: &mut [i64], sa: &mut [i64], n: usize, m: usize) -> usize {
    let f = renumber_unique_and_nonunique_lms(t, sa, m) as usize;
    compact_unique_and_nonunique_lms(sa, m, n >> 1);

    let len = sa.len();
    sa.copy_within(m - f..m, len - m);
    f
}

/// Walk the text for the marked positions and drop each unique lms
/// suffix at its precomputed rank, clearing the mark.
fn merge_unique_lms_suffixes(t: &mut [i64], sa: &mut [i64], n: usize, m: usize) {
    let mut src = n - m - 1;
    let mut tmp = sa[src];
    src += 1;

    let mut i = 0;
    while i < n {
        let c = t[i];
        if c < 0 {
            t[i] = tag::strip(c);
            sa[tmp as usize] = i as i64;
            i += 1; // adjacent positions are never both lms
            tmp = sa[src];
            src += 1;
        }
        i += 1;
    }
}

/// Fill the remaining holes with the recursion-ordered non-unique lms
/// suffixes.
fn merge_nonunique_lms_suffixes(sa: &mut [i64], n: usize, m: usize, f: usize) {
    let mut src = n - m - 1 + f;
    let mut tmp = sa[src];
    src += 1;

    for i in 0..m {
        if sa[i] == 0 {
            sa[i] = tmp;
            tmp = sa[src];
            src += 1;
        }
    }
}

fn merge_compacted_lms_suffixes(t: &mut [i64], sa: &mut [i64], n: usize, m: usize, f: usize) {
    merge_unique_lms_suffixes(t, sa, n, m);
    merge_nonunique_lms_suffixes(sa, n, m, f);
}

// -- reconstruction ----------------------------------------------------

fn reconstruct_compacted_lms_2k(
    t: &mut [i64],
    sa: &mut [i64],
    n: usize,
    k: usize,
    m: usize,
    f: usize,
    space: &mut BucketSpace,
    local: &mut [i64],
) {
    let len = sa.len();
    if f > 0 {
        sa.copy_within(len - m..len - m + f, n - m - 1);

        {
            let (work, bkt) = space.split(sa, local);
            count_and_gather_compacted_lms_suffixes_2k(t, work, k, bkt);
        }
        lms::reconstruct_lms_suffixes(sa, n, m - f);

        sa.copy_within(0..m - f, n - m - 1 + f);
        for v in sa[..m].iter_mut() {
            *v = 0;
        }

        merge_compacted_lms_suffixes(t, sa, n, m, f);
    } else {
        {
            let (work, bkt) = space.split(sa, local);
            count_and_gather_lms_suffixes_2k(t, work, k, bkt);
        }
        lms::reconstruct_lms_suffixes(sa, n, m);
    }
}

fn reconstruct_compacted_lms_1k(t: &mut [i64], sa: &mut [i64], n: usize, m: usize, f: usize) {
    let len = sa.len();
    if f > 0 {
        sa.copy_within(len - m..len - m + f, n - m - 1);

        gather_compacted_lms_suffixes_ints(t, sa);
        lms::reconstruct_lms_suffixes(sa, n, m - f);

        sa.copy_within(0..m - f, n - m - 1 + f);
        for v in sa[..m].iter_mut() {
            *v = 0;
        }

        merge_compacted_lms_suffixes(t, sa, n, m, f);
    } else {
        gather_lms_suffixes_ints(t, sa);
        lms::reconstruct_lms_suffixes(sa, n, m);
    }
}

// -- placing sorted lms suffixes ---------------------------------------

fn place_lms_suffixes_histogram_6k(sa: &mut [i64], n: usize, k: usize, mut m: usize, buckets: &[i64]) {
    let mut j = n;
    for c in (0..k - 1).rev() {
        let l = buckets[index4(c, 1)] as usize;
        if l > 0 {
            let i = buckets[5 * k + c] as usize;
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

fn place_lms_suffixes_histogram_4k(sa: &mut [i64], n: usize, k: usize, mut m: usize, buckets: &[i64]) {
    let mut j = n;
    for c in (0..k - 1).rev() {
        let l = buckets[index2(c, 1)] as usize;
        if l > 0 {
            let i = buckets[3 * k + c] as usize;
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

/// Scatter the sorted lms suffixes into their bucket ends, zeroing the
/// slots in between; the 1k layout has no lms histogram, so the bucket
/// boundaries come from the text as the scan goes.
fn place_lms_suffixes_interval_1k(t: &[i64], sa: &mut [i64], k: i64, m: usize, buckets: &mut [i64]) {
    let mut c = k - 1;
    let mut l = buckets[c as usize] as usize;

    for i in (0..m).rev() {
        let p = sa[i];
        if t[p as usize] != c {
            c = t[p as usize];
            let b = buckets[c as usize] as usize;
            for v in sa[b..l].iter_mut() {
                *v = 0;
            }
            l = b;
        }
        l -= 1;
        sa[l] = p;
    }

    for v in sa[..l].iter_mut() {
        *v = 0;
    }
}

// -- final induction ---------------------------------------------------

fn final_sorting_scan_left_to_right_ints(t: &[i64], sa: &mut [i64], n: usize, cursors: &mut [i64]) {
    let w = cursors[t[n - 1] as usize] as usize;
    sa[w] = tag::mark_if((n - 1) as i64, t[n - 2] < t[n - 1]);
    cursors[t[n - 1] as usize] += 1;

    for i in 0..n {
        let e = sa[i];
        sa[i] = tag::flip(e);
        if e > 0 {
            let p = (e - 1) as usize;
            let left = t[p - (p > 0) as usize];
            let w = cursors[t[p] as usize] as usize;
            sa[w] = tag::mark_if(p as i64, left < t[p]);
            cursors[t[p] as usize] += 1;
        }
    }
}

fn final_sorting_scan_right_to_left_ints(t: &[i64], sa: &mut [i64], n: usize, cursors: &mut [i64]) {
    for i in (0..n).rev() {
        let e = sa[i];
        sa[i] = tag::strip(e);
        if e > 0 {
            let p = (e - 1) as usize;
            let left = t[p - (p > 0) as usize];
            cursors[t[p] as usize] -= 1;
            let w = cursors[t[p] as usize] as usize;
            sa[w] = tag::mark_if(p as i64, left > t[p]);
        }
    }
}

fn induce_final_order_6k(t: &[i64], sa: &mut [i64], n: usize, k: usize, buckets: &mut [i64]) {
    final_sorting_scan_left_to_right_ints(t, sa, n, &mut buckets[4 * k..5 * k]);
    final_sorting_scan_right_to_left_ints(t, sa, n, &mut buckets[5 * k..6 * k]);
}

fn induce_final_order_4k(t: &[i64], sa: &mut [i64], n: usize, k: usize, buckets: &mut [i64]) {
    final_sorting_scan_left_to_right_ints(t, sa, n, &mut buckets[2 * k..3 * k]);
    final_sorting_scan_right_to_left_ints(t, sa, n, &mut buckets[3 * k..4 * k]);
}

fn induce_final_order_1k(t: &[i64], sa: &mut [i64], n: usize, buckets: &mut [i64]) {
    count_suffixes(t, buckets);
    initialize_buckets_start_1k(buckets);
    final_sorting_scan_left_to_right_ints(t, sa, n, buckets);

    count_suffixes(t, buckets);
    initialize_buckets_end_1k(buckets);
    final_sorting_scan_right_to_left_ints(t, sa, n, buckets);
}
