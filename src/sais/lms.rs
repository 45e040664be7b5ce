use super::tag;

/// Rewrite the names of the sorted lms suffixes `sa[0..m)` into the slots
/// `sa[m + position/2]`. Entries tagged by the partial induction bump the
/// running name. Returns the number of distinct lms substring names.
pub fn renumber_lms_suffixes(sa: &mut [i64], m: usize) -> i64 {
    let (sorted, names) = sa.split_at_mut(m);

    let mut name = 0;
    for &p in sorted.iter() {
        names[(tag::strip(p) >> 1) as usize] = tag::mark(name);
        name += tag::is_marked(p) as i64;
    }
    name
}

/// Collect the tagged name slots of `sa[m..m + span)` in order into the
/// tail ending at `l`, stripping the tags. Returns the start of the
/// gathered run.
pub fn gather_marked_lms_suffixes(sa: &mut [i64], m: usize, span: usize, l: usize) -> usize {
    let mut l = l - 1;
    for i in (m..m + span).rev() {
        let s = sa[i];
        sa[l] = tag::strip(s);
        l -= tag::is_marked(s) as usize;
    }
    l + 1
}

/// Renumber the sorted lms substrings and, when names collide, gather the
/// name sequence of the reduced problem into the end of the workspace.
/// Returns the number of distinct names.
pub fn renumber_and_gather_lms_suffixes(sa: &mut [i64], n: usize, m: usize) -> i64 {
    let l = sa.len();
    for v in sa[m..m + (n >> 1)].iter_mut() {
        *v = 0;
    }

    let name = renumber_lms_suffixes(sa, m);
    if name < m as i64 {
        gather_marked_lms_suffixes(sa, m, n >> 1, l);
    } else {
        for v in sa[..m].iter_mut() {
            *v = tag::strip(*v);
        }
    }
    name
}

/// Propagate uniqueness through the scattered name slots: a name keeps its
/// tag only when the previous occupied slot was tagged as well.
pub fn mark_distinct_lms_suffixes(sa: &mut [i64], m: usize, span: usize) {
    let mut prev = 0;
    for i in m..m + span {
        let p = sa[i];
        sa[i] = p & (prev | i64::MAX);
        if p != 0 {
            prev = p;
        }
    }
}

/// Strip the tags off the lms substring lengths and clear every other
/// slot of the scratch zone.
pub fn clamp_lms_suffixes_length(sa: &mut [i64], m: usize, span: usize) {
    for v in sa[m..m + span].iter_mut() {
        *v = tag::strip(if *v < 0 { *v } else { 0 });
    }
}

/// Map the recursion's permutation of lms ranks in `sa[0..m)` back to the
/// text positions gathered in `sa[n - m..n)`.
pub fn reconstruct_lms_suffixes(sa: &mut [i64], n: usize, m: usize) {
    for i in 0..m {
        sa[i] = sa[n - m + sa[i] as usize];
    }
}
