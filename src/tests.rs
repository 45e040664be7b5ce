use super::*;
use rand::random;
use std::io::Cursor;

#[test]
fn dna_sparse_factor_one_is_the_plain_suffix_array() {
    let sa = build_sparse_sa(b"ACGTACGT", 1, &Alphabet::dna()).unwrap();
    assert_eq!(sa, vec![4, 0, 5, 1, 6, 2, 7, 3]);

    let sa = build_sparse_sa(b"AAAAAAAA", 1, &Alphabet::dna()).unwrap();
    assert_eq!(sa, vec![7, 6, 5, 4, 3, 2, 1, 0]);
}

#[test]
fn protein_sparse_factor_one_is_the_plain_suffix_array() {
    let sa = build_sparse_sa(b"banana", 1, &Alphabet::protein()).unwrap();
    assert_eq!(sa, vec![5, 3, 1, 0, 4, 2]);

    let sa = build_sparse_sa(b"abracadabra", 1, &Alphabet::protein()).unwrap();
    assert_eq!(sa, vec![10, 7, 0, 3, 5, 8, 1, 4, 6, 9, 2]);

    let sa = build_sparse_sa(b"MISSISSIPPI", 1, &Alphabet::protein()).unwrap();
    assert_eq!(sa, vec![10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]);
}

#[test]
fn dna_packed_pairs() {
    // packed "ACGTACGT" by two is [1, 11, 1, 11]; its suffix array
    // scales back by the sparseness factor, matching the even positions
    // of the full suffix array in order
    let sa = build_sparse_sa(b"ACGTACGT", 2, &Alphabet::dna()).unwrap();
    assert_eq!(sa, vec![4, 0, 6, 2]);
}

#[test]
fn empty_and_single_group_texts() {
    for k in 1..=8u8 {
        assert_eq!(build_sparse_sa(b"", k, &Alphabet::dna()).unwrap(), vec![]);
        assert_eq!(build_sparse_sa(b"A", k, &Alphabet::dna()).unwrap(), vec![0]);
    }
}

#[test]
fn sparseness_factor_out_of_range() {
    assert!(build_sparse_sa(b"ACGT", 0, &Alphabet::dna()).is_err());
    assert!(build_sparse_sa(b"ACGT", 9, &Alphabet::dna()).is_err());
    assert!(build_sparse_sa_subsampled(b"ACGT", 0).is_err());
}

#[test]
fn group_too_wide_for_the_engine() {
    // seven 5-bit ranks exceed the 32-bit symbol limit
    assert_eq!(
        build_sparse_sa(b"PEPTIDE", 7, &Alphabet::protein()),
        Err(Error::InvalidArgument)
    );
}

#[test]
fn dna_rejects_unknown_bases_when_packing() {
    assert_eq!(
        build_sparse_sa(b"ACGNACGT", 2, &Alphabet::dna()),
        Err(Error::InvalidArgument)
    );
}

#[test]
fn optimized_matches_subsampled_on_dna() {
    for _ in 0..60 {
        let n = random::<usize>() % 500;
        let text: Vec<u8> = (0..n).map(|_| b"ACGT"[random::<usize>() % 4]).collect();
        for k in 1..=8u8 {
            let fast = build_sparse_sa(&text, k, &Alphabet::dna()).unwrap();
            let slow = build_sparse_sa_subsampled(&text, k).unwrap();
            assert_eq!(fast, slow, "text {:?}, sparseness {}", text, k);
        }
    }
}

#[test]
fn optimized_matches_subsampled_on_protein() {
    for _ in 0..40 {
        let n = random::<usize>() % 400;
        let sigma = 1 + random::<u8>() % 20;
        let mut text: Vec<u8> = (0..n).map(|_| b'A' + random::<u8>() % sigma).collect();
        translate_l_to_i(&mut text);

        // five bits per rank caps the packable group at six characters
        for k in 1..=6u8 {
            let fast = build_sparse_sa(&text, k, &Alphabet::protein()).unwrap();
            let slow = build_sparse_sa_subsampled(&text, k).unwrap();
            assert_eq!(fast, slow, "text {:?}, sparseness {}", text, k);
        }
    }
}

#[test]
fn optimized_matches_subsampled_on_scanned_alphabets() {
    // a scanned table assigns rank zero to a real byte, colliding with
    // the zero padding of the final short group
    for _ in 0..40 {
        let n = 1 + random::<usize>() % 300;
        let sigma = 1 + random::<u8>() % 8;
        let text: Vec<u8> = (0..n).map(|_| random::<u8>() % sigma).collect();
        let alphabet = Alphabet::scan(&text);
        for k in 1..=8u8 {
            let fast = build_sparse_sa(&text, k, &alphabet).unwrap();
            let slow = build_sparse_sa_subsampled(&text, k).unwrap();
            assert_eq!(fast, slow, "text {:?}, sparseness {}", text, k);
        }
    }
}

#[test]
fn wide_symbol_path_round_trips() {
    // 7 ranks x 4 bits lands in the 32-bit engine path
    for _ in 0..20 {
        let n = random::<usize>() % 300;
        let text: Vec<u8> = (0..n).map(|_| random::<u8>() % 10).collect();
        let alphabet = Alphabet::scan(&text);
        if alphabet.bits_per_char() == 4 {
            let fast = build_sparse_sa(&text, 7, &alphabet).unwrap();
            let slow = build_sparse_sa_subsampled(&text, 7).unwrap();
            assert_eq!(fast, slow, "text {:?}", text);
        }
    }
}

#[test]
fn full_32_bit_groups_exceed_the_alphabet_cap() {
    let text: Vec<u8> = (0..64).map(|i| (i % 10) as u8).collect();
    let alphabet = Alphabet::scan(&text);
    assert_eq!(alphabet.bits_per_char(), 4);
    assert_eq!(
        build_sparse_sa(&text, 8, &alphabet),
        Err(Error::InvalidArgument)
    );
}

#[test]
fn translate_replaces_every_leucine() {
    let mut text = b"LEUCINELESS".to_vec();
    translate_l_to_i(&mut text);
    assert_eq!(&text, b"IEUCINEIESS");
}

#[test]
fn store_round_trip_of_a_built_array() {
    let text = b"ACGTACGTACGTAC";
    let sa = build_sparse_sa(text, 2, &Alphabet::dna()).unwrap();

    for &compressed in &[false, true] {
        let mut buf = Vec::new();
        write_ssa(&mut buf, 2, &sa, compressed).unwrap();
        let (header, entries) = read_ssa(Cursor::new(buf)).unwrap();
        assert_eq!(header.sparseness_factor, 2);
        assert_eq!(entries, sa);
    }
}
