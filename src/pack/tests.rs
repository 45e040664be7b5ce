use super::*;

#[test]
fn packs_dna_pairs_big_endian() {
    let packed = PackedText::pack(b"ACGTACGT", 2, &Alphabet::dna()).unwrap();
    match packed {
        PackedText::Bytes(v) => assert_eq!(v, vec![0b0001, 0b1011, 0b0001, 0b1011]),
        _ => panic!("expected byte symbols for a 4-bit width"),
    }
}

#[test]
fn short_tail_pads_low_bits() {
    let packed = PackedText::pack(b"ACGTA", 2, &Alphabet::dna()).unwrap();
    match packed {
        PackedText::Bytes(v) => assert_eq!(v, vec![0b0001, 0b1011, 0b0000]),
        _ => panic!("expected byte symbols for a 4-bit width"),
    }
}

#[test]
fn width_selection_tracks_group_bits() {
    let a = Alphabet::protein();
    assert!(matches!(PackedText::pack(b"AC", 1, &a), Ok(PackedText::Bytes(_))));
    assert!(matches!(PackedText::pack(b"AC", 3, &a), Ok(PackedText::Pairs(_))));
    assert!(matches!(PackedText::pack(b"AC", 6, &a), Ok(PackedText::Words(_))));
    assert!(matches!(PackedText::pack(b"AC", 7, &a), Ok(PackedText::Wide(_))));
}

#[test]
fn rejects_bad_sparseness_and_bytes() {
    let a = Alphabet::dna();
    assert!(PackedText::pack(b"ACGT", 0, &a).is_err());
    assert!(PackedText::pack(b"ACGT", 9, &a).is_err());
    assert!(PackedText::pack(b"ACGN", 2, &a).is_err());
}

#[test]
fn empty_text_packs_to_nothing() {
    let packed = PackedText::pack(b"", 4, &Alphabet::dna()).unwrap();
    assert!(packed.is_empty());
}
