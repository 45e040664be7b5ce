use super::*;
use rand::random;
use std::io::Cursor;

#[test]
fn header_is_ten_bytes_in_field_order() {
    let header = SsaHeader {
        bits_per_element: 64,
        sparseness_factor: 3,
        sa_length: 0x0102030405060708,
    };
    let mut buf = Vec::new();
    header.dump(&mut buf).unwrap();
    assert_eq!(
        buf,
        vec![64, 3, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
    );
    assert_eq!(SsaHeader::load(Cursor::new(buf)).unwrap(), header);
}

#[test]
fn entry_bits_is_bit_length() {
    assert_eq!(entry_bits(0), 1);
    assert_eq!(entry_bits(1), 1);
    assert_eq!(entry_bits(2), 2);
    assert_eq!(entry_bits(255), 8);
    assert_eq!(entry_bits(256), 9);
}

#[test]
fn compress_roundtrip_exact_boundary() {
    let original: Vec<u64> = (0..8u64).collect();
    let mut packed = original.clone();
    compress_sa(&mut packed, 32);
    assert_eq!(packed.len(), 4);
    assert_eq!(decompress_sa(&packed, 8, 32), original);
}

#[test]
fn compress_roundtrip_straddling_words() {
    let original: Vec<u64> = vec![1, 2, 3, 4, 5, 6, 7, 1 << 19];
    let mut packed = original.clone();
    compress_sa(&mut packed, 20);
    assert_eq!(packed.len(), (8 * 20 + 63) / 64);
    assert_eq!(decompress_sa(&packed, 8, 20), original);
}

#[test]
fn compress_roundtrip_random() {
    for _ in 0..100 {
        let bits = 1 + random::<u8>() % 63;
        let len = random::<usize>() % 200;
        let mask = (1u64 << bits) - 1;
        let original: Vec<u64> = (0..len).map(|_| random::<u64>() & mask).collect();

        let mut packed = original.clone();
        compress_sa(&mut packed, bits);
        assert_eq!(decompress_sa(&packed, len, bits), original);
    }
}

#[test]
fn file_roundtrip_uncompressed_and_compressed() {
    let sa: Vec<i64> = vec![12, 0, 4, 8, 2, 6, 10];
    for &compressed in &[false, true] {
        let mut buf = Vec::new();
        write_ssa(&mut buf, 2, &sa, compressed).unwrap();

        let (header, entries) = read_ssa(Cursor::new(buf)).unwrap();
        assert_eq!(header.sparseness_factor, 2);
        assert_eq!(header.sa_length, sa.len() as u64);
        assert_eq!(header.bits_per_element, if compressed { 4 } else { 64 });
        assert_eq!(entries, sa);
    }
}

#[test]
fn empty_array_roundtrips() {
    let mut buf = Vec::new();
    write_ssa(&mut buf, 4, &[], true).unwrap();
    let (header, entries) = read_ssa(Cursor::new(buf)).unwrap();
    assert_eq!(header.sa_length, 0);
    assert!(entries.is_empty());
}
