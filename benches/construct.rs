use criterion::{criterion_group, criterion_main, Criterion};
use rand::distributions::Uniform;
use rand::{thread_rng, Rng};
use sparse_suffix_array::{build_sparse_sa, Alphabet};

static SIZES: &[(&str, usize)] = &[("64k", 65536), ("1m", 1048576)];

fn random_dna(len: usize) -> Vec<u8> {
    let mut rng = thread_rng();
    let dist = Uniform::new(0usize, 4);
    (0..len).map(|_| b"ACGT"[rng.sample(dist)]).collect()
}

fn random_protein(len: usize) -> Vec<u8> {
    let mut rng = thread_rng();
    let dist = Uniform::new(0u8, 25);
    (0..len)
        .map(|_| {
            let c = b'A' + rng.sample(dist);
            if c == b'L' {
                b'I'
            } else {
                c
            }
        })
        .collect()
}

fn ssa_construct(crit: &mut Criterion) {
    for &(sname, len) in SIZES {
        let dna = random_dna(len);
        for k in &[1u8, 2, 4, 8] {
            let text = dna.clone();
            let k = *k;
            let bench_name = format!("ssa dna-{} s{}", sname, k);
            crit.bench_function(bench_name.as_ref(), move |b| {
                b.iter(|| build_sparse_sa(&text[..], k, &Alphabet::dna()).unwrap());
            });
        }

        let protein = random_protein(len);
        for k in &[1u8, 2, 3] {
            let text = protein.clone();
            let k = *k;
            let bench_name = format!("ssa protein-{} s{}", sname, k);
            crit.bench_function(bench_name.as_ref(), move |b| {
                b.iter(|| build_sparse_sa(&text[..], k, &Alphabet::protein()).unwrap());
            });
        }
    }
}

criterion_group! {
    name = ssa_construct_benches;
    config = Criterion::default().sample_size(10);
    targets = ssa_construct
}
criterion_main!(ssa_construct_benches);
