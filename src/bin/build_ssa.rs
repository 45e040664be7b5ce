use anyhow::Context;
use clap::Parser;
use sparse_suffix_array::{
    build_sparse_sa, build_sparse_sa_subsampled, translate_l_to_i, write_ssa, Alphabet,
};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

/// Build a sparse suffix array over a DNA or protein text and store it
/// bit-compressed on disk.
#[derive(Parser, Debug)]
#[command(name = "build_ssa")]
struct Cli {
    /// Sparseness factor: the number of characters packed into one symbol
    #[arg(short = 's', value_name = "SPARSENESS", value_parser = clap::value_parser!(u8).range(1..=8))]
    sparseness: u8,

    /// The input file holds DNA data over A, C, G, T instead of protein data
    #[arg(short = 'd')]
    dna: bool,

    /// Bit-compress the stored suffix array entries
    #[arg(short = 'c')]
    compressed: bool,

    /// Compute the full suffix array and subsample it afterwards
    #[arg(short = 'u')]
    unoptimized: bool,

    /// The text to index
    input_file: PathBuf,

    /// Where the suffix array is written
    output_file: PathBuf,
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        process::exit(1);
    });

    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let started = Instant::now();
    println!("Reading input file {} ...", cli.input_file.display());
    let mut text = fs::read(&cli.input_file)
        .with_context(|| format!("failed to read {}", cli.input_file.display()))?;
    if !cli.dna {
        translate_l_to_i(&mut text);
    }
    println!("Read {} bytes in {:.3?}", text.len(), started.elapsed());

    let started = Instant::now();
    println!("Building SA...");
    let sa = if cli.unoptimized {
        build_sparse_sa_subsampled(&text, cli.sparseness)
    } else {
        let alphabet = if cli.dna {
            Alphabet::dna()
        } else {
            Alphabet::protein()
        };
        build_sparse_sa(&text, cli.sparseness, &alphabet)
    }
    .context("suffix array construction failed")?;
    println!("Built SA of {} entries in {:.3?}", sa.len(), started.elapsed());

    let started = Instant::now();
    println!("Writing results...");
    let out = File::create(&cli.output_file)
        .with_context(|| format!("failed to create {}", cli.output_file.display()))?;
    write_ssa(BufWriter::new(out), cli.sparseness, &sa, cli.compressed)
        .with_context(|| format!("failed to write {}", cli.output_file.display()))?;
    println!(
        "Wrote results to {} in {:.3?}",
        cli.output_file.display(),
        started.elapsed()
    );

    Ok(())
}
