use std::{
    fs::File,
    io::BufReader,
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use log::info;
use vmm::{
    report, simulate, AddressStream, BackingStore, Error, ResultWriter, Simulator,
    BACKING_STORE_FILENAME, FULL_MEMORY_FRAMES, NUM_FRAMES,
};

#[derive(Parser)]
#[command(name = "vmm")]
#[command(about = "Translate logical addresses through a TLB and a demand-paged page table")]
#[command(version)]
struct Cli {
    /// File of decimal logical addresses, one per line
    addresses: PathBuf,

    /// Backing store holding 256 pages of 256 bytes
    #[arg(short, long, default_value = BACKING_STORE_FILENAME)]
    backing_store: PathBuf,

    /// Directory receiving out1.txt, out2.txt and out3.txt
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Use 256 physical frames instead of 128
    #[arg(long)]
    full_memory: bool,

    /// Print the page table and the TLB after the run
    #[arg(long)]
    dump: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = if cli.full_memory {
        run::<FULL_MEMORY_FRAMES>(&cli)
    } else {
        run::<NUM_FRAMES>(&cli)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("vmm: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run<const FRAMES: usize>(cli: &Cli) -> Result<(), Error> {
    let disk = BackingStore::<File>::open(&cli.backing_store)?;
    let mut translator = Simulator::<File, FRAMES>::new(disk);

    let addresses = File::open(&cli.addresses)?;
    let mut stream = AddressStream::new(BufReader::new(addresses));
    let mut writer = ResultWriter::create(&cli.output_dir)?;

    let stats = simulate(&mut translator, &mut stream, &mut writer)?;
    info!(
        "Processed {} addresses, skipped {} lines",
        stats.total_references,
        stream.skipped()
    );

    println!("{}", report::summary(&stats));
    if cli.dump {
        println!("{}", report::dump_page_table(translator.page_table()));
        println!("{}", report::dump_tlb(translator.tlb()));
    }
    Ok(())
}
