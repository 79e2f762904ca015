use std::{cmp::Ordering, fs::File, io::BufReader, path::PathBuf, process::ExitCode};

use clap::Parser;
use cursive::{
    view::{Nameable, Resizable},
    views::{Dialog, LinearLayout, TextView},
};
use cursive_table_view::{TableView, TableViewItem};
use log::info;
use vmm::{
    report, AddressStream, BackingStore, Error, ResultWriter, Simulator, BACKING_STORE_FILENAME,
    FULL_MEMORY_FRAMES, NUM_FRAMES,
};

/// Run an address trace, then browse the final page table and TLB.
#[derive(Parser)]
#[command(name = "simple_ui")]
struct Cli {
    addresses: PathBuf,

    #[arg(short, long, default_value = BACKING_STORE_FILENAME)]
    backing_store: PathBuf,

    #[arg(long)]
    full_memory: bool,
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
enum PageColumn {
    Page,
    Frame,
}

#[derive(Clone, Debug)]
struct PageRow {
    page_number: u32,
    frame_number: u32,
}

impl TableViewItem<PageColumn> for PageRow {
    fn to_column(&self, column: PageColumn) -> String {
        match column {
            PageColumn::Page => self.page_number.to_string(),
            PageColumn::Frame => self.frame_number.to_string(),
        }
    }

    fn cmp(&self, other: &Self, column: PageColumn) -> Ordering
    where
        Self: Sized,
    {
        match column {
            PageColumn::Page => self.page_number.cmp(&other.page_number),
            PageColumn::Frame => self.frame_number.cmp(&other.frame_number),
        }
    }
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
enum TlbColumn {
    Slot,
    Page,
    Frame,
    Valid,
}

#[derive(Clone, Debug)]
struct TlbRow {
    slot: usize,
    page_number: u32,
    frame_number: u32,
    valid: bool,
}

impl TableViewItem<TlbColumn> for TlbRow {
    fn to_column(&self, column: TlbColumn) -> String {
        match column {
            TlbColumn::Slot => self.slot.to_string(),
            TlbColumn::Page => self.page_number.to_string(),
            TlbColumn::Frame => self.frame_number.to_string(),
            TlbColumn::Valid => self.valid.to_string(),
        }
    }

    fn cmp(&self, other: &Self, column: TlbColumn) -> Ordering
    where
        Self: Sized,
    {
        match column {
            TlbColumn::Slot => self.slot.cmp(&other.slot),
            TlbColumn::Page => self.page_number.cmp(&other.page_number),
            TlbColumn::Frame => self.frame_number.cmp(&other.frame_number),
            TlbColumn::Valid => self.valid.cmp(&other.valid),
        }
    }
}

struct Snapshot {
    pages: Vec<PageRow>,
    tlb: Vec<TlbRow>,
    summary: String,
}

fn run<const FRAMES: usize>(cli: &Cli) -> Result<Snapshot, Error> {
    let disk = BackingStore::<File>::open(&cli.backing_store)?;
    let mut translator = Simulator::<File, FRAMES>::new(disk);
    let mut stream = AddressStream::new(BufReader::new(File::open(&cli.addresses)?));
    let mut sink = ResultWriter::new(std::io::sink(), std::io::sink(), std::io::sink());
    let stats = vmm::simulate(&mut translator, &mut stream, &mut sink)?;
    info!(
        "{} pages mapped after {} references",
        translator.page_table().mapped_pages(),
        stats.total_references
    );

    let pages = translator
        .page_table()
        .iter()
        .filter(|(_, entry)| entry.is_valid())
        .map(|(page_number, entry)| PageRow {
            page_number,
            frame_number: entry.get_frame_number(),
        })
        .collect();
    let tlb = translator
        .tlb()
        .entries()
        .iter()
        .enumerate()
        .map(|(slot, entry)| TlbRow {
            slot,
            page_number: entry.page_number,
            frame_number: entry.frame_number,
            valid: entry.valid,
        })
        .collect();

    Ok(Snapshot {
        pages,
        tlb,
        summary: report::summary(&stats),
    })
}

fn page_table_view(rows: Vec<PageRow>) -> TableView<PageRow, PageColumn> {
    let mut table = TableView::<PageRow, PageColumn>::new()
        .column(PageColumn::Page, "Page", |c| c.width(8))
        .column(PageColumn::Frame, "Frame", |c| c);
    for row in rows {
        table.insert_item(row);
    }
    table
}

fn tlb_view(rows: Vec<TlbRow>) -> TableView<TlbRow, TlbColumn> {
    let mut table = TableView::<TlbRow, TlbColumn>::new()
        .column(TlbColumn::Slot, "Slot", |c| c.width(6))
        .column(TlbColumn::Page, "Page", |c| c.width(6))
        .column(TlbColumn::Frame, "Frame", |c| c.width(6))
        .column(TlbColumn::Valid, "Valid", |c| c);
    for row in rows {
        table.insert_item(row);
    }
    table
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let snapshot = if cli.full_memory {
        run::<FULL_MEMORY_FRAMES>(&cli)
    } else {
        run::<NUM_FRAMES>(&cli)
    };
    let snapshot = match snapshot {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("simple_ui: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut siv = cursive::default();
    siv.add_global_callback('q', |s| s.quit());

    let tables = LinearLayout::horizontal()
        .child(
            Dialog::around(
                page_table_view(snapshot.pages)
                    .with_name("page table")
                    .min_size((24, 20)),
            )
            .title("Page table"),
        )
        .child(
            Dialog::around(tlb_view(snapshot.tlb).with_name("tlb").min_size((36, 20)))
                .title("TLB"),
        );
    siv.add_layer(
        Dialog::around(
            LinearLayout::vertical()
                .child(TextView::new(snapshot.summary))
                .child(tables),
        )
        .title("Virtual memory")
        .button("Quit", |s| s.quit()),
    );
    siv.run();
    ExitCode::SUCCESS
}
