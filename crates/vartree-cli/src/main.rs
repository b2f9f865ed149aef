use std::process::ExitCode;

use clap::{Parser, builder::RangedU64ValueParser};
use vartree::SegmentTree;

mod report;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Comma separated values to build the tree from
    #[clap(
        short,
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        conflicts_with = "random"
    )]
    values: Vec<f64>,
    /// Build the tree from N random values in [0, 100)
    #[clap(short, long)]
    random: Option<usize>,
    /// Seed used together with --random
    #[clap(long, default_value_t = 42)]
    seed: u64,
    /// Point update applied before reporting, as INDEX=VALUE
    #[clap(short, long, value_parser = parse_update, allow_hyphen_values = true)]
    update: Vec<(usize, f64)>,
    /// Inclusive range to report, as LO:HI
    #[clap(short, long, value_parser = parse_range)]
    query: Vec<(usize, usize)>,
    /// Report consecutive windows of the given width
    #[clap(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    windows: Option<usize>,
    /// Print every node of the tree with the range it covers
    #[clap(long)]
    dump: bool,
}

fn parse_update(arg: &str) -> Result<(usize, f64), String> {
    let (index, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=VALUE, got `{arg}`"))?;
    let index = index
        .trim()
        .parse()
        .map_err(|e| format!("invalid index `{index}`: {e}"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value `{value}`: {e}"))?;
    Ok((index, value))
}

fn parse_range(arg: &str) -> Result<(usize, usize), String> {
    let (start, end) = arg
        .split_once(':')
        .ok_or_else(|| format!("expected LO:HI, got `{arg}`"))?;
    let start = start
        .trim()
        .parse()
        .map_err(|e| format!("invalid bound `{start}`: {e}"))?;
    let end = end
        .trim()
        .parse()
        .map_err(|e| format!("invalid bound `{end}`: {e}"))?;
    Ok((start, end))
}

fn values(args: &Args) -> Vec<f64> {
    match args.random {
        Some(len) => {
            let mut rng = fastrand::Rng::with_seed(args.seed);
            (0..len).map(|_| rng.f64() * 100.0).collect()
        }
        None => args.values.clone(),
    }
}

fn run(args: Args) -> vartree::Result<()> {
    let mut tree = SegmentTree::new(values(&args));
    log::info!("built tree over {} values", tree.len());
    report::sequence(&tree);

    for &(index, value) in &args.update {
        tree.update(index, value)?;
        log::info!("update({}, {})", index, value);
    }
    if !args.update.is_empty() {
        report::sequence(&tree);
    }

    if args.query.is_empty() && args.windows.is_none() && !tree.is_empty() {
        report::range(&tree, 0, tree.len() - 1)?;
    }
    for &(start, end) in &args.query {
        report::range(&tree, start, end)?;
    }
    if let Some(width) = args.windows {
        report::windows(&tree, width)?;
    }
    if args.dump {
        report::dump(&tree);
    }
    Ok(())
}

fn main() -> ExitCode {
    // Log to stdout (if you run with `RUST_LOG=debug`).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
