mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Commands, RunArgs};
use ocrglue_rs::{read_regions, write_regions, GluePipeline, Region};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy)]
enum Stage {
  Glue,
  Filter,
  Process,
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
    .with_writer(io::stderr)
    .init();
}

fn load(args: &RunArgs) -> Result<Vec<Region>> {
  let regions = match args.input_path() {
    Some(path) => {
      let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
      read_regions(BufReader::new(file), args.strict)
        .with_context(|| format!("Failed to load regions from {}", path.display()))?
    }
    None => read_regions(io::stdin().lock(), args.strict).context("Failed to load regions from stdin")?,
  };
  Ok(regions)
}

fn save(args: &RunArgs, regions: &[Region]) -> Result<()> {
  match &args.output {
    Some(path) => {
      let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
      write_regions(BufWriter::new(file), regions).context("Failed to write regions")?;
    }
    None => write_regions(io::stdout().lock(), regions).context("Failed to write regions")?,
  }
  Ok(())
}

fn run(stage: Stage, args: &RunArgs) -> Result<()> {
  let pipeline = GluePipeline::new(args.config());
  let regions = load(args)?;
  tracing::debug!(regions = regions.len(), config = ?pipeline.config(), "loaded regions");

  let result = match stage {
    Stage::Glue => pipeline.apply_auto_glue(&regions),
    Stage::Filter => pipeline.filter_untranslatable_text(&regions),
    Stage::Process => pipeline.process(&regions),
  };
  save(args, &result)
}

fn main() {
  let args = Args::parse();
  init_tracing(args.verbose);

  let outcome = match &args.command {
    Commands::Version => {
      println!("ocrglue {}", env!("CARGO_PKG_VERSION"));
      Ok(())
    }
    Commands::Glue(run_args) => run(Stage::Glue, run_args),
    Commands::Filter(run_args) => run(Stage::Filter, run_args),
    Commands::Process(run_args) => run(Stage::Process, run_args),
  };

  if let Err(e) = outcome {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
  }
}
