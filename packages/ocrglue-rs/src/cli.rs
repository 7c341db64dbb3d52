//! Command line arguments backing the `ocrglue` binary.
use clap::{Args as ClapArgs, Parser, Subcommand};
use ocrglue_rs::config::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_GROUPING_POWER};
use ocrglue_rs::GlueConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "ocrglue",
  about = "Merge raw OCR boxes into lines and paragraphs and filter untranslatable noise",
  version
)]
pub struct Args {
  /// Log pipeline decisions to stderr
  #[arg(long, short = 'v', global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Merge boxes into lines and paragraphs, classify dialog, resolve overlaps
  Glue(RunArgs),
  /// Drop regions that are not worth translating
  Filter(RunArgs),
  /// Glue, then filter
  Process(RunArgs),
}

#[derive(ClapArgs, Debug)]
pub struct RunArgs {
  /// JSON file with an array of regions; reads stdin when omitted or `-`
  pub input: Option<PathBuf>,

  /// Write the resulting JSON here instead of stdout
  #[arg(long, short = 'o')]
  pub output: Option<PathBuf>,

  /// Minimum OCR confidence a region needs to be kept (0.0 - 1.0)
  #[arg(long, env = "OCRGLUE_CONFIDENCE_THRESHOLD", default_value_t = DEFAULT_CONFIDENCE_THRESHOLD)]
  pub confidence_threshold: f64,

  /// Paragraph clustering aggressiveness (0.25 - 1.0)
  #[arg(long, env = "OCRGLUE_GROUPING_POWER", default_value_t = DEFAULT_GROUPING_POWER)]
  pub grouping_power: f64,

  /// Reject input containing inverted or non-finite rects instead of repairing it
  #[arg(long)]
  pub strict: bool,
}

impl RunArgs {
  pub fn config(&self) -> GlueConfig {
    GlueConfig::default()
      .with_confidence_threshold(self.confidence_threshold)
      .with_grouping_power(self.grouping_power)
  }

  /// Input path, or `None` for stdin.
  pub fn input_path(&self) -> Option<&PathBuf> {
    self.input.as_ref().filter(|p| p.as_os_str() != "-")
  }
}
