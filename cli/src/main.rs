use std::path::PathBuf;

use clap::{Parser as ClapParser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use arceager::{read_treebank_file, Err, Parser, TrainConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
  /// Perceptron over static oracle derivations
  Static,
  /// Online perceptron against the dynamic oracle
  Dynamic,
}

/// Trains a greedy arc-eager dependency parser and reports its attachment score
#[derive(Debug, ClapParser)]
#[command(name = "arceager", version)]
struct Args {
  /// Treebank to train on
  #[arg(long)]
  train: PathBuf,

  /// Treebank to evaluate on (defaults to the training treebank)
  #[arg(long)]
  test: Option<PathBuf>,

  #[arg(long, value_enum, default_value_t = Mode::Dynamic)]
  mode: Mode,

  #[arg(long, default_value_t = 100)]
  epochs: usize,

  #[arg(long, default_value_t = 1.0)]
  step_size: f64,

  /// Seed for the dynamic trainer's choices
  #[arg(long)]
  seed: Option<u64>,

  /// Print every parsed tree before the score
  #[arg(short, long)]
  print_trees: bool,
}

fn main() -> Result<(), Err> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let args = Args::parse();
  let config = TrainConfig {
    step_size: args.step_size,
    max_epochs: args.epochs,
    seed: args.seed,
  };

  let train = read_treebank_file(&args.train)?;
  info!(sentences = train.len(), path = %args.train.display(), "read training treebank");

  let mut parser = Parser::new();
  let report = match args.mode {
    Mode::Static => parser.train_static(&train, &config),
    Mode::Dynamic => parser.train_dynamic(&train, &config),
  };
  for epoch in report.epochs.iter() {
    println!("{}", epoch);
  }

  let test = match &args.test {
    Some(path) => read_treebank_file(path)?,
    None => train,
  };

  if args.print_trees {
    for tree in test.iter() {
      println!("{}\n", parser.parse(&tree.tokens)?);
    }
  }

  println!("UAS = {:.4}", parser.evaluate(&test)?);
  Ok(())
}
