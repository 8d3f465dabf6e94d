use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use scorecast::domain::Period;
use scorecast::file;
use scorecast::print;
use scorecast::strength::fit;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// CSV file of historical results
    #[clap(short = 'i', long)]
    input: PathBuf,

    /// file to write the fitted ratings to, as JSON
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,

    /// print the fitted ratings
    #[clap(short = 'v', long)]
    verbose: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.output.is_none() && !self.verbose {
            bail!("at least one of the -o or -v flags must be specified");
        }
        if self.output.as_ref() == Some(&self.input) {
            bail!("the output file must differ from the input file");
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let results = fit::read_results(BufReader::new(File::open(&args.input)?))?;
    info!("read {} results from {}", results.len(), args.input.display());
    let ratings = fit::fit_ratings(&results)?;
    info!("fitted ratings for {} teams", ratings.len());

    if args.verbose {
        for period in Period::iter() {
            info!(
                "Ratings ({period}):\n{}",
                Console::default().render(&print::tabulate_ratings(&ratings, period))
            );
        }
    }
    if let Some(output) = &args.output {
        file::write_json(output, &ratings)?;
        info!("wrote ratings to {}", output.display());
    }
    Ok(())
}
