use std::{path::{PathBuf, Path}, fs::read_to_string, io::{self, Write, BufRead}};

use anyhow::{Context, Result};
use custom_stack::driver::Driver;
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, StructOpt)]
#[structopt()]
struct Options {
    /// Print the stack before every command
    #[structopt(long)]
    trace: bool,

    /// Script of stack commands, interactive prompt if not present
    #[structopt(parse(from_os_str))]
    source_file_path: Option<PathBuf>
}

fn main() -> Result<()> {
    init_logging();

    let options = Options::from_args();
    let mut driver = Driver::new(io::stdout(), options.trace);

    match options.source_file_path {
        Some(source_file_path) => run_file(&mut driver, &source_file_path),
        None => run_prompt(&mut driver)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .ok();
}

fn run_file<W: Write>(driver: &mut Driver<W>, source_file_path: &Path) -> Result<()> {
    let source = read_to_string(source_file_path).context("Failed to read script file")?;
    driver.run(&source).context("Script failed")
}

fn run_prompt<W: Write>(driver: &mut Driver<W>) -> Result<()> {
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("stdin failed")? == 0 {
            println!();
            return Ok(());
        }

        // A bad line is reported; the stack survives for the next one.
        if let Err(e) = driver.run(&line) {
            println!("Error: {:#}", e);
        }
    }
}
