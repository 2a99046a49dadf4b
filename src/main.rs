/*!
 * Process & Resource Manager - Main Entry Point
 *
 * Runs command scripts against a simulated manager:
 * - Commands read from files, or stdin when none are given
 * - Results written to stdout or an output file
 * - Logs on stderr, filtered by RUST_LOG
 */

use anyhow::{Context, Result};
use clap::Parser;
use pr_manager::{init_tracing, ProcessManager, Shell, SimConfig};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "prm", about = "Process & resource manager simulator", version)]
struct Args {
    /// Command scripts to run in order (stdin when omitted)
    files: Vec<PathBuf>,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file (replaces the environment settings)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of resources (overrides PRM_RESOURCES)
    #[arg(short, long)]
    resources: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::from_env()?,
    };
    if let Some(count) = args.resources {
        config.resource_count = count;
        config.validate()?;
    }

    init_tracing(config.trace_json);
    info!(resources = config.resource_count, "Process manager starting");

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let manager = ProcessManager::builder().with_config(&config).build();
    let mut shell = Shell::new(manager, out);
    shell.boot()?;

    let mut executed = 0;
    if args.files.is_empty() {
        executed += shell.run(io::stdin().lock())?;
    } else {
        for path in &args.files {
            let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            executed += shell.run(BufReader::new(file))?;
        }
    }

    shell.into_inner().flush()?;
    info!(executed, "Done");
    Ok(())
}
