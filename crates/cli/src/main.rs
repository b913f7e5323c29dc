//! `medknow`: convert and inspect FHIR MedicationKnowledge resources.

use clap::Parser;
use medknow_cli::{Cli, init_logging, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let output = run(&cli.command)?;
    if !output.is_empty() {
        println!("{}", output.trim_end());
    }
    Ok(())
}
