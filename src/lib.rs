pub mod asm;
pub mod cli;
pub mod error;
pub mod index;
pub mod model;
pub mod pack;
pub mod report;
pub mod symbols;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use walkdir::WalkDir;

use crate::model::CLIENTSCRIPT_NAMESPACE;
use crate::report::TracingReporter;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    let reporter = TracingReporter;

    // 1. ── Symbols ────────────────────────────────────────────────────
    let symbols = symbols::build(&args.components, &reporter)
        .with_context(|| format!("Building symbols from {}", args.components.display()))?;

    // 2. ── Assemble ───────────────────────────────────────────────────
    let sources = collect_sources(&args.input)
        .with_context(|| format!("Scanning {}", args.input.display()))?;
    pack::assemble(
        &sources,
        &symbols,
        &args.output,
        CLIENTSCRIPT_NAMESPACE,
        &asm::PlainAssembler,
        &asm::PlainCodec,
        &reporter,
    )
    .with_context(|| "Assembling scripts")?;

    // 3. ── Index ──────────────────────────────────────────────────────
    index::build(&args.output, CLIENTSCRIPT_NAMESPACE, &reporter)
        .with_context(|| "Building index file")?;

    Ok(())
}

fn collect_sources(input: &std::path::Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for entry in WalkDir::new(input) {
        let entry = entry?;
        if entry.file_type().is_file() {
            sources.push(entry.into_path());
        }
    }
    Ok(sources)
}
