use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory with .rs2asm sources (and their .hash sidecars)
    pub input: PathBuf,
    /// Output cache directory
    pub output: PathBuf,
    /// TOML file mapping interface components to ids
    #[arg(short, long)]
    pub components: PathBuf,
}
