use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Write the backend tsconfig.json into a project tree"
)]
pub struct Cli {
    /// Directory the project files are written under
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// TOML config file (defaults to ~/.config/tsconfig_scaffold/scaffold.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
