//! CLI argument definitions

use campusbot_core::RetrievalMode;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "campusbot")]
#[command(
    author,
    version,
    about = "University information assistant with retrieval-augmented chat"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "CAMPUSBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),

    /// Ingest every .txt file in a directory
    Ingest(IngestArgs),

    /// Ingest a single text file as an uploaded document
    IngestText(IngestTextArgs),

    /// Embed every domain table row into the chunk store
    Populate,

    /// Load JSON rows into a domain table
    Load(LoadArgs),

    /// Show which tables a query routes to and the rows it matches
    Route(QueryArgs),

    /// Nearest-neighbour search over stored chunks
    Search(SearchArgs),

    /// Ask a single question
    Chat(ChatArgs),

    /// Show database status
    Status,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Socket address to listen on
    #[arg(long, env = "CAMPUSBOT_LISTEN")]
    pub listen: Option<String>,
}

#[derive(Args)]
pub struct IngestArgs {
    /// Directory holding .txt files
    pub dir: PathBuf,
}

#[derive(Args)]
pub struct IngestTextArgs {
    /// Text file to ingest
    pub file: PathBuf,

    /// Recorded filename (defaults to the file's name)
    #[arg(long)]
    pub filename: Option<String>,

    /// Recorded storage path (defaults to uploads/<filename>)
    #[arg(long)]
    pub storage_path: Option<String>,
}

#[derive(Args)]
pub struct LoadArgs {
    /// Domain table name
    pub table: String,

    /// JSON file holding an array of row objects
    pub file: PathBuf,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Query text
    #[arg(required = true)]
    pub query: Vec<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Query text
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Number of results
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct ChatArgs {
    /// Question text
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Retrieval mode override
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    Keyword,
    Embedding,
    Auto,
}

impl From<ModeArg> for RetrievalMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Keyword => RetrievalMode::Keyword,
            ModeArg::Embedding => RetrievalMode::Embedding,
            ModeArg::Auto => RetrievalMode::Auto,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Cli,
    Json,
}
