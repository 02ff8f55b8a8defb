//! Indexing pipeline
//!
//! Chunking, text ingestion, and domain table population.

mod chunker;
mod ingest;
mod populate;

pub use chunker::*;
pub use ingest::*;
pub use populate::*;
