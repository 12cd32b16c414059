#[macro_use]
extern crate lazy_static;

use std::convert::TryFrom;
use serde::{Deserialize, Serialize};

mod error;
mod source;
mod ingest;
mod models;
mod index;
mod resolve;
mod export;
mod pipeline;

pub use error::Error;
pub use source::{open_source, Delimiter};
pub use ingest::{GeneRecord, ExpressionRow, load_gene_records, load_expression_rows};
pub use models::{ResolvedRow, ResolutionTier, NodeRow, EdgeRow, QualifiedEdgeRow};
pub use index::{GeneIndex, IndexStats};
pub use resolve::{Resolver, Resolution, ResolutionStats};
pub use export::{TableExporter, write_nodes, write_edges};
pub use pipeline::{PipelineConfig, PipelineOptions, RunSummary, run};
pub use pipeline::{GENE_INFO_PATH, EXPRESSION_INFO_PATH, NODE_OUTPUT_PATH, EDGE_OUTPUT_PATH};

pub type Result<T> = std::result::Result<T, Error>;

/// How the gold-quality call is treated by the expression loader.
///
/// The mode also decides the layout of the edge table: with `Flag` the
/// quality flag is an output column (and part of the dedup key), with
/// `GoldOnly` every surviving row is gold and the column is dropped.
#[derive(Debug, Hash, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum QualityMode {
    #[serde(rename = "flag")]
    Flag,
    #[serde(rename = "gold-only")]
    GoldOnly,
}

impl Default for QualityMode {
    fn default() -> Self {
        QualityMode::Flag
    }
}

impl TryFrom<&str> for QualityMode {
    type Error = ();

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mode = match value {
            "flag" => QualityMode::Flag,
            "gold-only" => QualityMode::GoldOnly,
            _ => return Err(()),
        };
        Ok(mode)
    }
}

/// The value of the `Expression` column for an expressed call.
pub const PRESENT_CALL: &str = "present";

/// The value of the `Call quality` column for the highest-confidence calls.
pub const GOLD_QUALITY: &str = "gold quality";

/// The `type_of_gene` value NCBI uses for protein-coding genes.
pub const PROTEIN_CODING: &str = "protein-coding";
