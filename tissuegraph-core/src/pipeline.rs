use std::path::PathBuf;
use tracing::info;
use crate::{Delimiter, GeneIndex, IndexStats, QualityMode, ResolutionStats, Resolver, Result};
use crate::ingest::{load_expression_rows, load_gene_records};
use crate::export::{write_edges, write_nodes};

pub const GENE_INFO_PATH: &str = "data/input/protein_coding_gene.csv";
pub const EXPRESSION_INFO_PATH: &str = "data/input/Homo_sapiens_expr_simple.tsv.gz";
pub const NODE_OUTPUT_PATH: &str = "data/output/csv/node_Anatomy.csv";
pub const EDGE_OUTPUT_PATH: &str = "data/output/csv/edge_Gene_expressedIn_Anatomy.csv";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PipelineOptions {
    /// Exclude genes whose `type_of_gene` is present and not protein-coding.
    pub protein_coding_only: bool,
    pub quality_mode: QualityMode,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            protein_coding_only: true,
            quality_mode: QualityMode::Flag,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PipelineConfig {
    pub gene_info_path: PathBuf,
    pub expression_path: PathBuf,
    pub node_output_path: PathBuf,
    pub edge_output_path: PathBuf,
    /// Inferred from the gene file name when unset.
    pub gene_delimiter: Option<Delimiter>,
    pub options: PipelineOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            gene_info_path: PathBuf::from(GENE_INFO_PATH),
            expression_path: PathBuf::from(EXPRESSION_INFO_PATH),
            node_output_path: PathBuf::from(NODE_OUTPUT_PATH),
            edge_output_path: PathBuf::from(EDGE_OUTPUT_PATH),
            gene_delimiter: None,
            options: PipelineOptions::default(),
        }
    }
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct RunSummary {
    pub gene_records: usize,
    pub index: IndexStats,
    pub expression_rows: usize,
    pub resolution: ResolutionStats,
    pub nodes_written: usize,
    pub edges_written: usize,
}

/// Runs the whole conversion once.
///
/// Unreadable inputs are logged and treated as empty, so the run still
/// writes both tables (possibly with only a header). Only failures while
/// writing are returned. If the edge table fails, the node table already
/// written stays on disk.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let options = config.options;
    let delimiter = config.gene_delimiter
        .unwrap_or_else(|| Delimiter::infer(&config.gene_info_path));

    let mut genes = load_gene_records(&config.gene_info_path, delimiter);
    if options.protein_coding_only {
        let before = genes.len();
        genes.retain(|gene| gene.is_protein_coding() != Some(false));
        info!(excluded = before - genes.len(), "restricted gene reference to protein-coding genes");
    }
    let index = GeneIndex::new(&genes);

    let expression = load_expression_rows(&config.expression_path, options.quality_mode);
    let expression_rows = expression.len();

    let resolution = Resolver::new(&index).resolve_all(expression);

    let nodes_written = write_nodes(&resolution.rows, &config.node_output_path)?;
    let edges_written = write_edges(&resolution.rows, &config.edge_output_path, options.quality_mode)?;

    Ok(RunSummary {
        gene_records: genes.len(),
        index: index.stats(),
        expression_rows,
        resolution: resolution.stats,
        nodes_written,
        edges_written,
    })
}
