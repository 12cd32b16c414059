use serde::{Serialize, Serializer};
use crate::ExpressionRow;

/// Which lookup produced a row's NCBI Gene ID.
#[derive(Debug, Hash, Copy, Clone, Eq, PartialEq)]
pub enum ResolutionTier {
    Accession,
    Symbol,
}

/// An expression call that was mapped onto an NCBI Gene ID.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct ResolvedRow {
    pub row: ExpressionRow,
    pub ncbi_gene_id: u64,
    pub is_gold_quality: bool,
    pub tier: ResolutionTier,
}

impl ResolvedRow {
    pub fn new(row: ExpressionRow, ncbi_gene_id: u64, tier: ResolutionTier) -> ResolvedRow {
        ResolvedRow {
            is_gold_quality: row.is_gold_quality(),
            ncbi_gene_id,
            tier,
            row,
        }
    }

    pub fn node(&self) -> NodeRow {
        NodeRow {
            identifier: self.row.anatomical_entity_id.clone(),
            name: self.row.anatomical_entity_name.clone(),
        }
    }

    pub fn edge(&self) -> EdgeRow {
        EdgeRow {
            source_id: self.ncbi_gene_id,
            target_id: self.row.anatomical_entity_id.clone(),
        }
    }

    pub fn qualified_edge(&self) -> QualifiedEdgeRow {
        QualifiedEdgeRow {
            source_id: self.ncbi_gene_id,
            target_id: self.row.anatomical_entity_id.clone(),
            is_gold_quality: self.is_gold_quality,
        }
    }
}

#[derive(Debug, Hash, Eq, PartialEq, Clone, Serialize)]
pub struct NodeRow {
    pub identifier: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Hash, Eq, PartialEq, Clone, Serialize)]
pub struct EdgeRow {
    pub source_id: u64,
    pub target_id: Option<String>,
}

#[derive(Debug, Hash, Eq, PartialEq, Clone, Serialize)]
pub struct QualifiedEdgeRow {
    pub source_id: u64,
    pub target_id: Option<String>,
    #[serde(serialize_with = "capitalized_bool")]
    pub is_gold_quality: bool,
}

// Downstream loaders of the edge table expect `True`/`False`
fn capitalized_bool<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}
