use tracing::{debug, info};
use crate::{ExpressionRow, GeneIndex, ResolvedRow, ResolutionTier};

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct ResolutionStats {
    pub by_accession: usize,
    pub by_symbol: usize,
    pub dropped: usize,
}

impl ResolutionStats {
    pub fn resolved(&self) -> usize {
        self.by_accession + self.by_symbol
    }
}

#[derive(Debug)]
pub struct Resolution {
    pub rows: Vec<ResolvedRow>,
    pub stats: ResolutionStats,
}

/// Maps expression rows onto NCBI Gene IDs.
///
/// The accession lookup always runs first. The symbol lookup is only
/// consulted when the accession is missing from the row or from the index,
/// so it can never override an accession hit. Rows that miss both are
/// dropped; that is expected for genes outside the reference set.
#[derive(Debug, Copy, Clone)]
pub struct Resolver<'a> {
    index: &'a GeneIndex,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a GeneIndex) -> Resolver<'a> {
        Resolver { index }
    }

    pub fn lookup(&self, row: &ExpressionRow) -> Option<(u64, ResolutionTier)> {
        let accession = row.gene_id.as_deref()
            .filter(|id| !id.is_empty())
            .and_then(|id| self.index.by_accession(id));
        if let Some(gene_id) = accession {
            return Some((gene_id, ResolutionTier::Accession));
        }

        row.gene_name.as_deref()
            .filter(|name| !name.is_empty())
            .and_then(|name| self.index.by_symbol(name))
            .map(|gene_id| (gene_id, ResolutionTier::Symbol))
    }

    pub fn resolve(&self, row: ExpressionRow) -> Option<ResolvedRow> {
        let (gene_id, tier) = self.lookup(&row)?;
        Some(ResolvedRow::new(row, gene_id, tier))
    }

    pub fn resolve_all<I>(&self, rows: I) -> Resolution
        where I: IntoIterator<Item=ExpressionRow>
    {
        let mut stats = ResolutionStats::default();
        let mut resolved = Vec::new();

        for row in rows {
            match self.lookup(&row) {
                Some((gene_id, tier)) => {
                    match tier {
                        ResolutionTier::Accession => stats.by_accession += 1,
                        ResolutionTier::Symbol => stats.by_symbol += 1,
                    }
                    resolved.push(ResolvedRow::new(row, gene_id, tier));
                }
                None => {
                    debug!(gene_id = ?row.gene_id, gene_name = ?row.gene_name, "no NCBI Gene ID for expression row");
                    stats.dropped += 1;
                }
            }
        }

        info!(
            by_accession = stats.by_accession,
            by_symbol = stats.by_symbol,
            dropped = stats.dropped,
            "resolved gene identifiers"
        );
        Resolution { rows: resolved, stats }
    }
}
