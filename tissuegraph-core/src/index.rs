use std::collections::HashMap;
use tracing::{info, warn};
use crate::GeneRecord;

pub type AccessionIndex = HashMap<String, u64>;
pub type SymbolIndex = HashMap<String, u64>;

/// Counts gathered while building a [`GeneIndex`].
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct IndexStats {
    pub accession_keys: usize,
    pub symbol_keys: usize,
    /// Keys that were reassigned to a different gene by a later record.
    pub accession_collisions: usize,
    pub symbol_collisions: usize,
}

/// Immutable lookups from Ensembl accession and gene symbol to NCBI Gene ID.
#[derive(Debug, Eq, PartialEq)]
pub struct GeneIndex {
    by_accession: AccessionIndex,
    by_symbol: SymbolIndex,
    stats: IndexStats,
}

impl GeneIndex {

    /// Builds both lookups in one pass over `records`, in order.
    ///
    /// When a key appears more than once the later record wins. Every key
    /// reassigned to a different gene is counted in [`IndexStats`] and logged.
    pub fn new<'a, I>(records: I) -> GeneIndex
        where I: IntoIterator<Item=&'a GeneRecord>
    {
        let mut by_accession: AccessionIndex = HashMap::new();
        let mut by_symbol: SymbolIndex = HashMap::new();
        let mut stats = IndexStats::default();

        for record in records {
            if let Some(accession) = record.ensembl.as_ref().filter(|a| !a.is_empty()) {
                let previous = by_accession.insert(accession.clone(), record.gene_id);
                if previous.map_or(false, |id| id != record.gene_id) {
                    stats.accession_collisions += 1;
                }
            }

            if !record.symbol.is_empty() {
                let previous = by_symbol.insert(record.symbol.clone(), record.gene_id);
                if previous.map_or(false, |id| id != record.gene_id) {
                    stats.symbol_collisions += 1;
                }
            }
        }

        stats.accession_keys = by_accession.len();
        stats.symbol_keys = by_symbol.len();

        if stats.accession_collisions > 0 || stats.symbol_collisions > 0 {
            warn!(
                accession_collisions = stats.accession_collisions,
                symbol_collisions = stats.symbol_collisions,
                "duplicate keys in gene reference; the last record for each key wins"
            );
        }
        info!(
            accessions = stats.accession_keys,
            symbols = stats.symbol_keys,
            "built gene index"
        );

        GeneIndex { by_accession, by_symbol, stats }
    }

    pub fn by_accession(&self, accession: &str) -> Option<u64> {
        self.by_accession.get(accession).copied()
    }

    pub fn by_symbol(&self, symbol: &str) -> Option<u64> {
        self.by_symbol.get(symbol).copied()
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.by_accession.is_empty() && self.by_symbol.is_empty()
    }
}
