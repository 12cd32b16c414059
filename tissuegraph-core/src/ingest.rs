use std::io::Read;
use std::path::Path;
use regex::Regex;
use serde::Deserialize;
use tracing::{info, warn, error};
use crate::{Delimiter, Error, QualityMode, open_source, GOLD_QUALITY, PRESENT_CALL, PROTEIN_CODING};

lazy_static! {
    static ref ENSEMBL_XREF: Regex = Regex::new(r"Ensembl:(ENSG\d+)").unwrap();
}

/// A gene from the reference annotation, keyed by its NCBI Gene ID.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct GeneRecord {
    pub gene_id: u64,
    pub ensembl: Option<String>,
    pub symbol: String,
    pub type_of_gene: Option<String>,
}

/// Columns we read from either NCBI `gene_info` or a pre-extracted gene CSV.
/// Anything not listed here is ignored.
#[derive(Debug, Deserialize)]
struct RawGeneRow {
    #[serde(rename = "GeneID", default)]
    gene_id: Option<String>,
    #[serde(rename = "Symbol", default)]
    symbol: Option<String>,
    #[serde(rename = "Ensembl", default)]
    ensembl: Option<String>,
    #[serde(rename = "dbXrefs", default)]
    db_xrefs: Option<String>,
    #[serde(rename = "type_of_gene", default)]
    type_of_gene: Option<String>,
}

impl RawGeneRow {
    fn into_record(self) -> Option<GeneRecord> {
        let RawGeneRow { gene_id, symbol, ensembl, db_xrefs, type_of_gene } = self;
        let gene_id = gene_id?.trim().parse::<u64>().ok()?;

        // A precomputed accession wins over the composite cross-reference field
        let ensembl = present(ensembl)
            .or_else(|| present(db_xrefs).and_then(|xrefs| extract_ensembl(&xrefs)));

        Some(GeneRecord {
            gene_id,
            ensembl,
            symbol: present(symbol).unwrap_or_default(),
            type_of_gene: present(type_of_gene),
        })
    }
}

/// NCBI writes `-` for an empty cell.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty() && value != "-")
}

/// Pulls the first `Ensembl:ENSG...` accession out of a `|`-separated
/// cross-reference list.
pub(crate) fn extract_ensembl(xrefs: &str) -> Option<String> {
    ENSEMBL_XREF.captures(xrefs)
        .and_then(|captures| captures.get(1))
        .map(|accession| accession.as_str().to_string())
}

impl GeneRecord {
    /// `None` when the source has no `type_of_gene` column for this gene.
    pub fn is_protein_coding(&self) -> Option<bool> {
        self.type_of_gene.as_ref().map(|kind| kind == PROTEIN_CODING)
    }

    pub fn parse_from<R: Read>(reader: R, delimiter: Delimiter) -> Result<Vec<Self>, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter.as_byte())
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut records = Vec::new();
        let mut skipped = 0usize;
        let mut row = csv::StringRecord::new();
        while csv_reader.read_record(&mut row)? {
            let raw: RawGeneRow = row.deserialize(Some(&headers))?;
            match raw.into_record() {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(skipped, "skipped gene rows without a numeric GeneID");
        }
        Ok(records)
    }
}

/// One observation of a gene in an anatomical entity. Empty cells read as `None`.
#[derive(Debug, Default, Hash, Eq, PartialEq, Clone, Deserialize)]
pub struct ExpressionRow {
    #[serde(rename = "Gene ID", default)]
    pub gene_id: Option<String>,
    #[serde(rename = "Gene name", default)]
    pub gene_name: Option<String>,
    #[serde(rename = "Anatomical entity ID", default)]
    pub anatomical_entity_id: Option<String>,
    #[serde(rename = "Anatomical entity name", default)]
    pub anatomical_entity_name: Option<String>,
    #[serde(rename = "Expression", default)]
    pub expression: Option<String>,
    #[serde(rename = "Call quality", default)]
    pub call_quality: Option<String>,
}

impl ExpressionRow {
    #[inline(always)]
    pub fn is_present(&self) -> bool {
        self.expression.as_deref() == Some(PRESENT_CALL)
    }

    #[inline(always)]
    pub fn is_gold_quality(&self) -> bool {
        self.call_quality.as_deref() == Some(GOLD_QUALITY)
    }

    fn passes(&self, mode: QualityMode) -> bool {
        match mode {
            QualityMode::Flag => self.is_present(),
            QualityMode::GoldOnly => self.is_present() && self.is_gold_quality(),
        }
    }

    /// Reads a tab-separated expression table, keeping only the rows that
    /// pass the presence filter for the given quality mode.
    pub fn parse_from<R: Read>(reader: R, mode: QualityMode) -> Result<Vec<Self>, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b'\t')
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut rows = Vec::new();
        let mut row = csv::StringRecord::new();
        while csv_reader.read_record(&mut row)? {
            let expression: ExpressionRow = row.deserialize(Some(&headers))?;
            if expression.passes(mode) {
                rows.push(expression);
            }
        }

        Ok(rows)
    }
}

/// Loads the gene reference. A source that cannot be opened or parsed is
/// logged and treated as empty.
pub fn load_gene_records(path: &Path, delimiter: Delimiter) -> Vec<GeneRecord> {
    let result = open_source(path).and_then(|reader| {
        GeneRecord::parse_from(reader, delimiter)
            .map_err(|source| Error::Csv { path: path.to_path_buf(), source })
    });

    match result {
        Ok(records) => {
            info!(path = %path.display(), records = records.len(), "loaded gene reference");
            records
        }
        Err(e) => {
            error!("{}; continuing without gene records", e);
            Vec::new()
        }
    }
}

/// Loads the expression calls, filtered per `mode`. Same fail-soft policy as
/// [`load_gene_records`].
pub fn load_expression_rows(path: &Path, mode: QualityMode) -> Vec<ExpressionRow> {
    info!(path = %path.display(), ?mode, "loading expression calls");
    let result = open_source(path).and_then(|reader| {
        ExpressionRow::parse_from(reader, mode)
            .map_err(|source| Error::Csv { path: path.to_path_buf(), source })
    });

    match result {
        Ok(rows) => {
            info!(rows = rows.len(), "kept expression calls");
            rows
        }
        Err(e) => {
            error!("{}; continuing without expression calls", e);
            Vec::new()
        }
    }
}
