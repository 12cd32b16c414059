use std::fs::File;
use std::hash::Hash;
use std::io::Write;
use std::path::Path;
use itertools::Itertools;
use serde::Serialize;
use tracing::info;
use crate::{Error, QualityMode, ResolvedRow, Result};

pub const NODE_HEADER: &[&str] = &["identifier", "name"];
pub const EDGE_HEADER: &[&str] = &["source_id", "target_id"];
pub const QUALIFIED_EDGE_HEADER: &[&str] = &["source_id", "target_id", "is_gold_quality"];

/// Writes a projection of resolved rows as a comma-separated table.
///
/// Rows are deduplicated by value, keeping the first occurrence, and the
/// header is written even when there are no rows.
pub struct TableExporter<I: Iterator> {
    header: &'static [&'static str],
    record_iter: I,
}

impl<T, I: Iterator<Item=T>> TableExporter<I>
    where T: Serialize + Eq + Hash + Clone
{
    pub fn new(header: &'static [&'static str], record_iter: I) -> TableExporter<I> {
        TableExporter { header, record_iter }
    }

    /// Returns the number of rows written, not counting the header.
    pub fn write_all<W: Write>(&mut self, writer: W) -> csv::Result<usize> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(b',')
            .from_writer(writer);
        csv_writer.write_record(self.header)?;

        let mut written = 0;
        for record in self.record_iter.by_ref().unique() {
            csv_writer.serialize(record)?;
            written += 1;
        }
        csv_writer.flush()?;
        Ok(written)
    }

    /// Replaces the file at `path`, creating missing parent directories.
    pub fn write_to_path(&mut self, path: &Path) -> Result<usize> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = File::create(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let written = self.write_all(file).map_err(|source| Error::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), rows = written, "wrote table");
        Ok(written)
    }
}

/// Writes the anatomical entity node table.
pub fn write_nodes(rows: &[ResolvedRow], path: &Path) -> Result<usize> {
    TableExporter::new(NODE_HEADER, rows.iter().map(ResolvedRow::node))
        .write_to_path(path)
}

/// Writes the gene-to-anatomy edge table. With [`QualityMode::Flag`] the
/// quality flag is a column and part of the dedup key.
pub fn write_edges(rows: &[ResolvedRow], path: &Path, mode: QualityMode) -> Result<usize> {
    match mode {
        QualityMode::Flag => {
            TableExporter::new(QUALIFIED_EDGE_HEADER, rows.iter().map(ResolvedRow::qualified_edge))
                .write_to_path(path)
        }
        QualityMode::GoldOnly => {
            TableExporter::new(EDGE_HEADER, rows.iter().map(ResolvedRow::edge))
                .write_to_path(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExpressionRow, ResolutionTier};

    fn resolved(gene_id: u64, entity: &str, name: Option<&str>, quality: &str) -> ResolvedRow {
        let row = ExpressionRow {
            gene_id: None,
            gene_name: None,
            anatomical_entity_id: Some(entity.to_string()),
            anatomical_entity_name: name.map(str::to_string),
            expression: Some("present".to_string()),
            call_quality: Some(quality.to_string()),
        };
        ResolvedRow::new(row, gene_id, ResolutionTier::Symbol)
    }

    fn export<T, I>(header: &'static [&'static str], rows: I) -> (String, usize)
        where T: Serialize + Eq + Hash + Clone, I: Iterator<Item=T>
    {
        let mut output = Vec::new();
        let written = TableExporter::new(header, rows).write_all(&mut output).unwrap();
        (String::from_utf8(output).unwrap(), written)
    }

    #[test]
    fn test_nodes_deduplicated() {
        let rows = vec![
            resolved(1, "E1", Some("Eye"), "gold quality"),
            resolved(2, "E1", Some("Eye"), "silver quality"),
            resolved(2, "E2", Some("Skin"), "silver quality"),
            resolved(3, "E3", None, "silver quality"),
        ];
        let (output, written) = export(NODE_HEADER, rows.iter().map(ResolvedRow::node));
        assert_eq!(written, 3);
        assert_eq!(output, "identifier,name\nE1,Eye\nE2,Skin\nE3,\n");
    }

    #[test]
    fn test_qualified_edges_keep_quality_in_key() {
        let rows = vec![
            resolved(1, "E1", Some("Eye"), "gold quality"),
            resolved(1, "E1", Some("Eye"), "gold quality"),
            resolved(1, "E1", Some("Eye"), "silver quality"),
            resolved(2, "E2", Some("Skin"), "silver quality"),
        ];
        let (output, written) = export(QUALIFIED_EDGE_HEADER, rows.iter().map(ResolvedRow::qualified_edge));
        assert_eq!(written, 3);
        assert_eq!(output, "source_id,target_id,is_gold_quality\n1,E1,True\n1,E1,False\n2,E2,False\n");
    }

    #[test]
    fn test_plain_edges_deduplicated_by_pair() {
        let rows = vec![
            resolved(1, "E1", Some("Eye"), "gold quality"),
            resolved(1, "E1", Some("Eye"), "silver quality"),
        ];
        let (output, written) = export(EDGE_HEADER, rows.iter().map(ResolvedRow::edge));
        assert_eq!(written, 1);
        assert_eq!(output, "source_id,target_id\n1,E1\n");
    }

    #[test]
    fn test_empty_table_has_header() {
        let rows: Vec<ResolvedRow> = Vec::new();
        let (output, written) = export(NODE_HEADER, rows.iter().map(ResolvedRow::node));
        assert_eq!(written, 0);
        assert_eq!(output, "identifier,name\n");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("csv").join("node_Anatomy.csv");
        let rows = vec![resolved(1, "E1", Some("Eye"), "gold quality")];

        assert_eq!(write_nodes(&rows, &path).unwrap(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "identifier,name\nE1,Eye\n");
    }
}
