use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use flate2::bufread::MultiGzDecoder;
use crate::{Error, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Opens a tabular source for reading, decompressing it on the fly
/// when the file starts with the gzip magic bytes.
pub fn open_source(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let is_gzip = reader.fill_buf()
        .map(|head| head.starts_with(&GZIP_MAGIC))
        .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;

    if is_gzip {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Delimiter {
    /// Guesses the field delimiter from the file name, ignoring a
    /// trailing `.gz`.
    pub fn infer(path: &Path) -> Delimiter {
        let name = path.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);

        let tabbed = [".tsv", ".tab", ".txt", ".gene_info"].iter()
            .any(|ext| name.ends_with(ext));
        if tabbed { Delimiter::Tab } else { Delimiter::Comma }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
        }
    }
}
