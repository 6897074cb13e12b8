use std::path::Path;

use anyhow::Context;
use fmmap::{MmapFile, MmapFileExt};

use crate::extractor::Document;

/// Memory-maps a specification file for a single parse.
pub struct SpecLoader {
  file: MmapFile,
}

impl SpecLoader {
  pub fn open(path: &Path) -> anyhow::Result<Self> {
    let file = MmapFile::open(path).with_context(|| format!("Failed to open specification {}", path.display()))?;
    Ok(Self { file })
  }

  pub fn parse(&self) -> anyhow::Result<Document> {
    let document = Document::from_slice(self.file.as_slice())
      .with_context(|| format!("Failed to load specification {}", self.file.path().display()))?;
    Ok(document)
  }
}

/// Opens and parses a specification file in one step.
pub fn load_document(path: &Path) -> anyhow::Result<Document> {
  SpecLoader::open(path)?.parse()
}
