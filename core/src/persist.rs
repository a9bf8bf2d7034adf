//! On-disk cache for a built index.
//!
//! The cache is disposable: the index is always rebuildable from its two
//! sources, so a corrupt or stale cache directory is replaced, never
//! repaired.

use crate::index::{IndexEntry, TitleIndex};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_entries: u32,
    pub created_at: String,
    pub version: u32,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
    fn entries(&self) -> PathBuf {
        self.root.join("entries.bin")
    }
    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

pub fn save_index(paths: &IndexPaths, index: &TitleIndex) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.entries())?;
    let bytes = bincode::serialize(index.entries())?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_index(paths: &IndexPaths) -> Result<TitleIndex> {
    let mut f = File::open(paths.entries())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let entries: Vec<IndexEntry> = bincode::deserialize(&buf)?;
    Ok(TitleIndex::from_entries(entries))
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}
