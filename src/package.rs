//! Archive packaging.
//!
//! The converter hands over `(member path, JSON text)` pairs and gets back
//! the bytes of a zip container. Nothing else about the container format
//! leaks into the rest of the crate.

use std::collections::BTreeSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::{Error, Result};

/// Turns archive members into container bytes.
pub trait PackageWriter {
    fn write(&self, members: &[(String, String)]) -> Result<Vec<u8>>;
}

/// Zip container writer (deflate by default).
#[derive(Debug, Clone, Copy)]
pub struct ZipPackageWriter {
    compression: CompressionMethod,
}

impl ZipPackageWriter {
    pub fn new() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }

    /// Store members uncompressed
    pub fn stored() -> Self {
        Self {
            compression: CompressionMethod::Stored,
        }
    }
}

impl Default for ZipPackageWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parent folders of every nested member, e.g. `pages/`.
fn folders(members: &[(String, String)]) -> BTreeSet<String> {
    members
        .iter()
        .filter_map(|(name, _)| name.rsplit_once('/').map(|(dir, _)| format!("{}/", dir)))
        .collect()
}

impl PackageWriter for ZipPackageWriter {
    fn write(&self, members: &[(String, String)]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(self.compression);

        for dir in folders(members) {
            zip.add_directory(dir.as_str(), options)?;
        }
        for (name, body) in members {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(body.as_bytes())
                .map_err(|e| Error::Packaging(format!("writing {}: {}", name, e)))?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn members() -> Vec<(String, String)> {
        vec![
            ("document.json".to_string(), "{}".to_string()),
            ("pages/ABC.json".to_string(), "{\n  \"a\": 1\n}".to_string()),
        ]
    }

    #[test]
    fn writes_readable_zip() {
        let bytes = ZipPackageWriter::new().write(&members()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut page = String::new();
        archive
            .by_name("pages/ABC.json")
            .unwrap()
            .read_to_string(&mut page)
            .unwrap();
        assert_eq!(page, "{\n  \"a\": 1\n}");
        assert!(archive.by_name("pages/").unwrap().is_dir());
    }

    #[test]
    fn stored_and_deflated_hold_same_members() {
        for writer in [ZipPackageWriter::new(), ZipPackageWriter::stored()] {
            let bytes = writer.write(&members()).unwrap();
            let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
            let mut names: Vec<&str> = archive.file_names().collect();
            names.sort();
            assert_eq!(names, vec!["document.json", "pages/", "pages/ABC.json"]);
        }
    }

    #[test]
    fn folder_entries_come_from_nested_paths() {
        let f = folders(&members());
        assert_eq!(f.into_iter().collect::<Vec<_>>(), vec!["pages/".to_string()]);
    }
}
