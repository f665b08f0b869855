//! Delimited-file ingest for per-segment survey exports.
//!
//! Each input file holds one segment's transects; the segment id is the
//! trailing digits of the file stem (`beach19.csv` -> segment 19). Files
//! without a trailing number, and non-CSV files, are skipped. Within a
//! file, rows carry the transect line id plus the (distance, elevation)
//! sample columns.

use super::{Profile, ProfileKey, ProfileStore, Sample};
use crate::error::StoreError;
use log::{debug, info};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "LINE_ID")]
    line_id: u32,
    #[serde(rename = "FIRST_DIST")]
    x: f64,
    #[serde(rename = "FIRST_Z")]
    y: f64,
}

/// Reads every `*.csv` under `dir` into a grouped store. `region` tags
/// every profile of the run (the survey exports carry no region column).
pub fn read_segment_csvs(dir: &Path, region: u16) -> Result<ProfileStore, StoreError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    // Directory iteration order is platform-dependent.
    paths.sort();

    let mut grouped: BTreeMap<ProfileKey, Vec<Sample>> = BTreeMap::new();
    for path in paths {
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            debug!("skipping {} (not a .csv)", path.display());
            continue;
        }
        let segment = match trailing_number(&path) {
            Some(n) => n,
            None => {
                debug!("skipping {} (no segment number in name)", path.display());
                continue;
            }
        };

        let mut reader = csv::Reader::from_path(&path).map_err(|source| StoreError::Csv {
            path: path.clone(),
            source,
        })?;
        let mut rows = 0usize;
        for row in reader.deserialize::<RawRow>() {
            let row = row.map_err(|source| StoreError::Csv {
                path: path.clone(),
                source,
            })?;
            let key = ProfileKey {
                region,
                segment,
                line: row.line_id,
            };
            grouped
                .entry(key)
                .or_default()
                .push(Sample { x: row.x, y: row.y });
            rows += 1;
        }
        info!("read {} rows from {}", rows, path.display());
    }

    if grouped.is_empty() {
        return Err(StoreError::NoProfiles(dir.to_path_buf()));
    }
    let profiles = grouped
        .into_iter()
        .map(|(key, samples)| Profile::new(key, samples))
        .collect();
    Ok(ProfileStore::new(profiles))
}

fn trailing_number(path: &Path) -> Option<u16> {
    let stem = path.file_stem()?.to_str()?;
    let digits: String = stem
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn trailing_number_parses_stem_suffix() {
        assert_eq!(trailing_number(Path::new("a/beach19.csv")), Some(19));
        assert_eq!(trailing_number(Path::new("seg_2.csv")), Some(2));
        assert_eq!(trailing_number(Path::new("notes.csv")), None);
    }

    #[test]
    fn reads_and_groups_segment_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles7.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "LINE_ID,FIRST_DIST,FIRST_Z").unwrap();
        writeln!(f, "2,1.0,0.5").unwrap();
        writeln!(f, "1,0.0,-1.0").unwrap();
        writeln!(f, "1,1.0,0.2").unwrap();
        writeln!(f, "2,0.0,-0.5").unwrap();
        drop(f);
        // A file without a trailing number is skipped, not an error.
        std::fs::write(dir.path().join("readme.csv"), "LINE_ID,FIRST_DIST,FIRST_Z\n").unwrap();

        let store = read_segment_csvs(dir.path(), 29).unwrap();
        assert_eq!(store.len(), 2);
        let keys: Vec<u32> = store.profiles().iter().map(|p| p.key.line).collect();
        assert_eq!(keys, vec![1, 2]);
        assert_eq!(store.profiles()[0].key.segment, 7);
        assert_eq!(store.profiles()[0].len(), 2);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_segment_csvs(dir.path(), 29),
            Err(StoreError::NoProfiles(_))
        ));
    }
}
