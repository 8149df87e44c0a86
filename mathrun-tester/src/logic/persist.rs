use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Filesystem-safe UTC timestamp, e.g. `2025-01-31T09-15-02-417Z`.
#[must_use]
pub fn timestamp_slug(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

/// Write `outcome` as pretty JSON to `<dir>/<prefix>_<timestamp>.json`.
pub fn save_outcome<T: Serialize>(
    dir: &Path,
    prefix: &str,
    outcome: &T,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(format!("{prefix}_{}.json", timestamp_slug(now)));
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), outcome)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// SHA-256 of the serialized value, as lowercase hex.
pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let bytes = serde_json::to_vec(value).context("serializing sessions for fingerprint")?;
    let digest = Sha256::digest(&bytes);
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 31, 9, 15, 2).unwrap()
    }

    #[test]
    fn slug_has_no_colons_or_dots() {
        assert_eq!(timestamp_slug(fixed_time()), "2025-01-31T09-15-02-000Z");
    }

    #[test]
    fn save_outcome_writes_pretty_json() {
        let dir = std::env::temp_dir().join(format!("mathrun-persist-{}", std::process::id()));
        let path = save_outcome(&dir, "test_results", &vec![1, 2, 3], fixed_time()).unwrap();
        assert!(
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("test_results_2025-01-31T09-15-02"))
        );
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("\n  1,"));
    }

    #[test]
    fn fingerprint_is_stable_hex() {
        let a = fingerprint(&["a", "b"]).unwrap();
        let b = fingerprint(&["a", "b"]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, fingerprint(&["b", "a"]).unwrap());
    }
}
