//! Single-member extraction from gzip-compressed tar streams.
use anyhow::{Context as _, Result};
use flate2::read::GzDecoder;
use std::io::{Read, Write};
use std::path::Path;

/// Copy the regular-file member named `member` out of a `.tar.gz` stream
/// into `out`.
///
/// Member names are compared after stripping a leading `./`, so both
/// `bin/tool` and `./bin/tool` entries match a request for `bin/tool`.
/// Returns `Ok(false)` when no such file member exists.
///
/// # Errors
///
/// Returns an error if the stream is not a valid gzip-compressed tar
/// archive or if writing to `out` fails.
pub fn extract_member<R: Read, W: Write>(reader: R, member: &str, out: &mut W) -> Result<bool> {
    let wanted = normalize(Path::new(member));
    let mut archive = tar::Archive::new(GzDecoder::new(reader));
    for entry in archive.entries().context("reading archive")? {
        let mut entry = entry.context("reading archive entry")?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let matches = normalize(&entry.path().context("decoding archive entry path")?) == wanted;
        if !matches {
            continue;
        }
        std::io::copy(&mut entry, out).with_context(|| format!("extracting {member}"))?;
        return Ok(true);
    }
    Ok(false)
}

fn normalize(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}
