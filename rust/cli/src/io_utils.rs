//! Input file reading.
//!
//! Hand records and score series may be stored plain or Zstandard-compressed; the
//! `.zst` extension selects decompression.

/// Upper bound for a decompressed input file.
const MAX_DECOMPRESSED: usize = 64 * 1024 * 1024;

/// Read text file with automatic .zst decompression detection.
///
/// UTF-8 BOM (Byte Order Mark) is stripped if present.
///
/// ```rust,no_run
/// # use handlens_cli::io_utils::read_text_auto;
/// let hand = read_text_auto("hand.json").unwrap();
/// let job = read_text_auto("job-scores.json.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::bulk::decompress(&comp, MAX_DECOMPRESSED).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_utf8_bom() {
        let mut s = "\u{feff}{}".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "{}");
    }

    #[test]
    fn test_strip_utf8_bom_no_bom() {
        let mut s = "{}".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "{}");
    }

    #[test]
    fn test_reads_zstd_compressed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json.zst");
        let compressed = zstd::bulk::compress(br#"{"alice": [1, 2]}"#, 3).unwrap();
        std::fs::write(&path, compressed).unwrap();

        let text = read_text_auto(path.to_str().unwrap()).unwrap();
        assert_eq!(text, r#"{"alice": [1, 2]}"#);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_text_auto("does/not/exist.json").is_err());
    }
}
