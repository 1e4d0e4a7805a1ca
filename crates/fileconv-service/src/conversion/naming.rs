//! Generated artifact names: `[base]_[token].[extension]`.

use uuid::Uuid;

use fileconv_core::error::AppError;
use fileconv_core::result::AppResult;

/// Length of the random token in a generated name.
pub const TOKEN_LEN: usize = 8;

const TOKEN_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Longest base name kept from an upload, in UTF-8 bytes. Leaves room for
/// the token and extension under the usual 255-byte file name limit.
const MAX_BASE_BYTES: usize = 200;

/// Base name of an uploaded file: directory components removed, then the
/// part before the last `.`, restricted to a filesystem-safe alphabet.
///
/// Fails with `MalformedInput` when the name has no extension separator.
pub fn base_name(original: &str) -> AppResult<String> {
    let file_name = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);
    let (stem, _) = file_name
        .rsplit_once('.')
        .ok_or_else(|| AppError::malformed_input("File name must include an extension"))?;

    let mut base: String = stem
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                Some(c)
            } else if c.is_whitespace() {
                Some('_')
            } else {
                None
            }
        })
        .collect();

    while base.contains("..") {
        base = base.replace("..", ".");
    }
    while base.len() > MAX_BASE_BYTES {
        base.pop();
    }

    if base.is_empty() {
        base.push_str("file");
    }
    Ok(base)
}

/// Eight characters from `[a-z0-9]`, drawn from the random bits of a v4 UUID.
pub fn random_token() -> String {
    // The low 62 bits of a v4 UUID are random; 36^8 needs fewer than 42.
    let mut bits = Uuid::new_v4().as_u128();
    (0..TOKEN_LEN)
        .map(|_| {
            let c = TOKEN_ALPHABET[(bits % 36) as usize] as char;
            bits /= 36;
            c
        })
        .collect()
}

/// Generate a unique artifact name for `original` with the given extension.
pub fn generated_name(original: &str, extension: &str) -> AppResult<String> {
    let base = base_name(original)?;
    Ok(format!(
        "{}_{}.{}",
        base,
        random_token(),
        extension.trim_start_matches('.')
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use fileconv_core::error::ErrorKind;
    use fileconv_core::traits::storage::is_flat_name;

    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("data.csv").unwrap(), "data");
        assert_eq!(base_name("archive.tar.gz").unwrap(), "archive.tar");
        assert_eq!(base_name("my report.txt").unwrap(), "my_report");
        assert_eq!(base_name("C:\\Users\\me\\sales.csv").unwrap(), "sales");
        assert_eq!(base_name("../../etc/passwd.json").unwrap(), "passwd");
        assert_eq!(base_name(".csv").unwrap(), "file");
        assert_eq!(base_name("a...b.csv").unwrap(), "a.b");
    }

    #[test]
    fn test_base_name_byte_limit() {
        let wide = format!("{}.csv", "报".repeat(100));
        let base = base_name(&wide).unwrap();
        assert!(base.len() <= MAX_BASE_BYTES);
        assert_eq!(base, "报".repeat(MAX_BASE_BYTES / "报".len()));
        assert!(generated_name(&wide, "json").unwrap().len() <= 255);

        let long = format!("{}.csv", "a".repeat(500));
        assert_eq!(base_name(&long).unwrap().len(), MAX_BASE_BYTES);
    }

    #[test]
    fn test_base_name_requires_extension() {
        for name in ["", "README", "dir.d/noext"] {
            let err = base_name(name).unwrap_err();
            assert_eq!(err.kind, ErrorKind::MalformedInput);
            assert_eq!(err.message, "File name must include an extension");
        }
    }

    #[test]
    fn test_token_shape() {
        let token = random_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.bytes().all(|b| TOKEN_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generated_names_are_unique_and_flat() {
        let names: HashSet<String> = (0..1000)
            .map(|_| generated_name("data.csv", "json").unwrap())
            .collect();
        assert_eq!(names.len(), 1000);
        for name in &names {
            assert!(name.starts_with("data_"));
            assert!(name.ends_with(".json"));
            assert!(is_flat_name(name));
        }
    }
}
