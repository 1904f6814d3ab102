//! Splitting `.mdx` files into their YAML front-matter and markdown body.

use serde::de::DeserializeOwned;

use crate::error::FolioError;

const DELIMITER: &str = "---";

/// Splits `text` into the YAML front-matter (if any) and the body.
///
/// Front-matter only exists when the very first line is `---`. It runs until
/// the next line consisting of `---`, and the body starts on the line after
/// that.
pub fn split_front_matter(text: &str) -> Result<(Option<&str>, &str), FolioError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(rest) = strip_delimiter_line(text) else {
        return Ok((None, text));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }

    Err(FolioError::UnterminatedFrontMatter)
}

/// Returns what follows the opening delimiter line, or None if `text` does
/// not start with one.
fn strip_delimiter_line(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(DELIMITER)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Splits `text` and deserializes the front-matter into `T`. A file without
/// front-matter (or with an empty block) is treated as an empty mapping, so
/// `T` must be able to cope with that through its serde defaults.
pub fn parse_front_matter<T: DeserializeOwned>(text: &str) -> Result<(T, &str), FolioError> {
    let (yaml, body) = split_front_matter(text)?;
    let yaml = yaml.unwrap_or_default();

    let data = if yaml.trim().is_empty() {
        serde_yaml::from_value(serde_yaml::Value::Mapping(Default::default()))?
    } else {
        serde_yaml::from_str(yaml)?
    };

    Ok((data, body))
}
