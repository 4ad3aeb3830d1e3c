use serde_json::{Map, Value as JsonValue};
use serde_yaml::Value as YamlValue;
use thiserror::Error;

/// Front matter mapping, keyed in source order.
pub type FrontmatterMap = Map<String, JsonValue>;

/// Result returned after extracting front matter from a document.
#[derive(Debug, Default)]
pub struct FrontmatterExtraction {
    /// Parsed front matter mapping (empty when the document has no block).
    pub data: FrontmatterMap,
}

/// Errors emitted while parsing or extracting front matter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// YAML failed to parse, or holds a value with no JSON equivalent.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// Extracts the leading `---` delimited YAML block from a document.
///
/// The opening fence must be the first line (a byte order mark is allowed
/// before it). Documents without a block, or whose opening fence is never
/// closed, yield an empty mapping.
pub fn extract_frontmatter(input: &str) -> Result<FrontmatterExtraction, FrontmatterError> {
    let Some(block) = locate_block(input) else {
        return Ok(FrontmatterExtraction::default());
    };

    let data = parse_yaml_mapping(&input[block.start..block.end])?;
    Ok(FrontmatterExtraction { data })
}

struct BlockSpan {
    start: usize,
    end: usize,
}

fn parse_yaml_mapping(block: &str) -> Result<FrontmatterMap, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(FrontmatterMap::new());
    }

    let yaml: YamlValue =
        serde_yaml::from_str(block).map_err(|err| FrontmatterError::Parse(err.to_string()))?;
    // serde_json would turn these into null.
    reject_non_finite(&yaml)?;
    // Non-string keys have no JSON form and fail here.
    let json =
        serde_json::to_value(yaml).map_err(|err| FrontmatterError::Parse(err.to_string()))?;

    match json {
        JsonValue::Null => Ok(FrontmatterMap::new()),
        JsonValue::Object(map) => Ok(map),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}

fn reject_non_finite(value: &YamlValue) -> Result<(), FrontmatterError> {
    match value {
        YamlValue::Number(number) if number.is_nan() || number.is_infinite() => Err(
            FrontmatterError::Parse(format!("non-finite number `{}` is not supported", number)),
        ),
        YamlValue::Sequence(items) => items.iter().try_for_each(reject_non_finite),
        YamlValue::Mapping(map) => map.values().try_for_each(reject_non_finite),
        YamlValue::Tagged(tagged) => reject_non_finite(&tagged.value),
        _ => Ok(()),
    }
}

fn locate_block(input: &str) -> Option<BlockSpan> {
    let offset = if input.starts_with('\u{feff}') {
        '\u{feff}'.len_utf8()
    } else {
        0
    };
    let mut lines = Lines::new(input, offset);

    let opening = lines.next()?;
    if !is_fence(opening.text) {
        return None;
    }

    let start = opening.next;
    let closing = lines.find(|line| is_fence(line.text))?;
    let raw = &input[start..closing.start];
    Some(BlockSpan {
        start,
        end: start + raw.trim_end_matches(['\r', '\n']).len(),
    })
}

struct Line<'a> {
    text: &'a str,
    start: usize,
    next: usize,
}

/// `\n`-separated lines with their byte offsets.
struct Lines<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> Lines<'a> {
    fn new(input: &'a str, cursor: usize) -> Self {
        Self { input, cursor }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.input.len() {
            return None;
        }

        let start = self.cursor;
        let rest = &self.input[start..];
        let (text, next) = match rest.find('\n') {
            Some(pos) => (&rest[..pos], start + pos + 1),
            None => (rest, self.input.len()),
        };
        self.cursor = next;
        Some(Line { text, start, next })
    }
}

fn is_fence(line: &str) -> bool {
    line.trim_end_matches('\r') == "---"
}
