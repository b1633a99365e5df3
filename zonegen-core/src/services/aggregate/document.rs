//! Lossless segment model of an outputs document
//!
//! A document is split into `output "name" { ... }` blocks (with the comment
//! lines directly above them) and the text in between. Concatenating the
//! segments reproduces the input byte for byte, so untouched content is
//! never reformatted.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static OUTPUT_HEADER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"(?m)^[ \t]*output[ \t]+"([^"]+)"[ \t]*\{"#).ok());

static VALUE_MAP: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*value[ \t]*=[ \t]*\{").ok());

static MAP_KEY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"^\s*"?([A-Za-z_][A-Za-z0-9_-]*)"?\s*="#).ok());

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Output { name: String, text: String },
}

impl Segment {
    fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Output { text, .. } => text,
        }
    }
}

/// Parsed outputs document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputsDocument {
    segments: Vec<Segment>,
}

impl OutputsDocument {
    pub fn parse(content: &str) -> Self {
        let mut segments = Vec::new();
        let mut text_start = 0;

        if let Some(header) = OUTPUT_HEADER.as_ref() {
            let mut search_from = 0;
            while let Some(caps) = header.captures_at(content, search_from) {
                let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                    break;
                };
                let open = whole.end() - 1;
                let Some(close) = matching_brace(content, open) else {
                    log::warn!("Unbalanced braces in output \"{}\"", name.as_str());
                    break;
                };
                let end = line_end(content, close + 1);
                let start = leading_comment_start(content, text_start, whole.start());

                if start > text_start {
                    segments.push(Segment::Text(content[text_start..start].to_string()));
                }
                segments.push(Segment::Output {
                    name: name.as_str().to_string(),
                    text: content[start..end].to_string(),
                });
                text_start = end;
                search_from = end;
            }
        }

        if text_start < content.len() {
            segments.push(Segment::Text(content[text_start..].to_string()));
        }
        Self { segments }
    }

    /// Names of every output block, in document order.
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Output { name, .. } => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    pub fn contains_output(&self, name: &str) -> bool {
        self.output_names().any(|n| n == name)
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.segments
            .iter()
            .position(|s| matches!(s, Segment::Output { name: n, .. } if n == name))
    }

    /// Top-level keys of the `value = { ... }` map inside output `name`.
    ///
    /// `None` when the output is missing or its value is not a recognizable map.
    pub fn map_keys(&self, name: &str) -> Option<BTreeSet<String>> {
        let index = self.position_of(name)?;
        let text = self.segments[index].text();
        let (open, close) = value_map_bounds(text)?;
        let key_pattern = MAP_KEY.as_ref()?;

        let mut keys = BTreeSet::new();
        let mut depth = 0_i32;
        for line in text[open + 1..close].lines() {
            if depth == 0
                && let Some(caps) = key_pattern.captures(line)
                && let Some(key) = caps.get(1)
            {
                keys.insert(key.as_str().to_string());
            }
            depth += brace_delta(line);
        }
        Some(keys)
    }

    /// Inserts complete output blocks right before output `name` (and its
    /// leading comments). Returns `false` when `name` is absent.
    pub fn insert_before(&mut self, name: &str, blocks: &[String]) -> bool {
        let Some(index) = self.position_of(name) else {
            return false;
        };
        let new_segments = blocks.iter().filter_map(|block| {
            let name = output_name(block)?;
            Some(Segment::Output {
                name,
                text: format!("{}\n\n", block.trim_end()),
            })
        });
        self.segments.splice(index..index, new_segments);
        true
    }

    /// Inserts entries at the end of the `value` map of output `name`, before
    /// the line holding its closing brace. Returns `false` when the map
    /// cannot be located.
    pub fn insert_into_map(&mut self, name: &str, entries: &[String]) -> bool {
        let Some(index) = self.position_of(name) else {
            return false;
        };
        let Segment::Output { text, .. } = &mut self.segments[index] else {
            return false;
        };
        let Some((_, close)) = value_map_bounds(text) else {
            return false;
        };

        let line_start = text[..close].rfind('\n').map_or(0, |i| i + 1);
        let mut addition: String = entries
            .iter()
            .map(|entry| format!("{}\n", entry.trim_end_matches('\n')))
            .collect();
        if text[line_start..close].trim().is_empty() {
            text.insert_str(line_start, &addition);
        } else {
            // closing brace shares its line with other content
            addition.insert(0, '\n');
            text.insert_str(close, &addition);
        }
        true
    }

    /// Appends output blocks at the end, separated by blank lines.
    pub fn append(&mut self, blocks: &[String]) {
        if blocks.is_empty() {
            return;
        }
        self.trim_trailing_whitespace();
        for block in blocks {
            let Some(name) = output_name(block) else {
                continue;
            };
            if !self.segments.is_empty() {
                self.segments.push(Segment::Text("\n\n".to_string()));
            }
            self.segments.push(Segment::Output {
                name,
                text: block.trim_end().to_string(),
            });
        }
        self.segments.push(Segment::Text("\n".to_string()));
    }

    fn trim_trailing_whitespace(&mut self) {
        while let Some(last) = self.segments.last_mut() {
            match last {
                Segment::Text(text) => {
                    let trimmed_len = text.trim_end().len();
                    text.truncate(trimmed_len);
                    if text.is_empty() {
                        self.segments.pop();
                        continue;
                    }
                }
                Segment::Output { text, .. } => {
                    let trimmed_len = text.trim_end().len();
                    text.truncate(trimmed_len);
                }
            }
            break;
        }
    }

    pub fn render(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }
}

/// Name of the first output block in `block`.
fn output_name(block: &str) -> Option<String> {
    OUTPUT_HEADER
        .as_ref()?
        .captures(block)?
        .get(1)
        .map(|m| m.as_str().to_string())
}

/// Byte offsets of the `{` and `}` delimiting the `value = { ... }` map.
fn value_map_bounds(block: &str) -> Option<(usize, usize)> {
    let found = VALUE_MAP.as_ref()?.find(block)?;
    let open = found.end() - 1;
    let close = matching_brace(block, open)?;
    Some((open, close))
}

/// Offset of the `}` matching the `{` at `open`, skipping string literals and
/// comments.
fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0_usize;
    let mut i = open;
    let mut in_string = false;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            match b {
                b'\\' => i += 1,
                b'"' => in_string = false,
                _ => {}
            }
        } else {
            match b {
                b'"' => in_string = true,
                b'#' => i = line_end(text, i).saturating_sub(1),
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    i = line_end(text, i).saturating_sub(1);
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    i = text[i + 2..].find("*/").map_or(bytes.len(), |p| i + 2 + p + 1);
                }
                b'{' => depth += 1,
                b'}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }
    None
}

/// Net `{`/`}` balance of one line, ignoring strings and trailing comments.
fn brace_delta(line: &str) -> i32 {
    let mut delta = 0;
    let mut in_string = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '#' => break,
            '/' if chars.peek() == Some(&'/') => break,
            '{' => delta += 1,
            '}' => delta -= 1,
            _ => {}
        }
    }
    delta
}

/// Offset just past the newline ending the line that contains `from`
/// (or the end of `text`).
fn line_end(text: &str, from: usize) -> usize {
    text[from..].find('\n').map_or(text.len(), |p| from + p + 1)
}

/// Start of the run of comment lines directly above `header_start`, not
/// reaching back before `floor`.
fn leading_comment_start(text: &str, floor: usize, header_start: usize) -> usize {
    let mut start = header_start;
    while start > floor {
        let prev_end = start - 1; // the '\n' ending the previous line
        let prev_start = text[..prev_end].rfind('\n').map_or(0, |i| i + 1).max(floor);
        let line = text[prev_start..prev_end].trim();
        if line.starts_with('#') || line.starts_with("//") {
            start = prev_start;
        } else {
            break;
        }
    }
    start
}
