use crate::error::{LrcViewError, Result};
use std::time::Duration;
use tracing::warn;

/// Metadata keys recognized in LRC ID tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LrcTagKey {
    /// Track title (`[ti:...]`)
    Title,
    /// Artist (`[ar:...]`)
    Artist,
    /// Album (`[al:...]`)
    Album,
    /// Track length (`[length:mm:ss]`)
    Length,
}

impl LrcTagKey {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "ti" => Some(Self::Title),
            "ar" => Some(Self::Artist),
            "al" => Some(Self::Album),
            "length" => Some(Self::Length),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "ti",
            Self::Artist => "ar",
            Self::Album => "al",
            Self::Length => "length",
        }
    }
}

/// One metadata tag with its 1-based position in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LrcTag {
    pub line: usize,
    pub key: LrcTagKey,
    pub value: String,
}

/// A single line of lyrics with its start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LrcLine {
    /// 1-based source line number this entry came from
    pub line: usize,
    pub start_time: Duration,
    pub text: String,
}

/// Parse result of a single LRC source line.
///
/// A source line carrying several timestamp prefixes produces one
/// [`LrcLine`] per timestamp, all sharing the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LrcEntry {
    Tag(LrcTag),
    Lines(Vec<LrcLine>),
}

/// Record of a line that looked like a tag but failed to parse.
///
/// Malformed lines are skipped rather than aborting the whole parse; a
/// single corrupt line should not block viewing the rest of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub line: usize,
    pub reason: String,
}

/// Parsed LRC file containing metadata tags and synchronized lines.
#[derive(Debug, Clone, Default)]
pub struct LrcFile {
    pub tags: Vec<LrcTag>,
    pub lines: Vec<LrcLine>,
    /// Malformed lines skipped during parsing
    pub warnings: Vec<ParseWarning>,
}

impl LrcFile {
    /// Parse an LRC string into an `LrcFile`.
    ///
    /// Lines that resemble a tag but carry an invalid key or timestamp are
    /// skipped with a recorded warning. Lines matching neither tag form are
    /// ignored entirely.
    ///
    /// # Errors
    ///
    /// Returns [`LrcViewError::NoSyncedLines`] when the input yields no
    /// timed lyric line at all.
    pub fn parse(input: &str) -> Result<Self> {
        let mut tags = Vec::new();
        let mut lines = Vec::new();
        let mut warnings = Vec::new();

        for (idx, raw) in input.lines().enumerate() {
            let number = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }

            match parse_entry(trimmed, number) {
                Ok(Some(LrcEntry::Tag(tag))) => tags.push(tag),
                Ok(Some(LrcEntry::Lines(parsed))) => lines.extend(parsed),
                Ok(None) => {} // not tag-shaped, tolerated noise
                Err(LrcViewError::MalformedLine { line, reason }) => {
                    warn!(line, %reason, "skipping malformed LRC line");
                    warnings.push(ParseWarning { line, reason });
                }
                Err(err) => return Err(err),
            }
        }

        if lines.is_empty() {
            return Err(LrcViewError::NoSyncedLines);
        }

        // Stable sort keeps original order on timestamp ties
        lines.sort_by_key(|l| l.start_time);

        Ok(Self {
            tags,
            lines,
            warnings,
        })
    }

    /// Find the index of the line active at `position`.
    ///
    /// Binary search over the sorted start times. Returns `None` when the
    /// position precedes the first timestamp. A position exactly equal to a
    /// line's timestamp resolves to that line.
    #[must_use]
    pub fn line_index_at(&self, position: Duration) -> Option<usize> {
        let upper = self.lines.partition_point(|l| l.start_time <= position);
        upper.checked_sub(1)
    }

    /// Find the line active at `position`.
    #[must_use]
    pub fn line_at(&self, position: Duration) -> Option<&LrcLine> {
        self.line_index_at(position).map(|i| &self.lines[i])
    }

    /// Get lines around the current position for display.
    #[must_use]
    pub fn visible_lines(&self, position: Duration, before: usize, after: usize) -> Vec<&LrcLine> {
        let current_idx = self.line_index_at(position).unwrap_or(0);

        let start = current_idx.saturating_sub(before);
        let end = (current_idx + after + 1).min(self.lines.len());

        self.lines[start..end].iter().collect()
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.tag_value(LrcTagKey::Title)
    }

    #[must_use]
    pub fn artist(&self) -> Option<&str> {
        self.tag_value(LrcTagKey::Artist)
    }

    #[must_use]
    pub fn album(&self) -> Option<&str> {
        self.tag_value(LrcTagKey::Album)
    }

    /// Track length from the `[length:mm:ss]` tag, if present and valid.
    #[must_use]
    pub fn length(&self) -> Option<Duration> {
        self.tag_value(LrcTagKey::Length)
            .and_then(parse_duration_tag)
    }

    fn tag_value(&self, key: LrcTagKey) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }
}

/// Classify a single trimmed, non-empty LRC source line.
///
/// Returns `Ok(None)` for lines that do not resemble a bracketed tag.
///
/// # Errors
///
/// Returns [`LrcViewError::MalformedLine`] for lines that look like a tag
/// but whose key or timestamp fails to parse.
pub fn parse_entry(line: &str, number: usize) -> Result<Option<LrcEntry>> {
    if !line.starts_with('[') {
        return Ok(None);
    }

    let Some(end) = line.find(']') else {
        return Err(malformed(number, "unterminated tag bracket"));
    };
    let content = &line[1..end];

    let Some(first_colon) = content.find(':') else {
        return Err(malformed(number, format!("tag [{content}] has no key")));
    };
    let key = &content[..first_colon];

    // A numeric key means a timestamp tag, not an ID tag
    if key.chars().all(|c| c.is_ascii_digit()) && !key.is_empty() {
        let parsed = parse_lyric_line(line, number)?;
        return Ok(Some(LrcEntry::Lines(parsed)));
    }

    match LrcTagKey::from_tag(key) {
        Some(tag_key) => {
            let value = content[first_colon + 1..].trim().to_string();
            Ok(Some(LrcEntry::Tag(LrcTag {
                line: number,
                key: tag_key,
                value,
            })))
        }
        None => Err(malformed(number, format!("unrecognized tag key '{key}'"))),
    }
}

fn malformed(line: usize, reason: impl Into<String>) -> LrcViewError {
    LrcViewError::MalformedLine {
        line,
        reason: reason.into(),
    }
}

/// Parse a lyric line like `[00:12.34]Hello` or `[00:12.34][00:15.67]Same text`.
///
/// All leading bracketed timestamps are consumed; each yields one `LrcLine`
/// sharing the trailing text.
fn parse_lyric_line(line: &str, number: usize) -> Result<Vec<LrcLine>> {
    let mut remaining = line;
    let mut timestamps = Vec::new();

    while remaining.starts_with('[') {
        let Some(end) = remaining.find(']') else {
            break;
        };
        let bracket = &remaining[1..end];

        // Stop at the first non-timestamp bracket; it belongs to the text
        if !bracket
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
        {
            break;
        }

        let Some(time) = parse_timestamp(bracket) else {
            return Err(malformed(number, format!("invalid timestamp [{bracket}]")));
        };
        timestamps.push(time);
        remaining = &remaining[end + 1..];
    }

    if timestamps.is_empty() {
        return Err(malformed(number, "no leading timestamp"));
    }

    let text = remaining.trim();
    Ok(timestamps
        .into_iter()
        .map(|start_time| LrcLine {
            line: number,
            start_time,
            text: text.to_string(),
        })
        .collect())
}

/// Parse a timestamp string like `00:12.34`, `00:12` or `00:12:34`.
fn parse_timestamp(s: &str) -> Option<Duration> {
    let parts: Vec<&str> = s.trim().split(':').collect();

    match parts.len() {
        2 => {
            // mm:ss.xx or mm:ss
            let minutes: u64 = parts[0].parse().ok()?;
            let seconds: f64 = parts[1].parse().ok()?;
            if !(0.0..60.0).contains(&seconds) {
                return None;
            }

            #[allow(clippy::cast_precision_loss)]
            let total = minutes as f64 * 60.0 + seconds;
            Duration::try_from_secs_f64(total).ok()
        }
        3 => {
            // mm:ss:xx (hundredths separated by colon)
            let minutes: u64 = parts[0].parse().ok()?;
            let seconds: u64 = parts[1].parse().ok()?;
            let hundredths: u64 = parts[2].parse().ok()?;
            if seconds >= 60 || hundredths >= 100 {
                return None;
            }

            Some(Duration::from_millis(
                minutes * 60 * 1000 + seconds * 1000 + hundredths * 10,
            ))
        }
        _ => None,
    }
}

/// Parse a duration string like `mm:ss` or `mm:ss.xx` from a length tag.
fn parse_duration_tag(s: &str) -> Option<Duration> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return None;
    }

    let minutes: u64 = parts[0].parse().ok()?;
    let seconds: f64 = parts[1].parse().ok()?;
    if !(0.0..60.0).contains(&seconds) {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let total = minutes as f64 * 60.0 + seconds;
    Duration::try_from_secs_f64(total).ok()
}
