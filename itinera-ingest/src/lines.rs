//! Line-shape recognizers for LLM markdown: headings, bullets, time blocks, day markers.

use std::sync::LazyLock;

use itinera_core::{TimeBlock, parse_clock};
use regex::Regex;

/// Depth given to `**bold**` headings: deeper than any `#` heading.
pub const BOLD_LEVEL: u8 = 7;

static NUMBERED_BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}[.)]\s+").expect("numbered bullet regex"));

static BLOCK_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<label>.*?)\s*\(\s*(?P<start>\d{1,2}:\d{2})\s*[-–—]\s*(?P<end>\d{1,2}:\d{2})\s*\)\s*:?$",
    )
    .expect("time block regex")
});

static BLOCK_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<label>[^:()]*?)\s*\(\s*(?P<start>\d{1,2}:\d{2})\s*[-–—]\s*(?P<end>\d{1,2}:\d{2})\s*\)",
        r"\s*:\s*(?P<item>\S.*)$"
    ))
    .expect("block item regex")
});

static NAMED_BLOCK_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<label>[^:]+?)\s*:\s*(?P<item>\S.*)$").expect("named block item regex"));

static INLINE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:[-*•+]\s+)?",
        r"(?P<start>\d{1,2}:\d{2})",
        r"(?:\s*[-–—]\s*(?P<end>\d{1,2}:\d{2}))?",
        r"\s*[-–—:|]?\s*(?P<desc>\S.*)$"
    ))
    .expect("inline time regex")
});

static DAY_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?P<a>\d{1,2})\s*\.\s*gün|gün\s*(?P<b>\d{1,2})|day\s*(?P<c>\d{1,2}))(?P<rest>.*)$")
        .expect("day number regex")
});

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").expect("iso date regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    /// Number of '#', or `BOLD_LEVEL` for a bold line.
    pub level: u8,
    pub text: &'a str,
}

/// A line that starts with '#' or is wrapped in `**`.
pub fn heading(line: &str) -> Option<Heading<'_>> {
    let l = line.trim();
    if l.starts_with('#') {
        let level = l.chars().take_while(|c| *c == '#').count();
        let text = l.trim_start_matches('#').trim();
        return Some(Heading {
            level: level.min(6) as u8,
            text,
        });
    }
    if l.len() > 4 && l.starts_with("**") && (l.ends_with("**") || l.ends_with("**:")) {
        let text = l.trim_end_matches(':').trim_matches('*').trim();
        if !text.is_empty() {
            return Some(Heading {
                level: BOLD_LEVEL,
                text,
            });
        }
    }
    None
}

/// Drop inline emphasis markers.
pub fn clean_inline(text: &str) -> String {
    text.replace("**", "").replace("__", "").replace('`', "").trim().to_string()
}

fn strip_bullet(line: &str) -> Option<&str> {
    let l = line.trim();
    for marker in ["- ", "* ", "• ", "+ "] {
        if let Some(rest) = l.strip_prefix(marker) {
            return Some(rest);
        }
    }
    NUMBERED_BULLET_RE.find(l).map(|m| &l[m.end()..])
}

/// Text of a list item (`-`, `*`, `•`, `+`, `1.`), emphasis removed.
pub fn bullet_text(line: &str) -> Option<String> {
    let text = clean_inline(strip_bullet(line)?);
    (!text.is_empty()).then_some(text)
}

/// `---`, `***`, `___`
pub fn is_rule(line: &str) -> bool {
    let l = line.trim();
    l.len() >= 3 && ['-', '*', '_'].iter().any(|c| l.chars().all(|ch| ch == *c))
}

/// Time-block heading: `Sabah (09:00 - 12:00):` or a bare named block like `**Akşam:**`.
/// Bullet, '#' and bold markers are optional. Returns (start, end).
pub fn block_heading(line: &str) -> Option<(String, String)> {
    let body = strip_bullet(line).unwrap_or(line).trim();
    let text = clean_inline(body.trim_start_matches('#'));
    let fully_bold = body.len() > 4 && body.starts_with("**") && body.ends_with("**");
    // "- Ayasofya (09:00 - 10:30)" is an activity, not a heading
    if !(heading(line).is_some() || fully_bold || text.ends_with(':')) {
        return None;
    }

    if let Some(caps) = BLOCK_RANGE_RE.captures(&text) {
        let start = parse_clock(&caps["start"])?;
        let end = parse_clock(&caps["end"])?;
        return Some((start, end));
    }

    let (start, end) = TimeBlock::from_label(&text)?.range();
    Some((start.to_string(), end.to_string()))
}

/// Block heading and its activity on one line: `- **Sabah (09:00 - 12:00):** Topkapı Sarayı`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockItem {
    pub start: String,
    pub end: String,
    pub item: String,
}

pub fn block_item(line: &str) -> Option<BlockItem> {
    let text = clean_inline(strip_bullet(line).unwrap_or(line));

    if let Some(caps) = BLOCK_ITEM_RE.captures(&text) {
        return Some(BlockItem {
            start: parse_clock(&caps["start"])?,
            end: parse_clock(&caps["end"])?,
            item: caps["item"].trim().to_string(),
        });
    }

    let caps = NAMED_BLOCK_ITEM_RE.captures(&text)?;
    let (start, end) = TimeBlock::from_label(&caps["label"])?.range();
    Some(BlockItem {
        start: start.to_string(),
        end: end.to_string(),
        item: caps["item"].trim().to_string(),
    })
}

/// One `HH:MM <description>` line (optionally `HH:MM - HH:MM <description>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineTime {
    pub start: String,
    /// Same as `start` when the line carries a single time.
    pub end: String,
    pub description: String,
}

pub fn inline_time(line: &str) -> Option<InlineTime> {
    let text = clean_inline(line);
    let caps = INLINE_TIME_RE.captures(&text)?;
    let start = parse_clock(&caps["start"])?;
    let end = match caps.name("end") {
        Some(m) => parse_clock(m.as_str())?,
        None => start.clone(),
    };
    let description = caps["desc"].trim().to_string();
    Some(InlineTime {
        start,
        end,
        description,
    })
}

/// Day number from a `N. Gün` / `Gün N` / `Day N` marker line.
///
/// Heading-marked lines match on prefix; bare lines only when nothing but a separator
/// follows, so "1. Gün batımında..." inside a numbered list is not a day.
pub fn numbered_day(line: &str) -> Option<u32> {
    let is_marked = heading(line).is_some();
    let text = clean_inline(line);
    let text = text.trim_start_matches('#').trim();
    let caps = DAY_NUMBER_RE.captures(text)?;

    let rest = &caps["rest"];
    if rest.chars().next().is_some_and(char::is_alphanumeric) {
        return None;
    }
    let rest = rest.trim_start();
    if !is_marked
        && !(rest.is_empty() || rest.starts_with([':', '-', '–', '—', '(']))
    {
        return None;
    }

    let n = caps
        .name("a")
        .or_else(|| caps.name("b"))
        .or_else(|| caps.name("c"))?
        .as_str()
        .parse::<u32>()
        .ok()?;
    (n > 0).then_some(n)
}

/// `YYYY-MM-DD` token on a heading line.
pub fn dated_heading(line: &str) -> Option<&str> {
    heading(line)?;
    ISO_DATE_RE.find(line).map(|m| m.as_str())
}

/// Lines with their byte offset into `text`.
pub fn with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n').scan(0usize, |offset, raw| {
        let start = *offset;
        *offset += raw.len();
        Some((start, raw.trim_end_matches(['\n', '\r'])))
    })
}

/// Free prose of a day: everything that is not structure or an activity line.
pub fn prose_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .filter(|l| {
            heading(l).is_none()
                && !is_rule(l)
                && strip_bullet(l).is_none()
                && block_heading(l).is_none()
                && block_item(l).is_none()
                && inline_time(l).is_none()
                && numbered_day(l).is_none()
        })
        .map(clean_inline)
        .collect()
}
