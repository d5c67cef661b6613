//! Natural-language due dates: extraction, smart formatting, and urgency.
//!
//! Free text like "finish report next tuesday" is split into a clean title
//! and a resolved date. The date grammar itself ("next tuesday", "in 2
//! weeks", "dec 25 at 3pm") is delegated to `chrono-english`; this module
//! only locates the phrase inside arbitrary text, removes it, and derives
//! display labels and urgency tiers from the result.
//!
//! All dates are timezone-naive local times. Urgency is a pure function of
//! "now" and is recomputed at every render, never stored.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_english::{parse_date_string, Dialect};

/// Whether the day component of a parsed phrase was stated explicitly
/// ("tomorrow", "dec 25") or inferred ("next week", "in 2 weeks").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    Certain,
    Inferred,
}

/// Result of parsing a whole input as a date phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDate {
    pub date: NaiveDateTime,
    /// The substring that was recognized as the date phrase.
    pub matched: String,
    pub confidence: Confidence,
}

/// Result of extracting a date phrase out of a todo title.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub date: Option<NaiveDateTime>,
    /// The input with the matched phrase removed and whitespace normalized.
    /// Equal to the trimmed input when no phrase was found.
    pub clean_title: String,
}

/// Display urgency of a due date, ordered by how it should sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Urgency {
    Overdue,
    Today,
    Soon,
    Later,
    None,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Overdue => "overdue",
            Urgency::Today => "today",
            Urgency::Soon => "soon",
            Urgency::Later => "later",
            Urgency::None => "none",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Urgency {
    type Err = ParseUrgencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overdue" => Ok(Urgency::Overdue),
            "today" => Ok(Urgency::Today),
            "soon" => Ok(Urgency::Soon),
            "later" => Ok(Urgency::Later),
            "none" => Ok(Urgency::None),
            _ => Err(ParseUrgencyError(s.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Invalid urgency: {0}")]
pub struct ParseUrgencyError(String);

/// Parse an entire string as a natural-language date phrase.
pub fn parse_natural(input: &str) -> Option<ParsedDate> {
    parse_natural_at(input, Local::now().naive_local())
}

pub fn parse_natural_at(input: &str, now: NaiveDateTime) -> Option<ParsedDate> {
    let tokens = tokenize(input);
    let m = scan(&tokens, now)?;
    Some(ParsedDate {
        date: m.date,
        matched: input[m.span_start..m.span_end].to_string(),
        confidence: m.confidence,
    })
}

/// Extract the leftmost date phrase from a title.
///
/// When no phrase is found the clean title is the trimmed input, exactly.
/// When the phrase is the entire input the clean title is empty; callers
/// decide whether an empty title is acceptable.
pub fn extract(input: &str) -> Extraction {
    extract_at(input, Local::now().naive_local())
}

pub fn extract_at(input: &str, now: NaiveDateTime) -> Extraction {
    let tokens = tokenize(input);
    match scan(&tokens, now) {
        Some(m) => Extraction {
            date: Some(m.date),
            clean_title: remove_span(input, m.span_start, m.span_end),
        },
        None => Extraction {
            date: None,
            clean_title: input.trim().to_string(),
        },
    }
}

/// Format a date as a short human-friendly label relative to today.
pub fn format_smart(date: NaiveDateTime) -> String {
    format_smart_at(date, Local::now().date_naive())
}

pub fn format_smart_at(date: NaiveDateTime, today: NaiveDate) -> String {
    let day = date.date();
    match (day - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        2..=7 => day.format("%A").to_string(),
        8..=14 => format!("Next {}", day.format("%A")),
        _ if day.year() == today.year() => day.format("%b %-d").to_string(),
        _ => day.format("%b %-d, %Y").to_string(),
    }
}

/// Like [`format_smart`], appending the time of day when it is not
/// exactly midnight (midnight means no specific time was set).
pub fn format_smart_with_time(date: NaiveDateTime) -> String {
    format_smart_with_time_at(date, Local::now().date_naive())
}

pub fn format_smart_with_time_at(date: NaiveDateTime, today: NaiveDate) -> String {
    let label = format_smart_at(date, today);
    if date.time() == NaiveTime::MIN {
        label
    } else {
        format!("{} at {}", label, date.format("%-I:%M %p"))
    }
}

/// A due date is overdue when it is strictly in the past and does not fall
/// on the current calendar day. Today is never overdue.
pub fn is_overdue(date: NaiveDateTime) -> bool {
    is_overdue_at(date, Local::now().naive_local())
}

pub fn is_overdue_at(date: NaiveDateTime, now: NaiveDateTime) -> bool {
    date < now && date.date() != now.date()
}

/// Bucket a due date into a display urgency tier.
pub fn classify(due: Option<NaiveDateTime>) -> Urgency {
    classify_at(due, Local::now().naive_local())
}

pub fn classify_at(due: Option<NaiveDateTime>, now: NaiveDateTime) -> Urgency {
    let Some(due) = due else {
        return Urgency::None;
    };
    // Overdue and today are checked before the day-distance window, so a
    // same-day date is always `today` even though its distance is 0.
    if is_overdue_at(due, now) {
        return Urgency::Overdue;
    }
    if due.date() == now.date() {
        return Urgency::Today;
    }
    if (due.date() - now.date()).num_days() <= 3 {
        Urgency::Soon
    } else {
        Urgency::Later
    }
}

// ---------------------------------------------------------------------------
// Phrase scanning
// ---------------------------------------------------------------------------

/// Longest phrase we will hand to the grammar ("next tuesday at 3 pm").
const MAX_PHRASE_TOKENS: usize = 5;

const RELATIVE_WORDS: &[&str] = &["today", "tomorrow", "yesterday", "now"];

const LEADER_WORDS: &[&str] = &["next", "last", "this", "in", "on", "at"];

const WEEKDAY_WORDS: &[&str] = &[
    "monday", "mon", "tuesday", "tue", "tues", "wednesday", "wed", "thursday", "thu", "thur",
    "thurs", "friday", "fri", "saturday", "sat", "sunday", "sun",
];

const MONTH_WORDS: &[&str] = &[
    "january", "jan", "february", "feb", "march", "mar", "april", "apr", "may", "june", "jun",
    "july", "jul", "august", "aug", "september", "sept", "sep", "october", "oct", "november",
    "nov", "december", "dec",
];

struct Token<'a> {
    /// Byte offset of the first character of the word.
    start: usize,
    /// Byte offset past the word, excluding trailing punctuation.
    word_end: usize,
    /// The word with trailing punctuation removed.
    word: &'a str,
    /// Trailing punctuation ends a phrase; nothing may extend past it.
    trailing_punct: bool,
}

struct PhraseMatch {
    span_start: usize,
    span_end: usize,
    date: NaiveDateTime,
    confidence: Confidence,
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in input.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(make_token(input, s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(make_token(input, s, input.len()));
    }
    tokens
}

fn make_token(input: &str, start: usize, end: usize) -> Token<'_> {
    let raw = &input[start..end];
    let word = raw.trim_end_matches(|c: char| matches!(c, ',' | '.' | ';' | '!' | '?' | ')'));
    Token {
        start,
        word_end: start + word.len(),
        word,
        trailing_punct: word.len() != raw.len(),
    }
}

/// Whether a token may begin a date phrase. Bare numbers are excluded so
/// that counts in ordinary titles ("buy 2 apples") are never eaten; numeric
/// tokens qualify only when they look date- or time-shaped.
fn starts_phrase(word: &str) -> bool {
    let w = word.to_ascii_lowercase();
    RELATIVE_WORDS.contains(&w.as_str())
        || LEADER_WORDS.contains(&w.as_str())
        || WEEKDAY_WORDS.contains(&w.as_str())
        || MONTH_WORDS.contains(&w.as_str())
        || numeric_date_like(&w)
}

fn numeric_date_like(w: &str) -> bool {
    w.starts_with(|c: char| c.is_ascii_digit())
        && (w.contains('-')
            || w.contains('/')
            || w.contains(':')
            || w.ends_with("am")
            || w.ends_with("pm")
            || has_ordinal_suffix(w))
}

fn has_ordinal_suffix(w: &str) -> bool {
    (w.ends_with("st") || w.ends_with("nd") || w.ends_with("rd") || w.ends_with("th"))
        && w[..w.len() - 2].chars().all(|c| c.is_ascii_digit())
}

/// Resolve a candidate phrase against a fixed "now". `chrono-english` wants
/// an offset-carrying base, so the resolution runs in a fixed frame and
/// drops back to naive local afterwards.
fn resolve_phrase(phrase: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let base = Utc.from_utc_datetime(&now);
    parse_date_string(phrase, base, Dialect::Us)
        .ok()
        .map(|dt| dt.naive_utc())
}

fn try_window(window: &[Token<'_>], now: NaiveDateTime) -> Option<NaiveDateTime> {
    let raw: Vec<&str> = window.iter().map(|t| t.word).collect();
    if let Some(dt) = resolve_phrase(&raw.join(" "), now) {
        return Some(dt);
    }
    // The grammar takes "tomorrow 3pm" but not always "tomorrow at 3pm";
    // retry with connective "at" tokens dropped.
    let stripped: Vec<&str> = raw
        .iter()
        .copied()
        .filter(|w| !w.eq_ignore_ascii_case("at"))
        .collect();
    if stripped.is_empty() || stripped.len() == raw.len() {
        return None;
    }
    resolve_phrase(&stripped.join(" "), now)
}

/// Find the leftmost date phrase. Within one start position the longest
/// window that still adds information wins: a longer window whose parse is
/// identical to the shorter one only picked up ignored trailing words and
/// must not widen the match.
fn scan(tokens: &[Token<'_>], now: NaiveDateTime) -> Option<PhraseMatch> {
    for i in 0..tokens.len() {
        if !starts_phrase(tokens[i].word) {
            continue;
        }
        let mut best: Option<(usize, NaiveDateTime)> = None;
        let mut prev_parse: Option<NaiveDateTime> = None;
        let max_len = MAX_PHRASE_TOKENS.min(tokens.len() - i);
        for len in 1..=max_len {
            let window = &tokens[i..i + len];
            if let Some(dt) = try_window(window, now) {
                if prev_parse != Some(dt) {
                    best = Some((len, dt));
                }
                prev_parse = Some(dt);
            }
            if window[len - 1].trailing_punct {
                break;
            }
        }
        if let Some((len, date)) = best {
            let window = &tokens[i..i + len];
            let words: Vec<&str> = window.iter().map(|t| t.word).collect();
            return Some(PhraseMatch {
                span_start: tokens[i].start,
                span_end: tokens[i + len - 1].word_end,
                date,
                confidence: if day_is_explicit(&words) {
                    Confidence::Certain
                } else {
                    Confidence::Inferred
                },
            });
        }
    }
    None
}

fn day_is_explicit(words: &[&str]) -> bool {
    for (idx, raw) in words.iter().enumerate() {
        let w = raw.to_ascii_lowercase();
        if WEEKDAY_WORDS.contains(&w.as_str()) {
            return true;
        }
        if matches!(w.as_str(), "today" | "tomorrow" | "yesterday") {
            return true;
        }
        if w.starts_with(|c: char| c.is_ascii_digit())
            && (w.contains('-') || w.contains('/') || has_ordinal_suffix(&w))
        {
            return true;
        }
        // A bare day-of-month counts when it sits next to a month name.
        if let Ok(n) = w.parse::<u32>() {
            if (1..=31).contains(&n) {
                let neighbor_is_month = |j: Option<&&str>| {
                    j.map(|s| MONTH_WORDS.contains(&s.to_ascii_lowercase().as_str()))
                        .unwrap_or(false)
                };
                if (idx > 0 && neighbor_is_month(words.get(idx - 1)))
                    || neighbor_is_month(words.get(idx + 1))
                {
                    return true;
                }
            }
        }
    }
    false
}

fn remove_span(input: &str, start: usize, end: usize) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_was_space = false;
    for c in input[..start].chars().chain(input[end..].chars()) {
        if c.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    out.trim().to_string()
}
