//! Text shaping applied to every fetched video.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

const TITLE_SEPARATOR: &str = " | ";

/// Boilerplate that channel descriptions append after the real synopsis.
/// The first one found, at the earliest position, ends the description.
const DESCRIPTION_MARKERS: &str =
    r"\n\nSUBSCRIBE|\n\nWatch on Netflix|\r\n\r\nAbout Netflix|\n\nAbout Netflix";

static DESCRIPTION_CUT: OnceLock<Regex> = OnceLock::new();

/// The part of `"Real Title | Official Trailer | Netflix"` before the first separator.
pub fn extract_title(title: &str) -> &str {
    match title.find(TITLE_SEPARATOR) {
        Some(index) => &title[..index],
        None => title,
    }
}

pub fn clean_description(description: &str) -> &str {
    let cut = DESCRIPTION_CUT
        .get_or_init(|| Regex::new(DESCRIPTION_MARKERS).expect("description markers are a valid pattern"));
    let end = cut.find(description).map_or(description.len(), |m| m.start());
    description[..end].trim()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoDuration {
    pub overall_time: String,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl VideoDuration {
    fn new(hours: u64, minutes: u64, seconds: u64) -> VideoDuration {
        VideoDuration {
            overall_time: format!("{hours:02}:{minutes:02}:{seconds:02}"),
            hours,
            minutes,
            seconds,
        }
    }
}

/// Splits an ISO 8601 duration such as `PT1H2M3S` into its parts.
///
/// Never fails: missing or unreadable components count as zero. Day
/// components (`P1DT2H`) are folded into the hours.
pub fn parse_duration(duration: &str) -> VideoDuration {
    let rest = duration.strip_prefix('P').unwrap_or(duration);
    let (days, rest) = take_component(rest, 'D');
    let rest = rest.strip_prefix('T').unwrap_or(rest);
    let (hours, rest) = take_component(rest, 'H');
    let (minutes, rest) = take_component(rest, 'M');
    let (seconds, _) = take_component(rest, 'S');

    VideoDuration::new(days.saturating_mul(24).saturating_add(hours), minutes, seconds)
}

fn take_component(input: &str, designator: char) -> (u64, &str) {
    match input.split_once(designator) {
        Some((value, rest)) => (value.parse().unwrap_or(0), rest),
        None => (0, input),
    }
}
