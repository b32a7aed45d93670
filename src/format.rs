//! Display helpers derived from a raw [`Event`].
//!
//! Every function here is pure and infallible: missing or malformed input
//! degrades to an empty string, `None`, `false`, or a fallback value.

use chrono::{DateTime, FixedOffset, Locale, NaiveDate, NaiveDateTime, Utc};

use crate::currency::format_price_for_event;
use crate::models::{Event, PriceField, TicketType};

/// Price shown when an event carries neither ticket tiers nor a usable price.
pub const DEFAULT_FALLBACK_PRICE: f64 = 12.0;

/// Default locale tag for date and time strings.
pub const DEFAULT_LOCALE: &str = "en-GB";

const IMAGE_WIDTH: u32 = 400;
const IMAGE_HEIGHT: u32 = 400;

/// Cheapest tier price in major units. Returns 0 for an empty slice.
pub fn minimum_ticket_price(tickets: &[TicketType]) -> f64 {
    tickets
        .iter()
        .map(|ticket| ticket.price.total)
        .min()
        .map(|min| min as f64 / 100.0)
        .unwrap_or(0.0)
}

/// Lowest displayable price for an event, in major units.
///
/// Ticket tiers win when present. Otherwise the event's own `price` is used,
/// with string prices parsed leniently; anything unusable yields `fallback`.
pub fn event_min_price(event: &Event, fallback: f64) -> f64 {
    if let Some(tickets) = event.ticket_types.as_deref() {
        if !tickets.is_empty() {
            return minimum_ticket_price(tickets);
        }
    }

    match &event.price {
        Some(PriceField::Number(n)) => *n,
        Some(PriceField::Text(s)) => parse_leading_float(s).unwrap_or(fallback),
        None => fallback,
    }
}

/// "From" price string in the currency of the event's venue country.
pub fn formatted_min_price(event: &Event) -> String {
    format_price_for_event(event_min_price(event, DEFAULT_FALLBACK_PRICE), event)
}

/// Parse the longest numeric prefix of `input` ("25.50abc" -> 25.5).
fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Parse an API timestamp. Accepts RFC 3339, naive date-times (treated as
/// UTC), and bare dates (midnight UTC).
pub fn parse_timestamp(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

fn chrono_locale(tag: &str) -> Locale {
    Locale::try_from(tag.replace('-', "_").as_str()).unwrap_or(Locale::en_GB)
}

fn format_with(date: Option<&str>, locale: &str, pattern: &str) -> String {
    match date.and_then(parse_timestamp) {
        Some(dt) => dt.format_localized(pattern, chrono_locale(locale)).to_string(),
        None => String::new(),
    }
}

/// Short weekday, day and month ("Wed 31 Dec"). Empty when absent.
pub fn format_event_date(date: Option<&str>, locale: &str) -> String {
    format_with(date, locale, "%a %-d %b")
}

/// 12-hour clock time ("8:00 pm"). Empty when absent.
///
/// Locales without day-period names fall back to a 24-hour clock.
pub fn format_event_time(date: Option<&str>, locale: &str) -> String {
    let Some(dt) = date.and_then(parse_timestamp) else {
        return String::new();
    };
    let loc = chrono_locale(locale);
    let twelve_hour = dt.format_localized("%-I:%M %p", loc).to_string();
    let twelve_hour = twelve_hour.trim();
    if twelve_hour.ends_with(|c: char| c.is_alphabetic()) {
        twelve_hour.to_lowercase()
    } else {
        dt.format_localized("%H:%M", loc).to_string()
    }
}

/// Day and short month ("31 Dec"). Empty when absent.
pub fn format_sale_date(date: Option<&str>, locale: &str) -> String {
    format_with(date, locale, "%-d %b")
}

/// True iff the sale start exists and lies strictly after `now`.
///
/// Depends on wall-clock time; evaluate it on every render rather than
/// caching the result.
pub fn is_event_on_sale(sale_start: Option<&str>, now: DateTime<Utc>) -> bool {
    sale_start
        .and_then(parse_timestamp)
        .map(|start| start.with_timezone(&Utc) > now)
        .unwrap_or(false)
}

/// True iff either track list is non-empty.
pub fn has_audio_clips(event: &Event) -> bool {
    let non_empty = |tracks: &Option<Vec<serde_json::Value>>| tracks.as_ref().is_some_and(|t| !t.is_empty());
    non_empty(&event.apple_music_tracks) || non_empty(&event.spotify_tracks)
}

/// Resized image URL, preferring the landscape image over the square one.
pub fn optimized_image_url(event: &Event, width: u32, height: u32) -> Option<String> {
    let images = event.event_images.as_ref()?;
    let url = images
        .landscape
        .as_deref()
        .filter(|u| !u.is_empty())
        .or_else(|| images.square.as_deref().filter(|u| !u.is_empty()))?;

    Some(format!(
        "{}?w={}&h={}&fit=crop&auto=format,compress",
        url, width, height
    ))
}

/// [`optimized_image_url`] at the default card size.
pub fn card_image_url(event: &Event) -> Option<String> {
    optimized_image_url(event, IMAGE_WIDTH, IMAGE_HEIGHT)
}

/// Shorten a lineup time for display ("20:00" -> "20", "8:30 PM" -> "8:30pm").
pub fn compact_lineup_time(time: &str) -> String {
    time.replacen(":00", "", 1).replacen(' ', "", 1).to_lowercase()
}

/// Cut `text` to at most `length` characters and append "...".
///
/// When the last space inside the cut lies beyond 80% of `length`, the cut
/// moves back to that space so words are not split.
pub fn truncate_text(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }

    let truncated: String = text.chars().take(length).collect();
    let last_space = truncated.char_indices().filter(|(_, c)| *c == ' ').last();

    if let Some((byte_idx, _)) = last_space {
        let char_idx = truncated[..byte_idx].chars().count();
        if char_idx as f64 > length as f64 * 0.8 {
            return format!("{}...", truncated[..byte_idx].trim());
        }
    }

    format!("{}...", truncated.trim())
}
