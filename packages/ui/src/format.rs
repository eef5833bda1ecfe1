//! Pure formatting helpers shared by all dashboards.
//!
//! Currency and dates follow the en-IN locale the app ships with.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime};

/// `₹` plus Indian-system digit grouping (`12,34,567`).
pub fn fmt_currency(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("₹{sign}{}", group_indian(&amount.unsigned_abs().to_string()))
}

/// Group a digit string the Indian way: last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let bytes = head.as_bytes();
    let mut end = bytes.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// RFC 3339 timestamp or plain `YYYY-MM-DD` date to `5 Mar 2026`.
/// Empty or unparseable input renders the em dash placeholder.
pub fn fmt_date(raw: &str) -> String {
    if raw.is_empty() {
        return "—".to_string();
    }
    let parsed = OffsetDateTime::parse(raw, &Rfc3339)
        .map(|dt| dt.date())
        .or_else(|_| Date::parse(raw, format_description!("[year]-[month]-[day]")));
    match parsed {
        Ok(date) => format!("{} {} {}", date.day(), month_abbr(date.month()), date.year()),
        Err(_) => "—".to_string(),
    }
}

fn month_abbr(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// `#`-prefixed short form of an id: last 8 dashless characters, uppercased.
pub fn short_id(id: &str) -> String {
    if id.is_empty() {
        return "—".to_string();
    }
    let compact: String = id.chars().filter(|c| *c != '-').collect();
    let tail: String = compact
        .chars()
        .rev()
        .take(8)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("#{}", tail.to_uppercase())
}

/// Up to two uppercase initials, `U` when there is no name.
pub fn initials(name: Option<&str>) -> String {
    let name = match name {
        Some(n) if !n.trim().is_empty() => n,
        _ => "U",
    };
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Category emoji for product listings.
pub fn product_emoji(category: &str) -> &'static str {
    match category {
        "flowers" => "🌸",
        "bouquets" => "💐",
        "plants" => "🪴",
        "gifts" => "🎁",
        _ => "🌼",
    }
}

/// Google Maps directions link for a delivery address.
pub fn maps_link(address: &str) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={}",
        urlencoding::encode(address)
    )
}
