//! Unread counts: parsing what pages report, per-tab badges, and the
//! global total shown in the window title.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use rambox_common::ServiceId;

use crate::model::Service;

/// Counts above this are shown as `9999+`.
pub const BADGE_CAP: u32 = 9999;

/// Legacy sentinel some badge scripts use for "unread, count unknown".
const UNKNOWN_SENTINEL: u64 = 999_999;

/// Symbol used for an unknown unread count.
pub const UNKNOWN_SYMBOL: &str = "•";

/// An unread count reported by a service page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreadCount {
    Exact(u32),
    /// There is unread activity but no number for it.
    Unknown,
}

impl Default for UnreadCount {
    fn default() -> Self {
        UnreadCount::ZERO
    }
}

impl UnreadCount {
    pub const ZERO: UnreadCount = UnreadCount::Exact(0);

    fn from_u64(n: u64) -> Self {
        if n == UNKNOWN_SENTINEL {
            UnreadCount::Unknown
        } else {
            UnreadCount::Exact(u32::try_from(n).unwrap_or(u32::MAX))
        }
    }

    /// The numeric value, if there is one.
    pub fn value(self) -> Option<u32> {
        match self {
            UnreadCount::Exact(n) => Some(n),
            UnreadCount::Unknown => None,
        }
    }

    pub fn is_zero(self) -> bool {
        self == UnreadCount::ZERO
    }

    /// Badge text: empty for zero, `•` for unknown, capped at `9999+`.
    pub fn badge_text(self) -> String {
        match self {
            UnreadCount::Exact(0) => String::new(),
            UnreadCount::Unknown => UNKNOWN_SYMBOL.to_string(),
            UnreadCount::Exact(n) if n > BADGE_CAP => format!("{BADGE_CAP}+"),
            UnreadCount::Exact(n) => n.to_string(),
        }
    }

    /// Parse a count from a page: a number, `"•"`, or a numeric string.
    pub fn parse_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if s == UNKNOWN_SYMBOL {
            return Some(UnreadCount::Unknown);
        }
        s.parse::<u64>().ok().map(UnreadCount::from_u64)
    }
}

impl fmt::Display for UnreadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnreadCount::Exact(n) => write!(f, "{n}"),
            UnreadCount::Unknown => write!(f, "{UNKNOWN_SYMBOL}"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Int(u64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for UnreadCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCount::deserialize(deserializer)?;
        let parsed = match raw {
            RawCount::Int(n) => Some(UnreadCount::from_u64(n)),
            // Badge scripts sometimes do arithmetic that yields 3.0
            RawCount::Float(f) if f >= 0.0 && f.fract() == 0.0 && f.is_finite() => {
                Some(UnreadCount::from_u64(f as u64))
            }
            RawCount::Float(_) => None,
            RawCount::Text(s) => UnreadCount::parse_str(&s),
        };
        parsed.ok_or_else(|| {
            serde::de::Error::custom("unread count must be a non-negative integer or \"•\"")
        })
    }
}

fn title_parens_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\(([^)]+)\)").expect("unread: static title regex must compile")
    })
}

fn digits_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("unread: static digits regex must compile"))
}

/// Unread count from a document title such as `(3) Inbox`.
///
/// Takes the text inside the first non-empty parentheses. `•` is unknown, otherwise
/// every digit run is joined (`(1,234)` is 1234). No parens or no digits
/// is zero.
pub fn parse_title_unread(title: &str) -> UnreadCount {
    let Some(inner) = title_parens_regex()
        .captures(title)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
    else {
        return UnreadCount::ZERO;
    };

    if inner == UNKNOWN_SYMBOL {
        return UnreadCount::Unknown;
    }

    let digits: String = digits_regex()
        .find_iter(inner)
        .map(|m| m.as_str())
        .collect();
    if digits.is_empty() {
        return UnreadCount::ZERO;
    }
    match digits.parse::<u64>() {
        Ok(n) => UnreadCount::Exact(u32::try_from(n).unwrap_or(u32::MAX)),
        Err(_) => UnreadCount::Exact(u32::MAX),
    }
}

// =============================================================================
// AGGREGATION
// =============================================================================

/// Result of recording a new count for one service.
#[derive(Debug, Clone, PartialEq)]
pub struct UnreadChange {
    pub previous: UnreadCount,
    pub current: UnreadCount,
    /// Badge text for the tab after the change.
    pub badge: String,
}

/// Per-service counts, tab badges, and the global total.
#[derive(Debug, Default)]
pub struct UnreadCounter {
    counts: HashMap<ServiceId, UnreadCount>,
    badges: HashMap<ServiceId, String>,
    global: HashMap<ServiceId, u32>,
}

impl UnreadCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a count reported by `service`.
    ///
    /// Only exact counts of services that opt in contribute to the total.
    pub fn set(&mut self, service: &Service, count: UnreadCount) -> UnreadChange {
        let previous = self.counts.insert(service.id, count).unwrap_or_default();

        match count {
            UnreadCount::Exact(n) if service.include_in_global_unread_counter => {
                self.global.insert(service.id, n);
            }
            _ => {
                self.global.remove(&service.id);
            }
        }

        let badge = if service.display_tab_unread_counter {
            count.badge_text()
        } else {
            String::new()
        };
        if badge.is_empty() {
            self.badges.remove(&service.id);
        } else {
            self.badges.insert(service.id, badge.clone());
        }

        UnreadChange {
            previous,
            current: count,
            badge,
        }
    }

    /// Reset a service to zero.
    pub fn clear(&mut self, id: ServiceId) {
        self.counts.insert(id, UnreadCount::ZERO);
        self.badges.remove(&id);
        self.global.remove(&id);
    }

    /// Forget a removed service entirely.
    pub fn remove(&mut self, id: ServiceId) {
        self.counts.remove(&id);
        self.badges.remove(&id);
        self.global.remove(&id);
    }

    pub fn clear_all(&mut self) {
        self.counts.clear();
        self.badges.clear();
        self.global.clear();
    }

    /// Re-apply the stored count after a service's counter settings change.
    pub fn refresh(&mut self, service: &Service) {
        let count = self.count(service.id);
        self.set(service, count);
    }

    pub fn count(&self, id: ServiceId) -> UnreadCount {
        self.counts.get(&id).copied().unwrap_or_default()
    }

    pub fn badge(&self, id: ServiceId) -> &str {
        self.badges.get(&id).map(String::as_str).unwrap_or("")
    }

    /// All non-empty badges, ordered by id.
    pub fn badges(&self) -> BTreeMap<ServiceId, String> {
        self.badges
            .iter()
            .map(|(id, badge)| (*id, badge.clone()))
            .collect()
    }

    pub fn total(&self) -> u32 {
        self.global
            .values()
            .fold(0u32, |acc, n| acc.saturating_add(*n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewService;

    fn service(id: u32) -> Service {
        NewService::new("custom", format!("S{id}"), format!("https://s{id}.example/"))
            .into_service(ServiceId(id))
    }

    #[test]
    fn title_parsing() {
        assert_eq!(parse_title_unread("(3) Inbox"), UnreadCount::Exact(3));
        assert_eq!(parse_title_unread("(•) Chat"), UnreadCount::Unknown);
        assert_eq!(parse_title_unread("Inbox"), UnreadCount::ZERO);
        assert_eq!(parse_title_unread("(1,234) Mail"), UnreadCount::Exact(1234));
        assert_eq!(parse_title_unread("() Empty"), UnreadCount::ZERO);
        assert_eq!(parse_title_unread("() (3) Inbox"), UnreadCount::Exact(3));
        assert_eq!(parse_title_unread("(new) Chat"), UnreadCount::ZERO);
        assert_eq!(parse_title_unread("Inbox (12) - Mail"), UnreadCount::Exact(12));
        assert_eq!(parse_title_unread("(0) Quiet"), UnreadCount::ZERO);
    }

    #[test]
    fn deserialize_accepted_forms() {
        let n: UnreadCount = serde_json::from_str("5").unwrap();
        assert_eq!(n, UnreadCount::Exact(5));
        let z: UnreadCount = serde_json::from_str("0").unwrap();
        assert_eq!(z, UnreadCount::ZERO);
        let s: UnreadCount = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(s, UnreadCount::Exact(12));
        let u: UnreadCount = serde_json::from_str("\"•\"").unwrap();
        assert_eq!(u, UnreadCount::Unknown);
        let sentinel: UnreadCount = serde_json::from_str("999999").unwrap();
        assert_eq!(sentinel, UnreadCount::Unknown);
        let f: UnreadCount = serde_json::from_str("4.0").unwrap();
        assert_eq!(f, UnreadCount::Exact(4));
    }

    #[test]
    fn deserialize_rejects_negative_and_garbage() {
        assert!(serde_json::from_str::<UnreadCount>("-1").is_err());
        assert!(serde_json::from_str::<UnreadCount>("2.5").is_err());
        assert!(serde_json::from_str::<UnreadCount>("\"lots\"").is_err());
        assert!(serde_json::from_str::<UnreadCount>("null").is_err());
    }

    #[test]
    fn badge_text_formats() {
        assert_eq!(UnreadCount::ZERO.badge_text(), "");
        assert_eq!(UnreadCount::Exact(7).badge_text(), "7");
        assert_eq!(UnreadCount::Exact(9999).badge_text(), "9999");
        assert_eq!(UnreadCount::Exact(10_000).badge_text(), "9999+");
        assert_eq!(UnreadCount::Unknown.badge_text(), "•");
    }

    #[test]
    fn total_sums_exact_included_counts() {
        let mut counter = UnreadCounter::new();
        let a = service(1);
        let mut b = service(2);
        let c = service(3);
        b.include_in_global_unread_counter = false;

        counter.set(&a, UnreadCount::Exact(3));
        counter.set(&b, UnreadCount::Exact(10));
        counter.set(&c, UnreadCount::Unknown);

        assert_eq!(counter.total(), 3);
        assert_eq!(counter.badge(b.id), "10");
        assert_eq!(counter.badge(c.id), "•");
    }

    #[test]
    fn unknown_replaces_previous_contribution() {
        let mut counter = UnreadCounter::new();
        let a = service(1);
        counter.set(&a, UnreadCount::Exact(4));
        assert_eq!(counter.total(), 4);
        counter.set(&a, UnreadCount::Unknown);
        assert_eq!(counter.total(), 0);
    }

    #[test]
    fn hidden_tab_counter_has_no_badge_but_counts() {
        let mut counter = UnreadCounter::new();
        let mut a = service(1);
        a.display_tab_unread_counter = false;
        let change = counter.set(&a, UnreadCount::Exact(2));
        assert_eq!(change.badge, "");
        assert_eq!(counter.badge(a.id), "");
        assert_eq!(counter.total(), 2);
        assert!(counter.badges().is_empty());
    }

    #[test]
    fn set_reports_previous() {
        let mut counter = UnreadCounter::new();
        let a = service(1);
        let first = counter.set(&a, UnreadCount::Exact(1));
        assert_eq!(first.previous, UnreadCount::ZERO);
        let second = counter.set(&a, UnreadCount::Exact(3));
        assert_eq!(second.previous, UnreadCount::Exact(1));
    }

    #[test]
    fn clear_and_remove() {
        let mut counter = UnreadCounter::new();
        let a = service(1);
        let b = service(2);
        counter.set(&a, UnreadCount::Exact(2));
        counter.set(&b, UnreadCount::Exact(5));

        counter.clear(a.id);
        assert_eq!(counter.count(a.id), UnreadCount::ZERO);
        assert_eq!(counter.badge(a.id), "");
        assert_eq!(counter.total(), 5);

        counter.remove(b.id);
        assert_eq!(counter.total(), 0);
        assert!(counter.badges().is_empty());
    }

    #[test]
    fn refresh_applies_new_settings() {
        let mut counter = UnreadCounter::new();
        let mut a = service(1);
        counter.set(&a, UnreadCount::Exact(6));
        a.include_in_global_unread_counter = false;
        counter.refresh(&a);
        assert_eq!(counter.total(), 0);
        assert_eq!(counter.badge(a.id), "6");
    }

    #[test]
    fn total_saturates() {
        let mut counter = UnreadCounter::new();
        counter.set(&service(1), UnreadCount::Exact(u32::MAX));
        counter.set(&service(2), UnreadCount::Exact(5));
        assert_eq!(counter.total(), u32::MAX);
    }
}
