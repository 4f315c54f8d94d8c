//! Note filters built from request query parameters.
//!
//! [`NoteFilter`] is the only way to select notes for reading, updating, or
//! deleting, and it cannot be built without an owner. Request parameters go
//! through [`NoteFilter::from_params`], which drops everything outside the
//! allow-list and always scopes the result to the caller.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;

use crate::types::{Note, NoteId, UserPublicId};

/// Query keys a request may filter on.
pub const ALLOWED_FILTERS: &[&str] = &[
    "id",
    "is_archived",
    "from_date",
    "till_date",
    "type_name",
    "tag_list",
];

/// Name reported for the owner filter that is always applied.
pub const OWNER_FILTER: &str = "user_public_id";

/// Errors from parsing filter values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// A value could not be parsed for its key.
    #[error("invalid value for filter {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Criteria selecting a user's notes. Unset criteria match everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFilter {
    owner: UserPublicId,
    pub id: Option<NoteId>,
    pub is_archived: Option<bool>,
    /// Inclusive lower bound on `created`.
    pub from_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created`.
    pub till_date: Option<DateTime<Utc>>,
    pub type_name: Option<String>,
    /// A note must carry every one of these tags.
    pub tags: BTreeSet<String>,
}

impl NoteFilter {
    /// A filter matching every note of `owner`.
    #[must_use]
    pub fn for_owner(owner: UserPublicId) -> Self {
        Self {
            owner,
            id: None,
            is_archived: None,
            from_date: None,
            till_date: None,
            type_name: None,
            tags: BTreeSet::new(),
        }
    }

    /// Builds a filter from request query pairs, scoped to `caller`.
    ///
    /// Returns the filter together with the names of the filters applied,
    /// in request order, with the owner filter last. Unknown keys and empty
    /// values are ignored; for repeated keys the first non-empty value wins.
    pub fn from_params<K, V>(
        params: &[(K, V)],
        caller: UserPublicId,
    ) -> Result<(Self, Vec<String>), FilterError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::for_owner(caller);
        let mut applied: Vec<String> = Vec::new();

        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            if !ALLOWED_FILTERS.contains(&key)
                || value.is_empty()
                || applied.iter().any(|k| k == key)
            {
                continue;
            }

            match key {
                "id" => {
                    let id = value
                        .parse::<NoteId>()
                        .map_err(|_| invalid("id", value, "expected a UUID"))?;
                    filter.id = Some(id);
                }
                "is_archived" => filter.is_archived = Some(parse_bool("is_archived", value)?),
                "from_date" => filter.from_date = Some(parse_date("from_date", value, false)?),
                "till_date" => filter.till_date = Some(parse_date("till_date", value, true)?),
                "type_name" => filter.type_name = Some(value.to_string()),
                "tag_list" => filter.tags = parse_tag_list(value),
                _ => continue,
            }
            applied.push(key.to_string());
        }

        applied.push(OWNER_FILTER.to_string());
        Ok((filter, applied))
    }

    /// The owner every matched note belongs to.
    #[must_use]
    pub fn owner(&self) -> &UserPublicId {
        &self.owner
    }

    /// Whether `note` satisfies every criterion, ownership included.
    #[must_use]
    pub fn matches(&self, note: &Note) -> bool {
        note.user_public_id == self.owner
            && self.id.is_none_or(|id| note.id == id)
            && self.is_archived.is_none_or(|a| note.is_archived == a)
            && self.from_date.is_none_or(|from| note.created >= from)
            && self.till_date.is_none_or(|till| note.created <= till)
            && self
                .type_name
                .as_ref()
                .is_none_or(|t| note.type_name.as_ref() == Some(t))
            && note.has_all_tags(&self.tags)
    }
}

/// Splits a comma-separated tag list into unique, trimmed, non-empty names.
#[must_use]
pub fn parse_tag_list(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

fn invalid(key: &'static str, value: &str, reason: &'static str) -> FilterError {
    FilterError::InvalidValue {
        key,
        value: value.to_string(),
        reason,
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, FilterError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}

/// Parses an RFC 3339 timestamp or a `YYYY-MM-DD` date. A bare date
/// expands to the start of the day, or its last microsecond for `end_of_day`.
fn parse_date(key: &'static str, value: &str, end_of_day: bool) -> Result<DateTime<Utc>, FilterError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| invalid(key, value, "expected YYYY-MM-DD or an RFC 3339 timestamp"))?;

    let time = if end_of_day {
        date.and_hms_micro_opt(23, 59, 59, 999_999)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    time.map(|t| t.and_utc())
        .ok_or_else(|| invalid(key, value, "date out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn caller() -> UserPublicId {
        UserPublicId::new("caller").unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn note_for(owner: &str) -> Note {
        let created = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        Note {
            id: NoteId::new(),
            user_public_id: UserPublicId::new(owner).unwrap(),
            text: "t".to_string(),
            type_name: Some("note".to_string()),
            tags: ["errand".to_string(), "home".to_string()].into_iter().collect(),
            is_archived: false,
            created,
            modified: created,
        }
    }

    #[test]
    fn owner_is_always_applied_last() {
        let (filter, applied) = NoteFilter::from_params::<String, String>(&[], caller()).unwrap();
        assert_eq!(filter.owner(), &caller());
        assert_eq!(applied, vec![OWNER_FILTER.to_string()]);
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let p = params(&[("color", "red"), ("type_name", "todo"), ("limit", "3")]);
        let (filter, applied) = NoteFilter::from_params(&p, caller()).unwrap();
        assert_eq!(filter.type_name.as_deref(), Some("todo"));
        assert_eq!(applied, vec!["type_name", OWNER_FILTER]);
    }

    #[test]
    fn request_cannot_override_owner() {
        let p = params(&[("user_public_id", "someone-else")]);
        let (filter, applied) = NoteFilter::from_params(&p, caller()).unwrap();
        assert_eq!(filter.owner().as_str(), "caller");
        assert_eq!(applied, vec![OWNER_FILTER]);
    }

    #[test]
    fn tag_list_is_split_trimmed_and_deduplicated() {
        let p = params(&[("tag_list", "errand, home,,errand ")]);
        let (filter, _) = NoteFilter::from_params(&p, caller()).unwrap();
        let expected: BTreeSet<String> = ["errand", "home"].iter().map(|s| s.to_string()).collect();
        assert_eq!(filter.tags, expected);
    }

    #[test]
    fn empty_values_are_ignored() {
        let p = params(&[("tag_list", ""), ("is_archived", " ")]);
        let (filter, applied) = NoteFilter::from_params(&p, caller()).unwrap();
        assert!(filter.tags.is_empty());
        assert!(filter.is_archived.is_none());
        assert_eq!(applied, vec![OWNER_FILTER]);
    }

    #[test]
    fn first_occurrence_wins() {
        let p = params(&[("type_name", "a"), ("type_name", "b")]);
        let (filter, applied) = NoteFilter::from_params(&p, caller()).unwrap();
        assert_eq!(filter.type_name.as_deref(), Some("a"));
        assert_eq!(applied, vec!["type_name", OWNER_FILTER]);
    }

    #[test]
    fn malformed_values_are_rejected() {
        for (k, v) in [
            ("id", "not-a-uuid"),
            ("is_archived", "maybe"),
            ("from_date", "yesterday"),
            ("till_date", "2024-13-01"),
        ] {
            let p = params(&[(k, v)]);
            assert!(NoteFilter::from_params(&p, caller()).is_err(), "{k}={v}");
        }
    }

    #[test]
    fn date_bounds_cover_whole_days() {
        let p = params(&[("from_date", "2024-03-10"), ("till_date", "2024-03-10")]);
        let (filter, _) = NoteFilter::from_params(&p, caller()).unwrap();
        assert!(filter.matches(&note_for("caller")));

        let p = params(&[("till_date", "2024-03-09")]);
        let (filter, _) = NoteFilter::from_params(&p, caller()).unwrap();
        assert!(!filter.matches(&note_for("caller")));
    }

    #[test]
    fn rfc3339_dates_are_exact() {
        let p = params(&[("from_date", "2024-03-10T12:00:01Z")]);
        let (filter, _) = NoteFilter::from_params(&p, caller()).unwrap();
        assert!(!filter.matches(&note_for("caller")));
    }

    #[test]
    fn matches_never_crosses_owners() {
        let filter = NoteFilter::for_owner(caller());
        assert!(filter.matches(&note_for("caller")));
        assert!(!filter.matches(&note_for("other")));
    }

    #[test]
    fn tag_filter_requires_every_tag() {
        let note = note_for("caller");

        let p = params(&[("tag_list", "errand,home")]);
        let (filter, _) = NoteFilter::from_params(&p, caller()).unwrap();
        assert!(filter.matches(&note));

        let p = params(&[("tag_list", "errand,work")]);
        let (filter, _) = NoteFilter::from_params(&p, caller()).unwrap();
        assert!(!filter.matches(&note));
    }

    #[test]
    fn archived_and_type_filters() {
        let note = note_for("caller");

        let p = params(&[("is_archived", "False"), ("type_name", "note")]);
        let (filter, applied) = NoteFilter::from_params(&p, caller()).unwrap();
        assert!(filter.matches(&note));
        assert_eq!(applied, vec!["is_archived", "type_name", OWNER_FILTER]);

        let p = params(&[("is_archived", "1")]);
        let (filter, _) = NoteFilter::from_params(&p, caller()).unwrap();
        assert!(!filter.matches(&note));
    }
}
