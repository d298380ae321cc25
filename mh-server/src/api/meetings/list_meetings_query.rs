use mh_db::MeetingPredicate;

use serde::Deserialize;

/// Query parameters for listing meetings.
///
/// Everything is taken as raw strings: numeric parameters fall back to their
/// defaults when unparseable, and keys outside this set are ignored.
#[derive(Debug, Deserialize, Default)]
pub struct ListMeetingsQuery {
    /// Millisecond epoch upper bound on the start time (exclusive)
    pub before: Option<String>,
    /// Millisecond epoch lower bound on the start time (exclusive)
    pub after: Option<String>,
    /// "true" includes meetings whose time has already passed
    pub passed: Option<String>,
    pub creator: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListMeetingsQuery {
    /// Compile the recognized filters into an explicit predicate list.
    ///
    /// The not-yet-passed bound is injected ahead of the caller's filters;
    /// only the exact value `passed=true` lifts it.
    pub fn to_predicates(&self, now_ms: i64) -> Vec<MeetingPredicate> {
        let mut predicates = Vec::new();

        if self.passed.as_deref() != Some("true") {
            predicates.push(MeetingPredicate::StartsAtOrAfter(now_ms));
        }

        if let Some(bound) = parse_millis(self.before.as_deref()) {
            predicates.push(MeetingPredicate::StartsBefore(bound));
        }
        if let Some(bound) = parse_millis(self.after.as_deref()) {
            predicates.push(MeetingPredicate::StartsAfter(bound));
        }
        if let Some(ref creator) = self.creator {
            predicates.push(MeetingPredicate::CreatorEq(creator.clone()));
        }
        if let Some(ref name) = self.name {
            predicates.push(MeetingPredicate::NameContains(name.clone()));
        }
        if let Some(ref location) = self.location {
            predicates.push(MeetingPredicate::LocationContains(location.clone()));
        }
        if let Some(ref kind) = self.kind {
            predicates.push(MeetingPredicate::KindContains(kind.clone()));
        }

        predicates
    }
}

/// Unparseable time bounds are dropped rather than reported.
fn parse_millis(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
}
