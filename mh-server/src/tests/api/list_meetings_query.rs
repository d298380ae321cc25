use crate::ListMeetingsQuery;

use mh_db::MeetingPredicate;

const NOW_MS: i64 = 1_700_000_000_000;

#[test]
fn test_default_injects_not_yet_passed_bound_first() {
    let query = ListMeetingsQuery {
        name: Some("sync".to_string()),
        ..ListMeetingsQuery::default()
    };

    let predicates = query.to_predicates(NOW_MS);

    assert_eq!(
        predicates,
        vec![
            MeetingPredicate::StartsAtOrAfter(NOW_MS),
            MeetingPredicate::NameContains("sync".to_string()),
        ]
    );
}

#[test]
fn test_passed_true_lifts_the_default_bound() {
    let query = ListMeetingsQuery {
        passed: Some("true".to_string()),
        ..ListMeetingsQuery::default()
    };

    assert_eq!(query.to_predicates(NOW_MS), vec![]);
}

#[test]
fn test_passed_false_behaves_like_the_default() {
    // Only the exact value "true" lifts the bound
    for value in ["false", "TRUE", "1", "yes"] {
        let query = ListMeetingsQuery {
            passed: Some(value.to_string()),
            ..ListMeetingsQuery::default()
        };

        assert_eq!(
            query.to_predicates(NOW_MS),
            vec![MeetingPredicate::StartsAtOrAfter(NOW_MS)]
        );
    }
}

#[test]
fn test_time_bounds_parse_and_garbage_is_dropped() {
    let query = ListMeetingsQuery {
        passed: Some("true".to_string()),
        before: Some("1700000001000".to_string()),
        after: Some("soon".to_string()),
        ..ListMeetingsQuery::default()
    };

    assert_eq!(
        query.to_predicates(NOW_MS),
        vec![MeetingPredicate::StartsBefore(1_700_000_001_000)]
    );
}

#[test]
fn test_all_recognized_filters_compose() {
    let query = ListMeetingsQuery {
        passed: Some("true".to_string()),
        before: Some("2".to_string()),
        after: Some("1".to_string()),
        creator: Some("user-1".to_string()),
        name: Some("sync".to_string()),
        location: Some("room".to_string()),
        kind: Some("meet".to_string()),
        ..ListMeetingsQuery::default()
    };

    assert_eq!(
        query.to_predicates(NOW_MS),
        vec![
            MeetingPredicate::StartsBefore(2),
            MeetingPredicate::StartsAfter(1),
            MeetingPredicate::CreatorEq("user-1".to_string()),
            MeetingPredicate::NameContains("sync".to_string()),
            MeetingPredicate::LocationContains("room".to_string()),
            MeetingPredicate::KindContains("meet".to_string()),
        ]
    );
}
