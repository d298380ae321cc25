use crate::{AttendanceEntry, Meeting, MeetingKind};

use chrono::{Duration, Utc};

fn sample_meeting() -> Meeting {
    let start = Utc::now();
    Meeting::new(
        MeetingKind::Meeting,
        "user-1".to_string(),
        "Weekly sync".to_string(),
        start,
        start + Duration::hours(1),
        "Room 42".to_string(),
        None,
    )
}

#[test]
fn test_new_meeting_validates() {
    let meeting = sample_meeting();
    assert!(meeting.validate().is_ok());
    assert!(meeting.attendance.is_empty());
}

#[test]
fn test_meeting_requires_name_and_location() {
    let mut meeting = sample_meeting();
    meeting.name = "   ".to_string();
    assert!(meeting.validate().is_err());

    let mut meeting = sample_meeting();
    meeting.location = String::new();
    assert!(meeting.validate().is_err());
}

#[test]
fn test_meeting_cannot_end_before_it_starts() {
    let mut meeting = sample_meeting();
    meeting.end_time = meeting.start_time - Duration::minutes(5);
    assert!(meeting.validate().is_err());
}

#[test]
fn test_feedback_rating_bounds() {
    let mut entry = AttendanceEntry::new("user-1".to_string());
    assert!(entry.validate().is_ok());

    entry.feedback_rating = Some(1);
    assert!(entry.validate().is_ok());
    entry.feedback_rating = Some(5);
    assert!(entry.validate().is_ok());

    entry.feedback_rating = Some(0);
    assert!(entry.validate().is_err());
    entry.feedback_rating = Some(6);
    assert!(entry.validate().is_err());
}

#[test]
fn test_duplicate_attendance_entries_are_rejected() {
    let mut meeting = sample_meeting();
    meeting.attendance = vec![
        AttendanceEntry::new("user-1".to_string()),
        AttendanceEntry::new("user-1".to_string()),
    ];

    assert!(meeting.validate().is_err());
}

#[test]
fn test_attendance_lookup_by_user() {
    let mut meeting = sample_meeting();
    let mut entry = AttendanceEntry::new("user-2".to_string());
    entry.did_attend = true;
    meeting.attendance.push(entry);

    assert!(meeting.attendance_for("user-2").unwrap().did_attend);
    assert!(meeting.attendance_for("user-3").is_none());
}
