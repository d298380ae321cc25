use crate::Permission;

use std::str::FromStr;

#[test]
fn test_permission_round_trips_through_str() {
    for permission in Permission::ALL {
        let parsed = Permission::from_str(permission.as_str()).unwrap();
        assert_eq!(parsed, permission);
    }
}

#[test]
fn test_permission_rejects_unknown_value() {
    assert!(Permission::from_str("DELETE_EVERYTHING").is_err());
    assert!(Permission::from_str("view_meetings").is_err());
    assert!(Permission::from_str("").is_err());
}

#[test]
fn test_permission_serializes_as_screaming_snake() {
    let json = serde_json::to_string(&Permission::ManageMeetings).unwrap();
    assert_eq!(json, "\"MANAGE_MEETINGS\"");
}
