use crate::{Permission, Role};

#[test]
fn test_role_new_assigns_id() {
    let role = Role::new(
        "Exec".to_string(),
        "#ff8800".to_string(),
        vec![Permission::ViewMeetings],
    );

    assert_eq!(role.name, "Exec");
    assert_eq!(role.color, "#ff8800");
    assert_eq!(role.permissions, vec![Permission::ViewMeetings]);
    assert!(!role.is_protected());
}

#[test]
fn test_protected_roles_are_detected_by_name() {
    let default_role = Role::new("Default".to_string(), "#999999".to_string(), vec![]);
    let admin_role = Role::new(
        "Admin".to_string(),
        "#000000".to_string(),
        Permission::ALL.to_vec(),
    );

    assert!(default_role.is_protected());
    assert!(admin_role.is_protected());
}

#[test]
fn test_permission_union_merges_roles() {
    let viewer = Role::new(
        "Viewer".to_string(),
        "#111111".to_string(),
        vec![Permission::ViewMeetings, Permission::ViewRoles],
    );
    let manager = Role::new(
        "Manager".to_string(),
        "#222222".to_string(),
        vec![Permission::ViewMeetings, Permission::ManageMeetings],
    );

    let union = Role::permission_union(&[viewer, manager]);

    assert_eq!(union.len(), 3);
    assert!(union.contains(&Permission::ViewMeetings));
    assert!(union.contains(&Permission::ManageMeetings));
    assert!(union.contains(&Permission::ViewRoles));
}

#[test]
fn test_permission_union_of_no_roles_is_empty() {
    assert!(Role::permission_union(&[]).is_empty());
}
