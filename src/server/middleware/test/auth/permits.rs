use super::*;

/// Tests the reader's side of the action matrix.
///
/// Expected: self-service actions and browsing only
#[test]
fn reader_is_limited_to_self_service() {
    assert!(permits(Role::User, Action::ManageOwnLibrary));
    assert!(permits(Role::User, Action::Borrow));
    assert!(permits(Role::User, Action::InnerCircle));
    assert!(permits(Role::User, Action::GetBooks));
    assert!(permits(Role::User, Action::ViewGenres));
    assert!(!permits(Role::User, Action::ManageBooks));
    assert!(!permits(Role::User, Action::GetUsers));
    assert!(!permits(Role::User, Action::ViewAnalytics));
}

/// Tests the admin's side of the action matrix.
///
/// Expected: everything except admin management and reader self-service
#[test]
fn admin_cannot_manage_admins_or_use_self_service() {
    assert!(permits(Role::Admin, Action::ManageBooks));
    assert!(permits(Role::Admin, Action::DeactivateUser));
    assert!(permits(Role::Admin, Action::DeleteUserBooks));
    assert!(!permits(Role::Admin, Action::ManageAdmins));
    assert!(!permits(Role::Admin, Action::ManageOwnLibrary));
    assert!(!permits(Role::Admin, Action::Borrow));
}

/// Tests that the super admin may do everything.
#[test]
fn super_admin_is_unrestricted() {
    assert!(permits(Role::SuperAdmin, Action::ManageAdmins));
    assert!(permits(Role::SuperAdmin, Action::InnerCircle));
    assert!(permits(Role::SuperAdmin, Action::ViewAnalytics));
}
