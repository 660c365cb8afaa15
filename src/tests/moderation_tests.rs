use crate::core::errors::KleingroepeError;
use crate::core::models::group::{Collection, GroupStatus};
use crate::infrastructure::storage::Storage;
use crate::tests::{create_admin, create_member, create_pending_group, create_test_service};

#[tokio::test]
async fn test_approve_moves_group_to_active_collection() {
    let service = create_test_service();
    let admin = create_admin(&service).await;
    let group = create_pending_group(&service, "Romeine Studie").await;

    let approved = service
        .update_status(&group.id, GroupStatus::Active, Collection::PendingGroups, &admin)
        .await
        .unwrap();
    assert_eq!(approved.source_type, Collection::Groups);
    assert_eq!(approved.group.status, GroupStatus::Active);

    let storage = service.storage();
    assert!(storage.get_group(Collection::PendingGroups, &group.id).await.unwrap().is_none());
    let active = storage.get_group(Collection::Groups, &group.id).await.unwrap().unwrap();
    assert_eq!(active.status, GroupStatus::Active);
    assert_eq!(active.group_name, "Romeine Studie");

    let rows = service.list_moderation_groups(&admin).await.unwrap();
    assert_eq!(rows.iter().filter(|r| r.group.id == group.id).count(), 1);

    let audits = service.get_group_audits(&group.id).await.unwrap();
    let actions: Vec<&str> = audits.iter().map(|a| a.action.as_str()).collect();
    assert_eq!(actions, vec!["GROUP_REGISTERED", "GROUP_APPROVED"]);
    assert_eq!(audits[1].user_id.as_deref(), Some(admin.id.as_str()));
}

#[tokio::test]
async fn test_reject_pending_group_stays_in_place() {
    let service = create_test_service();
    let admin = create_admin(&service).await;
    let group = create_pending_group(&service, "Romeine Studie").await;

    let rejected = service
        .update_status(&group.id, GroupStatus::Rejected, Collection::PendingGroups, &admin)
        .await
        .unwrap();
    assert_eq!(rejected.source_type, Collection::PendingGroups);
    assert_eq!(rejected.group.status, GroupStatus::Rejected);

    let stored = service
        .storage()
        .get_group(Collection::PendingGroups, &group.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, GroupStatus::Rejected);
    assert!(service.storage().get_group(Collection::Groups, &group.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_return_active_group_to_pending() {
    let service = create_test_service();
    let admin = create_admin(&service).await;
    let group = create_pending_group(&service, "Romeine Studie").await;
    service
        .update_status(&group.id, GroupStatus::Active, Collection::PendingGroups, &admin)
        .await
        .unwrap();

    let returned = service
        .update_status(&group.id, GroupStatus::Pending, Collection::Groups, &admin)
        .await
        .unwrap();
    assert_eq!(returned.source_type, Collection::PendingGroups);
    assert_eq!(returned.group.status, GroupStatus::Pending);

    let storage = service.storage();
    assert!(storage.get_group(Collection::Groups, &group.id).await.unwrap().is_none());
    assert!(storage.get_group(Collection::PendingGroups, &group.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_deactivate_active_group_in_place() {
    let service = create_test_service();
    let admin = create_admin(&service).await;
    let group = create_pending_group(&service, "Romeine Studie").await;
    service
        .update_status(&group.id, GroupStatus::Active, Collection::PendingGroups, &admin)
        .await
        .unwrap();

    let updated = service
        .update_status(&group.id, GroupStatus::Rejected, Collection::Groups, &admin)
        .await
        .unwrap();
    assert_eq!(updated.source_type, Collection::Groups);
    assert_eq!(updated.group.status, GroupStatus::Rejected);

    let result = service.group_detail(&group.id).await;
    assert!(matches!(result, Err(KleingroepeError::GroupNotAvailable(_))));
}

#[tokio::test]
async fn test_update_status_unknown_group() {
    let service = create_test_service();
    let admin = create_admin(&service).await;

    let result = service
        .update_status("missing", GroupStatus::Active, Collection::PendingGroups, &admin)
        .await;
    assert!(matches!(
        result,
        Err(KleingroepeError::GroupNotFound(_, Collection::PendingGroups))
    ));
}

#[tokio::test]
async fn test_update_status_wrong_source_collection() {
    let service = create_test_service();
    let admin = create_admin(&service).await;
    let group = create_pending_group(&service, "Romeine Studie").await;

    let result = service
        .update_status(&group.id, GroupStatus::Rejected, Collection::Groups, &admin)
        .await;
    assert!(matches!(result, Err(KleingroepeError::GroupNotFound(_, Collection::Groups))));
}

#[tokio::test]
async fn test_second_approval_is_not_found() {
    let service = create_test_service();
    let admin = create_admin(&service).await;
    let group = create_pending_group(&service, "Romeine Studie").await;

    service
        .update_status(&group.id, GroupStatus::Active, Collection::PendingGroups, &admin)
        .await
        .unwrap();
    let again = service
        .update_status(&group.id, GroupStatus::Active, Collection::PendingGroups, &admin)
        .await;
    assert!(matches!(again, Err(KleingroepeError::GroupNotFound(..))));

    let rows = service.list_moderation_groups(&admin).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_delete_group_only_touches_named_collection() {
    let service = create_test_service();
    let admin = create_admin(&service).await;
    let group = create_pending_group(&service, "Romeine Studie").await;

    let wrong = service.delete_group(&group.id, Collection::Groups, &admin).await;
    assert!(matches!(wrong, Err(KleingroepeError::GroupNotFound(_, Collection::Groups))));
    assert!(service
        .storage()
        .get_group(Collection::PendingGroups, &group.id)
        .await
        .unwrap()
        .is_some());

    service
        .delete_group(&group.id, Collection::PendingGroups, &admin)
        .await
        .unwrap();
    assert!(service.list_moderation_groups(&admin).await.unwrap().is_empty());

    let audits = service.get_group_audits(&group.id).await.unwrap();
    assert_eq!(audits.last().map(|a| a.action.as_str()), Some("GROUP_DELETED"));
}

#[tokio::test]
async fn test_list_moderation_groups_tags_source() {
    let service = create_test_service();
    let admin = create_admin(&service).await;
    let pending = create_pending_group(&service, "Wag Nog").await;
    let active = create_pending_group(&service, "Reeds Aktief").await;
    service
        .update_status(&active.id, GroupStatus::Active, Collection::PendingGroups, &admin)
        .await
        .unwrap();

    let rows = service.list_moderation_groups(&admin).await.unwrap();
    assert_eq!(rows.len(), 2);
    let source_of = |id: &str| rows.iter().find(|r| r.group.id == id).map(|r| r.source_type);
    assert_eq!(source_of(&pending.id), Some(Collection::PendingGroups));
    assert_eq!(source_of(&active.id), Some(Collection::Groups));
}

#[tokio::test]
async fn test_moderation_requires_admin() {
    let service = create_test_service();
    let member = create_member(&service, "Pieter", "pieter@example.com").await;
    let group = create_pending_group(&service, "Romeine Studie").await;

    let update = service
        .update_status(&group.id, GroupStatus::Active, Collection::PendingGroups, &member)
        .await;
    assert!(matches!(update, Err(KleingroepeError::PermissionDenied(_))));

    let delete = service.delete_group(&group.id, Collection::PendingGroups, &member).await;
    assert!(matches!(delete, Err(KleingroepeError::PermissionDenied(_))));

    let list = service.list_moderation_groups(&member).await;
    assert!(matches!(list, Err(KleingroepeError::PermissionDenied(_))));

    // Nothing moved.
    assert!(service
        .storage()
        .get_group(Collection::PendingGroups, &group.id)
        .await
        .unwrap()
        .is_some());
}
