mod api_tests;
mod moderation_tests;

use crate::core::models::group::{
    Collection, FocusCategoryKey, Group, GroupRegistration, GroupStatus, MeetingDay, MeetingTime, MeetingType,
    TargetAudience,
};
use crate::core::models::user::User;
use crate::core::services::KleingroepeService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub type TestService = KleingroepeService<InMemoryLogging, InMemoryStorage, InMemoryCache>;

pub const TEST_SECRET: &str = "test-secret";

pub fn create_test_service() -> TestService {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let cache = InMemoryCache::new();
    KleingroepeService::new(storage, logging, cache, TEST_SECRET.to_string()).with_password_cost(4)
}

pub fn registration(group_name: &str) -> GroupRegistration {
    GroupRegistration {
        leader_name: "Anna Botha".to_string(),
        leader_email: Some("anna@example.com".to_string()),
        leader_cellphone: None,
        group_name: group_name.to_string(),
        meeting_day: MeetingDay::Tuesday,
        meeting_time: MeetingTime::Evening,
        meeting_frequency: "Weekliks".to_string(),
        meeting_type: MeetingType::InPerson,
        target_audience: TargetAudience::MixedAdults,
        childcare_available: false,
        location: "Langenhovenpark".to_string(),
        primary_focus: FocusCategoryKey::Vryheid,
        secondary_focus: vec![],
        capacity: 10,
        description: Some("Ons lees saam deur Romeine.".to_string()),
        expiry_date: None,
        image: None,
    }
}

pub async fn create_admin(service: &TestService) -> User {
    service
        .ensure_admin("Admin", "admin@example.com", "admin-password")
        .await
        .unwrap()
}

pub async fn create_member(service: &TestService, name: &str, email: &str) -> User {
    service
        .register_user(name.to_string(), email.to_string(), "password123".to_string())
        .await
        .unwrap()
}

pub async fn create_pending_group(service: &TestService, group_name: &str) -> Group {
    service.register_group(registration(group_name), None).await.unwrap()
}

pub async fn create_active_group(service: &TestService, admin: &User, registration: GroupRegistration) -> Group {
    let pending = service.register_group(registration, None).await.unwrap();
    service
        .update_status(&pending.id, GroupStatus::Active, Collection::PendingGroups, admin)
        .await
        .unwrap()
        .group
}
