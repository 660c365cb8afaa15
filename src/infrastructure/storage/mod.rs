use crate::core::errors::KleingroepeError;
use crate::core::models::{
    announcement::Announcement,
    audit::GroupAudit,
    group::{Collection, Group, GroupStatus},
    user::User,
};
use async_trait::async_trait;

/// Typed repository over the `users`, `pendingGroups`, `groups` and `announcements` collections.
///
/// Groups returned by any method have `current_members` in sync with `members`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fails with `EmailAlreadyRegistered` when the email is taken.
    async fn create_user(&self, user: User) -> Result<User, KleingroepeError>;
    async fn save_user(&self, user: User) -> Result<(), KleingroepeError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, KleingroepeError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, KleingroepeError>;

    async fn save_group(&self, collection: Collection, group: Group) -> Result<(), KleingroepeError>;
    async fn get_group(&self, collection: Collection, group_id: &str) -> Result<Option<Group>, KleingroepeError>;
    async fn list_groups(&self, collection: Collection) -> Result<Vec<Group>, KleingroepeError>;
    async fn update_group_status(
        &self,
        collection: Collection,
        group_id: &str,
        status: GroupStatus,
    ) -> Result<Group, KleingroepeError>;
    /// Batched write: set in `to` with the new status and delete from `from`, atomically.
    async fn move_group(
        &self,
        group_id: &str,
        from: Collection,
        to: Collection,
        status: GroupStatus,
    ) -> Result<Group, KleingroepeError>;
    async fn delete_group(&self, collection: Collection, group_id: &str) -> Result<(), KleingroepeError>;
    /// Array-union of `user_id` into an active group's `members`, refused when the group is full.
    async fn add_group_member(&self, group_id: &str, user_id: &str) -> Result<Group, KleingroepeError>;
    /// Array-remove of `user_id` from an active group's `members`.
    ///
    /// Both membership writes check the status under the same lock and fail with
    /// `GroupNotAvailable` for a group that is no longer active.
    async fn remove_group_member(&self, group_id: &str, user_id: &str) -> Result<Group, KleingroepeError>;

    async fn save_announcement(&self, announcement: Announcement) -> Result<(), KleingroepeError>;
    async fn get_announcement(&self, announcement_id: &str) -> Result<Option<Announcement>, KleingroepeError>;
    /// Newest first.
    async fn list_announcements(&self) -> Result<Vec<Announcement>, KleingroepeError>;
    async fn delete_announcement(&self, announcement_id: &str) -> Result<(), KleingroepeError>;

    async fn save_group_audit(&self, audit: GroupAudit) -> Result<(), KleingroepeError>;
    async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, KleingroepeError>;
}

pub mod in_memory;
