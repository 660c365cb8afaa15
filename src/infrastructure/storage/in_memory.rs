use crate::core::errors::KleingroepeError;
use crate::core::models::{
    announcement::Announcement,
    audit::GroupAudit,
    group::{Collection, Group, GroupStatus},
    user::User,
};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type GroupMap = Arc<RwLock<HashMap<String, Group>>>;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<String, User>>>,
    users_by_email: Arc<RwLock<HashMap<String, String>>>,
    pending_groups: GroupMap,
    groups: GroupMap,
    announcements: Arc<RwLock<HashMap<String, Announcement>>>,
    group_audits: Arc<RwLock<HashMap<String, Vec<GroupAudit>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, collection: Collection) -> &GroupMap {
        match collection {
            Collection::PendingGroups => &self.pending_groups,
            Collection::Groups => &self.groups,
        }
    }
}

fn synced(mut group: Group) -> Group {
    group.sync_member_count();
    group
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, user: User) -> Result<User, KleingroepeError> {
        let mut users_by_email = self.users_by_email.write().await;
        if let Some(email) = &user.email {
            let key = email_key(email);
            if users_by_email.contains_key(&key) {
                return Err(KleingroepeError::EmailAlreadyRegistered(email.clone()));
            }
            users_by_email.insert(key, user.id.clone());
        }
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn save_user(&self, user: User) -> Result<(), KleingroepeError> {
        let mut users_by_email = self.users_by_email.write().await;
        let mut users = self.users.write().await;
        if let Some(previous) = users.get(&user.id).and_then(|u| u.email.clone()) {
            users_by_email.remove(&email_key(&previous));
        }
        if let Some(email) = &user.email {
            users_by_email.insert(email_key(email), user.id.clone());
        }
        users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, KleingroepeError> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, KleingroepeError> {
        let users_by_email = self.users_by_email.read().await;
        let users = self.users.read().await;
        Ok(users_by_email
            .get(&email_key(email))
            .and_then(|user_id| users.get(user_id).cloned()))
    }

    async fn save_group(&self, collection: Collection, group: Group) -> Result<(), KleingroepeError> {
        let mut groups = self.collection(collection).write().await;
        groups.insert(group.id.clone(), synced(group));
        Ok(())
    }

    async fn get_group(&self, collection: Collection, group_id: &str) -> Result<Option<Group>, KleingroepeError> {
        let groups = self.collection(collection).read().await;
        Ok(groups.get(group_id).cloned().map(synced))
    }

    async fn list_groups(&self, collection: Collection) -> Result<Vec<Group>, KleingroepeError> {
        let groups = self.collection(collection).read().await;
        let mut list: Vec<Group> = groups.values().cloned().map(synced).collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn update_group_status(
        &self,
        collection: Collection,
        group_id: &str,
        status: GroupStatus,
    ) -> Result<Group, KleingroepeError> {
        let mut groups = self.collection(collection).write().await;
        let group = groups
            .get_mut(group_id)
            .ok_or_else(|| KleingroepeError::GroupNotFound(group_id.to_string(), collection))?;
        group.status = status;
        Ok(synced(group.clone()))
    }

    async fn move_group(
        &self,
        group_id: &str,
        from: Collection,
        to: Collection,
        status: GroupStatus,
    ) -> Result<Group, KleingroepeError> {
        if from == to {
            return self.update_group_status(from, group_id, status).await;
        }
        // Lock order is fixed (pending, then active) whatever the direction of the move.
        let mut pending = self.pending_groups.write().await;
        let mut active = self.groups.write().await;
        let (source, target) = match from {
            Collection::PendingGroups => (&mut *pending, &mut *active),
            Collection::Groups => (&mut *active, &mut *pending),
        };
        let mut group = source
            .remove(group_id)
            .ok_or_else(|| KleingroepeError::GroupNotFound(group_id.to_string(), from))?;
        group.status = status;
        let group = synced(group);
        target.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn delete_group(&self, collection: Collection, group_id: &str) -> Result<(), KleingroepeError> {
        let mut groups = self.collection(collection).write().await;
        groups
            .remove(group_id)
            .map(|_| ())
            .ok_or_else(|| KleingroepeError::GroupNotFound(group_id.to_string(), collection))
    }

    async fn add_group_member(&self, group_id: &str, user_id: &str) -> Result<Group, KleingroepeError> {
        let mut groups = self.groups.write().await;
        let group = groups
            .get_mut(group_id)
            .ok_or_else(|| KleingroepeError::GroupNotFound(group_id.to_string(), Collection::Groups))?;
        if group.status != GroupStatus::Active {
            return Err(KleingroepeError::GroupNotAvailable(group_id.to_string()));
        }
        if !group.has_member(user_id) {
            if group.is_full() {
                return Err(KleingroepeError::GroupFull(group_id.to_string()));
            }
            group.members.push(user_id.to_string());
        }
        group.sync_member_count();
        Ok(group.clone())
    }

    async fn remove_group_member(&self, group_id: &str, user_id: &str) -> Result<Group, KleingroepeError> {
        let mut groups = self.groups.write().await;
        let group = groups
            .get_mut(group_id)
            .ok_or_else(|| KleingroepeError::GroupNotFound(group_id.to_string(), Collection::Groups))?;
        if group.status != GroupStatus::Active {
            return Err(KleingroepeError::GroupNotAvailable(group_id.to_string()));
        }
        group.members.retain(|m| m != user_id);
        group.sync_member_count();
        Ok(group.clone())
    }

    async fn save_announcement(&self, announcement: Announcement) -> Result<(), KleingroepeError> {
        let mut announcements = self.announcements.write().await;
        announcements.insert(announcement.id.clone(), announcement);
        Ok(())
    }

    async fn get_announcement(&self, announcement_id: &str) -> Result<Option<Announcement>, KleingroepeError> {
        let announcements = self.announcements.read().await;
        Ok(announcements.get(announcement_id).cloned())
    }

    async fn list_announcements(&self) -> Result<Vec<Announcement>, KleingroepeError> {
        let announcements = self.announcements.read().await;
        let mut list: Vec<Announcement> = announcements.values().cloned().collect();
        list.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn delete_announcement(&self, announcement_id: &str) -> Result<(), KleingroepeError> {
        let mut announcements = self.announcements.write().await;
        announcements
            .remove(announcement_id)
            .map(|_| ())
            .ok_or_else(|| KleingroepeError::AnnouncementNotFound(announcement_id.to_string()))
    }

    async fn save_group_audit(&self, audit: GroupAudit) -> Result<(), KleingroepeError> {
        let mut group_audits = self.group_audits.write().await;
        group_audits
            .entry(audit.group_id.clone())
            .or_insert_with(Vec::new)
            .push(audit);
        Ok(())
    }

    async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, KleingroepeError> {
        let group_audits = self.group_audits.read().await;
        Ok(group_audits.get(group_id).cloned().unwrap_or_default())
    }
}
