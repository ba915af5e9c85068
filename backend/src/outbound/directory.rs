//! User directory adapters.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::user::{UserId, UserProfile};

/// Process-local user directory.
///
/// The marketplace's user management lives in another service; this adapter
/// holds the profiles the booking core needs for notifications.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    profiles: RwLock<HashMap<UserId, UserProfile>>,
}

impl MemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a profile.
    pub fn upsert(&self, profile: UserProfile) {
        if let Ok(mut profiles) = self.profiles.write() {
            profiles.insert(profile.id, profile);
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn get_by_id(&self, user_id: UserId) -> Result<Option<UserProfile>, UserDirectoryError> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| UserDirectoryError::lookup("profile store poisoned"))?;
        Ok(profiles.get(&user_id).cloned())
    }
}
