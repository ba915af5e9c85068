//! Port for reading user contact details.

use async_trait::async_trait;

use crate::domain::user::{UserId, UserProfile};

/// Errors raised by user directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserDirectoryError {
    /// The directory could not be queried.
    #[error("user directory lookup failed: {message}")]
    Lookup {
        /// Adapter-supplied context.
        message: String,
    },
}

impl UserDirectoryError {
    /// Builds a [`UserDirectoryError::Lookup`].
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }
}

/// Read-only directory of user profiles, used to enrich notifications with
/// owner contact details.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a profile by user id.
    async fn get_by_id(&self, user_id: UserId) -> Result<Option<UserProfile>, UserDirectoryError>;
}

/// Fixture implementation for tests that never resolve a profile.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn get_by_id(
        &self,
        _user_id: UserId,
    ) -> Result<Option<UserProfile>, UserDirectoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    #[tokio::test]
    async fn fixture_resolves_nobody() {
        let directory = FixtureUserDirectory;
        let found = directory
            .get_by_id(UserId::random())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[test]
    fn lookup_error_formats_message() {
        let err = UserDirectoryError::lookup("directory offline");
        assert!(err.to_string().contains("directory offline"));
    }
}
