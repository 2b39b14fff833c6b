//! UpdatePreferencesHandler - Command handler for notification preference
//! changes.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{NotificationPreferences, NotificationPreferencesRepository};

use super::AccountError;

/// Command to replace the caller's notification preferences. Absent toggles
/// read as false, so the row always reflects the last full submission.
#[derive(Debug, Clone)]
pub struct UpdatePreferencesCommand {
    pub user: AuthenticatedUser,
    pub email_release_alerts: bool,
    pub email_expiry_alerts: bool,
}

/// Handler for notification preference updates.
pub struct UpdatePreferencesHandler {
    preferences: Arc<dyn NotificationPreferencesRepository>,
}

impl UpdatePreferencesHandler {
    pub fn new(preferences: Arc<dyn NotificationPreferencesRepository>) -> Self {
        Self { preferences }
    }

    pub async fn handle(&self, cmd: UpdatePreferencesCommand) -> Result<(), AccountError> {
        self.preferences
            .upsert(&NotificationPreferences {
                user_id: cmd.user.id,
                email_release_alerts: cmd.email_release_alerts,
                email_expiry_alerts: cmd.email_expiry_alerts,
            })
            .await?;
        Ok(())
    }
}
