//! CreateTicketHandler - Command handler for submitting support tickets.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, TicketId, Timestamp};
use crate::ports::{SupportTicket, SupportTicketRepository};

use super::AccountError;

/// Command to open a support ticket. Anonymous submissions are allowed.
#[derive(Debug, Clone)]
pub struct CreateTicketCommand {
    pub user: Option<AuthenticatedUser>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Handler for support ticket submission.
pub struct CreateTicketHandler {
    tickets: Arc<dyn SupportTicketRepository>,
}

impl CreateTicketHandler {
    pub fn new(tickets: Arc<dyn SupportTicketRepository>) -> Self {
        Self { tickets }
    }

    pub async fn handle(&self, cmd: CreateTicketCommand) -> Result<TicketId, AccountError> {
        let subject = non_blank(cmd.subject);
        let message = non_blank(cmd.message);
        let (Some(subject), Some(message)) = (subject, message) else {
            return Err(AccountError::SubjectAndMessageRequired);
        };

        let ticket = SupportTicket {
            id: TicketId::new(),
            user_id: cmd.user.map(|u| u.id),
            subject,
            message,
            created_at: Timestamp::now(),
        };
        self.tickets.insert(&ticket).await?;

        Ok(ticket.id)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
