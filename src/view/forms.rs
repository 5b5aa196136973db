//! New-ticket form.

use crate::api::ApiClient;
use crate::error::{Result, TickkkError};
use crate::models::{NewTicket, Ticket};
use crate::types::{TicketCategory, TicketPriority};
use crate::validation::{
    FieldErrors, MIN_DESCRIPTION_LENGTH, MIN_SUBJECT_LENGTH, is_blank, is_valid_email,
    is_valid_phone, require, require_min_length,
};

pub const CREATE_ERROR_MESSAGE: &str = "Failed to create ticket. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicketForm {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
    pub category: TicketCategory,
    pub department: String,
    errors: FieldErrors,
    error: Option<String>,
}

impl Default for NewTicketForm {
    fn default() -> Self {
        Self {
            client_name: String::new(),
            client_email: String::new(),
            client_phone: String::new(),
            subject: String::new(),
            description: String::new(),
            priority: TicketPriority::Media,
            category: TicketCategory::Tecnico,
            department: String::new(),
            errors: FieldErrors::new(),
            error: None,
        }
    }
}

impl NewTicketForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A blank form with the contact fields filled in.
    pub fn for_client(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            client_name: name.into(),
            client_email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.client_phone = phone.into();
        self
    }

    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: TicketCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Field errors from the last [`validate`](Self::validate).
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Form-level error from the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Forget the message for a field the user is editing again.
    pub fn touch(&mut self, field: &str) {
        self.errors.clear(field);
    }

    /// Check every field and remember the messages. Returns true when the
    /// form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors = self.check();
        self.errors.is_empty()
    }

    fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        require(&mut errors, "client_name", &self.client_name, "Name is required");

        if require(&mut errors, "client_email", &self.client_email, "Email is required")
            && !is_valid_email(&self.client_email)
        {
            errors.add("client_email", "Email is not valid");
        }

        if !is_blank(&self.client_phone) && !is_valid_phone(&self.client_phone) {
            errors.add("client_phone", "Phone number is not valid");
        }

        if require(&mut errors, "subject", &self.subject, "Subject is required") {
            require_min_length(
                &mut errors,
                "subject",
                &self.subject,
                MIN_SUBJECT_LENGTH,
                &format!("Subject must be at least {MIN_SUBJECT_LENGTH} characters"),
            );
        }

        if require(&mut errors, "description", &self.description, "Description is required") {
            require_min_length(
                &mut errors,
                "description",
                &self.description,
                MIN_DESCRIPTION_LENGTH,
                &format!("Description must be at least {MIN_DESCRIPTION_LENGTH} characters"),
            );
        }

        errors
    }

    pub fn to_request(&self) -> NewTicket {
        fn optional(value: &str) -> Option<String> {
            (!is_blank(value)).then(|| value.trim().to_string())
        }

        NewTicket {
            client_name: self.client_name.trim().to_string(),
            client_email: self.client_email.trim().to_string(),
            client_phone: optional(&self.client_phone),
            subject: self.subject.clone(),
            description: self.description.clone(),
            priority: self.priority,
            category: Some(self.category),
            department: optional(&self.department),
        }
    }

    /// Validate and, only if valid, create the ticket. The form resets to
    /// its defaults after a successful create.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<Ticket> {
        self.error = None;
        if !self.validate() {
            return Err(TickkkError::Validation(self.errors.clone()));
        }

        match api.create_ticket(&self.to_request()).await {
            Ok(ticket) => {
                tracing::info!("Created ticket #{}", ticket.id);
                *self = Self::default();
                Ok(ticket)
            }
            Err(e) => {
                tracing::error!("Error creating ticket: {e}");
                self.error = Some(CREATE_ERROR_MESSAGE.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> NewTicketForm {
        NewTicketForm {
            client_name: "Ana Pérez".to_string(),
            client_email: "ana@example.com".to_string(),
            subject: "No puedo acceder".to_string(),
            description: "El portal devuelve un error al iniciar sesión".to_string(),
            ..NewTicketForm::default()
        }
    }

    #[test]
    fn test_defaults() {
        let form = NewTicketForm::new();
        assert_eq!(form.priority, TicketPriority::Media);
        assert_eq!(form.category, TicketCategory::Tecnico);
    }

    #[test]
    fn test_valid_form_passes() {
        let mut form = valid();
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_short_subject_and_description() {
        let mut form = valid();
        form.subject = "Corto".to_string();
        form.description = "Muy corto".to_string();
        assert!(!form.validate());
        assert!(form.errors().contains("subject"));
        assert!(form.errors().contains("description"));
        assert_eq!(form.errors().len(), 2);
    }

    #[test]
    fn test_email_shape_and_required() {
        let mut form = valid();
        form.client_email = "ana@example".to_string();
        assert!(!form.validate());
        assert_eq!(form.errors().get("client_email"), Some("Email is not valid"));

        form.client_email = " ".to_string();
        assert!(!form.validate());
        assert_eq!(form.errors().get("client_email"), Some("Email is required"));
    }

    #[test]
    fn test_phone_optional_but_checked() {
        let mut form = valid();
        form.client_phone = "12".to_string();
        assert!(!form.validate());
        assert!(form.errors().contains("client_phone"));

        form.client_phone = "+57 300 123 4567".to_string();
        assert!(form.validate());
    }

    #[test]
    fn test_touch_clears_field_error() {
        let mut form = NewTicketForm::new();
        assert!(!form.validate());
        assert!(form.errors().contains("client_name"));
        form.touch("client_name");
        assert!(!form.errors().contains("client_name"));
    }

    #[test]
    fn test_request_drops_blank_optionals() {
        let mut form = valid();
        form.department = "  ".to_string();
        let request = form.to_request();
        assert!(request.client_phone.is_none());
        assert!(request.department.is_none());
        assert_eq!(request.category, Some(TicketCategory::Tecnico));
    }
}
