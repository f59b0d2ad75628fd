use contacts_types::{
    is_loose_email, Contact, NewContact, INVALID_EMAIL_MESSAGE, REQUIRED_FIELDS_MESSAGE,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::entities::ContactRecord;
use crate::error::ServerError;

/// Body of `POST /api/contacts`.
///
/// Fields are optional at the serde layer so a missing field reaches
/// validation (and the documented 400 message) instead of failing
/// deserialization. Unknown fields, including any client-supplied `id` or
/// `createdAt`, are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateContactRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl CreateContactRequest {
    /// Check required fields (and, when `strict_email` is set, the email
    /// shape), yielding the candidate record to persist.
    pub fn into_new_contact(self, strict_email: bool) -> Result<NewContact, ServerError> {
        if self.validate().is_err() {
            return Err(ServerError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_owned()));
        }
        let email = self.email.unwrap_or_default();
        if strict_email && !is_loose_email(&email) {
            return Err(ServerError::BadRequest(INVALID_EMAIL_MESSAGE.to_owned()));
        }
        Ok(NewContact {
            name: self.name.unwrap_or_default(),
            email,
            phone: self.phone.unwrap_or_default(),
            message: self.message.filter(|m| !m.is_empty()),
        })
    }
}

impl ContactRecord {
    pub fn to_response(&self) -> Contact {
        Contact {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            message: self.message.clone(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn request(name: &str, email: &str, phone: &str) -> CreateContactRequest {
        CreateContactRequest {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
            message: None,
        }
    }

    fn rejection_message(result: Result<NewContact, ServerError>) -> String {
        match result {
            Err(ServerError::BadRequest(m)) => m,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn complete_request_passes() {
        let c = request("Alex Chen", "alex@example.com", "555-0100")
            .into_new_contact(false)
            .unwrap();
        assert_eq!(c.name, "Alex Chen");
        assert_eq!(c.message, None);
    }

    #[test]
    fn empty_or_missing_required_field_is_rejected() {
        let cases = [
            request("", "a@b.com", "555"),
            request("A", "", "555"),
            request("A", "a@b.com", ""),
            CreateContactRequest {
                name: None,
                ..request("A", "a@b.com", "555")
            },
            CreateContactRequest::default(),
        ];
        for case in cases {
            assert_eq!(
                rejection_message(case.into_new_contact(false)),
                REQUIRED_FIELDS_MESSAGE
            );
        }
    }

    #[test]
    fn message_is_not_required_and_empty_means_absent() {
        let mut r = request("A", "a@b.com", "555");
        r.message = Some(String::new());
        assert_eq!(r.into_new_contact(false).unwrap().message, None);

        let mut r = request("A", "a@b.com", "555");
        r.message = Some("hi".into());
        assert_eq!(r.into_new_contact(false).unwrap().message.as_deref(), Some("hi"));
    }

    #[test]
    fn email_shape_only_checked_in_strict_mode() {
        assert!(request("A", "not-an-email", "555").into_new_contact(false).is_ok());
        assert_eq!(
            rejection_message(request("A", "not-an-email", "555").into_new_contact(true)),
            INVALID_EMAIL_MESSAGE
        );
    }

    #[test]
    fn client_supplied_identity_is_ignored() {
        let r: CreateContactRequest = serde_json::from_str(
            r#"{"id":"mine","createdAt":"1999-01-01T00:00:00Z","name":"A","email":"a@b.c","phone":"1"}"#,
        )
        .unwrap();
        assert!(r.into_new_contact(false).is_ok());
    }
}
