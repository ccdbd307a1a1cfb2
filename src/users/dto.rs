use serde::Deserialize;

use crate::users::repo_types::UserChanges;
use crate::validation::{Validate, Violations};

#[derive(Debug, Deserialize)]
pub struct EditUserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Validate for EditUserRequest {
    fn normalize(&mut self) {
        if let Some(email) = self.email.as_mut() {
            *email = email.trim().to_lowercase();
        }
    }

    fn validate(&self, v: &mut Violations) {
        if let Some(email) = &self.email {
            v.email("email", email);
        }
    }
}

impl From<EditUserRequest> for UserChanges {
    fn from(req: EditUserRequest) -> Self {
        Self {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}
