use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::image::Image;

/// Storefront profile of a signed-in customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Unique identifier of the profile.
    pub id: i32,
    /// Subject of the authenticated user owning the profile.
    pub subject: String,
    /// Full name used for deliveries.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Optional ten-digit phone number, unique across profiles.
    pub phone: Option<String>,
    /// Optional avatar.
    pub avatar: Option<Image>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload used to create or replace the profile of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub subject: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProfile {
    pub fn new(
        subject: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            full_name: full_name.into(),
            email: email.into(),
            phone: None,
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}
