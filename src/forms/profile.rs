use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::profile::NewProfile;
use crate::forms::categories::{CategoryFormError, ImageForm, ImageUpload};
use crate::forms::sanitize_inline_text;

const FULL_NAME_MAX_LEN: usize = 128;
const FULL_NAME_MAX_LEN_VALIDATOR: u64 = FULL_NAME_MAX_LEN as u64;

/// Phone numbers are stored as at most ten digits.
const PHONE_MAX_LEN: usize = 10;

pub type ProfileFormResult<T> = Result<T, ProfileFormError>;

#[derive(Debug, Error)]
pub enum ProfileFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("full name cannot be empty")]
    EmptyFullName,
    #[error("phone must contain at most {PHONE_MAX_LEN} digits")]
    InvalidPhone,
    #[error(transparent)]
    Image(#[from] CategoryFormError),
}

/// JSON payload used to update the profile of the signed-in user.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[validate(length(min = 1, max = FULL_NAME_MAX_LEN_VALIDATOR))]
    pub full_name: String,
    /// Contact email; the account email is used when omitted.
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl ProfileForm {
    /// Builds the profile of `subject`, falling back to `account_email`.
    pub fn into_new_profile(
        self,
        subject: &str,
        account_email: &str,
    ) -> ProfileFormResult<NewProfile> {
        self.validate()?;

        let full_name = sanitize_inline_text(&self.full_name);
        if full_name.is_empty() {
            return Err(ProfileFormError::EmptyFullName);
        }

        let email = self
            .email
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty())
            .unwrap_or_else(|| account_email.to_string());

        let mut profile = NewProfile::new(subject, full_name, email);
        if let Some(phone) = normalize_phone(self.phone.as_deref())? {
            profile = profile.with_phone(phone);
        }

        Ok(profile)
    }
}

/// Strips separators and checks the remaining digits.
fn normalize_phone(raw: Option<&str>) -> ProfileFormResult<Option<String>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let digits: String = raw
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '-' | '(' | ')'))
        .collect();

    if digits.is_empty() {
        return Ok(None);
    }

    if digits.len() > PHONE_MAX_LEN || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ProfileFormError::InvalidPhone);
    }

    Ok(Some(digits))
}

/// JSON payload used to replace the avatar of the signed-in user.
#[derive(Debug, Deserialize)]
pub struct AvatarForm {
    #[serde(flatten)]
    pub image: ImageForm,
}

impl AvatarForm {
    pub fn into_upload(self) -> ProfileFormResult<ImageUpload> {
        Ok(self.image.into_upload()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(phone: Option<&str>) -> ProfileForm {
        ProfileForm {
            full_name: " Jane   Doe ".to_string(),
            email: None,
            phone: phone.map(str::to_string),
        }
    }

    #[test]
    fn profile_form_uses_account_email_by_default() {
        let profile = form(None)
            .into_new_profile("user-1", "jane@example.com")
            .expect("expected conversion");

        assert_eq!(profile.full_name, "Jane Doe");
        assert_eq!(profile.email, "jane@example.com");
        assert_eq!(profile.phone, None);
    }

    #[test]
    fn profile_form_normalizes_phone() {
        let profile = form(Some("(912) 345-67-89"))
            .into_new_profile("user-1", "jane@example.com")
            .expect("expected conversion");

        assert_eq!(profile.phone.as_deref(), Some("9123456789"));
    }

    #[test]
    fn profile_form_rejects_long_phone() {
        let result = form(Some("+7 912 345 67 89")).into_new_profile("user-1", "jane@example.com");

        assert!(matches!(result, Err(ProfileFormError::InvalidPhone)));
    }

    #[test]
    fn avatar_form_reads_flat_json() {
        let form: AvatarForm = serde_json::from_str(r#"{"fileName": "me.png", "alt": "Me"}"#)
            .expect("expected valid json");

        let upload = form.into_upload().expect("expected conversion");

        assert_eq!(upload.file_name, "me.png");
    }
}
