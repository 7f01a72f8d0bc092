use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::image::{NewImage, avatar_image_path};
use crate::forms::profile::{AvatarForm, ProfileForm};
use crate::repository::{ProfileReader, ProfileWriter};
use crate::services::projections::ProfileView;
use crate::services::{ServiceError, ServiceResult};

/// Loads the profile of the signed-in user.
///
/// Users who never saved a profile get one prefilled from their account.
pub fn load_profile<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ProfileView>
where
    R: ProfileReader + ?Sized,
{
    let profile = repo
        .get_profile_by_subject(&user.sub)
        .map_err(ServiceError::from)?;

    Ok(match profile {
        Some(profile) => ProfileView::from(&profile),
        None => ProfileView {
            full_name: user.name.clone(),
            email: user.email.clone(),
            phone: None,
            avatar: None,
        },
    })
}

/// Creates or replaces the profile of the signed-in user.
pub fn save_profile<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProfileForm,
) -> ServiceResult<ProfileView>
where
    R: ProfileReader + ProfileWriter + ?Sized,
{
    let new_profile = form
        .into_new_profile(&user.sub, &user.email)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if let Some(phone) = new_profile.phone.as_deref() {
        let taken = repo
            .get_profile_by_phone(phone)
            .map_err(ServiceError::from)?
            .is_some_and(|owner| owner.subject != user.sub);
        if taken {
            return Err(ServiceError::Conflict);
        }
    }

    let saved = repo
        .save_profile(&new_profile)
        .map_err(ServiceError::from)?;

    Ok(ProfileView::from(&saved))
}

/// Replaces the avatar of the signed-in user.
///
/// The profile must exist before an avatar can be attached.
pub fn save_avatar<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AvatarForm,
) -> ServiceResult<ProfileView>
where
    R: ProfileReader + ProfileWriter + ?Sized,
{
    let upload = form
        .into_upload()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let mut profile = repo
        .get_profile_by_subject(&user.sub)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let avatar = NewImage::new(
        profile.id,
        avatar_image_path(profile.id, &upload.file_name),
        upload.alt,
    );
    profile.avatar = Some(repo.set_avatar(&avatar).map_err(ServiceError::from)?);

    Ok(ProfileView::from(&profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::image::Image;
    use crate::domain::profile::Profile;
    use crate::forms::categories::ImageForm;
    use crate::repository::mock::MockShopRepository;

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user-1".to_string(),
            email: "jane@example.com".to_string(),
            hub_id: 1,
            name: "Jane".to_string(),
            roles: Vec::new(),
            exp: 0,
        }
    }

    fn profile(subject: &str, phone: Option<&str>) -> Profile {
        Profile {
            id: 4,
            subject: subject.to_string(),
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: phone.map(str::to_string),
            avatar: None,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn form(phone: Option<&str>) -> ProfileForm {
        ProfileForm {
            full_name: "Jane Doe".to_string(),
            email: None,
            phone: phone.map(str::to_string),
        }
    }

    #[test]
    fn load_profile_falls_back_to_account() {
        let mut repo = MockShopRepository::new();
        repo.expect_get_profile_by_subject().returning(|_| Ok(None));

        let view = load_profile(&repo, &user()).expect("profile");

        assert_eq!(view.full_name, "Jane");
        assert_eq!(view.email, "jane@example.com");
    }

    #[test]
    fn save_profile_rejects_phone_of_another_user() {
        let mut repo = MockShopRepository::new();
        repo.expect_get_profile_by_phone()
            .returning(|phone| Ok(Some(profile("user-2", Some(phone)))));
        repo.expect_save_profile().never();

        let result = save_profile(&repo, &user(), form(Some("9123456789")));

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn save_profile_keeps_own_phone() {
        let mut repo = MockShopRepository::new();
        repo.expect_get_profile_by_phone()
            .returning(|phone| Ok(Some(profile("user-1", Some(phone)))));
        repo.expect_save_profile()
            .withf(|payload| payload.subject == "user-1")
            .times(1)
            .returning(|payload| Ok(profile(&payload.subject, payload.phone.as_deref())));

        let view = save_profile(&repo, &user(), form(Some("9123456789"))).expect("saved");

        assert_eq!(view.phone.as_deref(), Some("9123456789"));
    }

    #[test]
    fn save_avatar_requires_profile() {
        let mut repo = MockShopRepository::new();
        repo.expect_get_profile_by_subject().returning(|_| Ok(None));
        repo.expect_set_avatar().never();

        let avatar = AvatarForm {
            image: ImageForm {
                file_name: "me.png".to_string(),
                alt: String::new(),
            },
        };
        let result = save_avatar(&repo, &user(), avatar);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn save_avatar_stores_under_profile_path() {
        let mut repo = MockShopRepository::new();
        repo.expect_get_profile_by_subject()
            .returning(|subject| Ok(Some(profile(subject, None))));
        repo.expect_set_avatar()
            .withf(|image| image.path == "avatars/user_4/me.png")
            .times(1)
            .returning(|image| {
                Ok(Image {
                    id: 2,
                    owner_id: image.owner_id,
                    path: image.path.clone(),
                    alt: image.alt.clone(),
                })
            });

        let avatar = AvatarForm {
            image: ImageForm {
                file_name: "me.png".to_string(),
                alt: "Me".to_string(),
            },
        };
        let view = save_avatar(&repo, &user(), avatar).expect("avatar");

        assert_eq!(
            view.avatar.map(|avatar| avatar.src),
            Some("/avatars/user_4/me.png".to_string())
        );
    }
}
