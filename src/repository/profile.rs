use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::image::{Image as DomainImage, NewImage as DomainNewImage};
use crate::domain::profile::{NewProfile as DomainNewProfile, Profile as DomainProfile};
use crate::models::image::{Avatar as DbAvatar, NewAvatar};
use crate::models::profile::{NewProfile as DbNewProfile, Profile as DbProfile};
use crate::repository::{DieselRepository, ProfileReader, ProfileWriter};

impl ProfileReader for DieselRepository {
    fn get_profile_by_subject(&self, subject: &str) -> RepositoryResult<Option<DomainProfile>> {
        use crate::schema::{avatars, profiles};

        let mut conn = self.conn()?;

        let profile = profiles::table
            .left_join(avatars::table)
            .filter(profiles::subject.eq(subject))
            .first::<(DbProfile, Option<DbAvatar>)>(&mut conn)
            .optional()?;

        Ok(profile.map(DomainProfile::from))
    }

    fn get_profile_by_phone(&self, phone: &str) -> RepositoryResult<Option<DomainProfile>> {
        use crate::schema::{avatars, profiles};

        let mut conn = self.conn()?;

        let profile = profiles::table
            .left_join(avatars::table)
            .filter(profiles::phone.eq(phone))
            .first::<(DbProfile, Option<DbAvatar>)>(&mut conn)
            .optional()?;

        Ok(profile.map(DomainProfile::from))
    }
}

impl ProfileWriter for DieselRepository {
    fn save_profile(&self, profile: &DomainNewProfile) -> RepositoryResult<DomainProfile> {
        use crate::schema::{avatars, profiles};

        let mut conn = self.conn()?;
        let row = DbNewProfile::from(profile);

        conn.transaction::<DomainProfile, RepositoryError, _>(|conn| {
            let saved = diesel::insert_into(profiles::table)
                .values(&row)
                .on_conflict(profiles::subject)
                .do_update()
                .set(&row)
                .get_result::<DbProfile>(conn)?;

            let avatar = avatars::table
                .filter(avatars::profile_id.eq(saved.id))
                .first::<DbAvatar>(conn)
                .optional()?;

            Ok(DomainProfile::from((saved, avatar)))
        })
    }

    fn set_avatar(&self, avatar: &DomainNewImage) -> RepositoryResult<DomainImage> {
        use crate::schema::avatars;

        let mut conn = self.conn()?;
        let row = NewAvatar::from(avatar);

        let saved = diesel::insert_into(avatars::table)
            .values(&row)
            .on_conflict(avatars::profile_id)
            .do_update()
            .set(&row)
            .get_result::<DbAvatar>(&mut conn)?;

        Ok(saved.into())
    }
}
