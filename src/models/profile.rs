use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::profile::{NewProfile as DomainNewProfile, Profile as DomainProfile};
use crate::models::image::Avatar;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct Profile {
    pub id: i32,
    pub subject: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(treat_none_as_null = true)]
pub struct NewProfile<'a> {
    pub subject: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<(Profile, Option<Avatar>)> for DomainProfile {
    fn from((profile, avatar): (Profile, Option<Avatar>)) -> Self {
        Self {
            id: profile.id,
            subject: profile.subject,
            full_name: profile.full_name,
            email: profile.email,
            phone: profile.phone,
            avatar: avatar.map(Into::into),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProfile> for NewProfile<'a> {
    fn from(value: &'a DomainNewProfile) -> Self {
        Self {
            subject: value.subject.as_str(),
            full_name: value.full_name.as_str(),
            email: value.email.as_str(),
            phone: value.phone.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
