//! User database entity for SeaORM.

use std::collections::BTreeSet;

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use common::{AppError, AppResult};
use domain::{Address, Password, Profile, User, UserRole};

/// Separator for the role tags column
const ROLE_SEPARATOR: char = ',';

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub second_name: String,
    pub birth_date: Date,
    pub city: String,
    pub postal_code: String,
    pub street: String,
    /// Comma separated role tags
    pub roles: String,
    pub password_hash: String,
    pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_roles(raw: &str) -> AppResult<BTreeSet<UserRole>> {
    raw.split(ROLE_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| UserRole::try_from(tag).map_err(AppError::from))
        .collect()
}

fn join_roles(roles: &BTreeSet<UserRole>) -> String {
    roles
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(&ROLE_SEPARATOR.to_string())
}

/// Convert database model to domain aggregate.
///
/// A role tag the domain does not know is a data integrity fault.
impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        let roles = parse_roles(&model.roles)?;

        Ok(User::restore(
            model.id,
            model.username,
            Profile {
                email: model.email,
                first_name: model.first_name,
                second_name: model.second_name,
                birth_date: model.birth_date,
                address: Address {
                    city: model.city,
                    postal_code: model.postal_code,
                    street: model.street,
                },
            },
            roles,
            model.modified_at,
            Password::from_hash(model.password_hash),
        ))
    }
}

/// Convert domain aggregate to a fully set active model
impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        let address = user.address();
        ActiveModel {
            id: Set(user.id()),
            username: Set(user.username().to_string()),
            email: Set(user.email().to_string()),
            first_name: Set(user.first_name().to_string()),
            second_name: Set(user.second_name().to_string()),
            birth_date: Set(user.birth_date()),
            city: Set(address.city.clone()),
            postal_code: Set(address.postal_code.clone()),
            street: Set(address.street.clone()),
            roles: Set(join_roles(user.roles())),
            password_hash: Set(user.password().as_str().to_string()),
            modified_at: Set(user.modified_at()),
        }
    }
}

/// Active model for overwriting an existing row.
///
/// Username and roles are never changed by an update, so both stay unset.
pub fn update_model(user: &User) -> ActiveModel {
    ActiveModel {
        username: NotSet,
        roles: NotSet,
        ..ActiveModel::from(user)
    }
}
