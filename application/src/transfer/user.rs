use uuid::Uuid;

use kernel::prelude::entity::{DestructUser, User, UserRole, UserStatus};

#[derive(Debug, Clone)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            name,
            email,
            role,
            status,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            status,
        }
    }
}

pub struct GetUserDto {
    pub id: Uuid,
}

/// Bearer credential presented by the caller.
pub struct AuthenticateDto {
    pub token: String,
}
