mod email;
mod id;
mod name;
mod role;
mod status;

pub use self::{email::*, id::*, name::*, role::*, status::*};
use crate::KernelError;
use destructure::Destructure;
use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct User {
    id: UserId,
    name: UserName,
    email: UserEmail,
    role: UserRole,
    status: UserStatus,
}

impl User {
    pub fn new(
        id: UserId,
        name: UserName,
        email: UserEmail,
        role: UserRole,
        status: UserStatus,
    ) -> Self {
        Self {
            id,
            name,
            email,
            role,
            status,
        }
    }

    pub fn is_admin(&self) -> bool {
        match self.role {
            UserRole::Admin => true,
            UserRole::Default => false,
        }
    }

    pub fn ensure_active(&self) -> error_stack::Result<(), KernelError> {
        match self.status {
            UserStatus::Active => Ok(()),
            UserStatus::Inactive => {
                Err(Report::new(KernelError::Forbidden).attach_printable("user is inactive"))
            }
        }
    }

    pub fn ensure_admin(&self) -> error_stack::Result<(), KernelError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(Report::new(KernelError::Forbidden)
                .attach_printable("access to this resource is forbidden"))
        }
    }

    /// Owner-or-admin rule for resources that belong to `owner`.
    pub fn ensure_owner_or_admin(&self, owner: &UserId) -> error_stack::Result<(), KernelError> {
        if self.is_admin() || &self.id == owner {
            Ok(())
        } else {
            Err(Report::new(KernelError::Forbidden)
                .attach_printable("access to this resource is forbidden"))
        }
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use super::{User, UserEmail, UserId, UserName, UserRole, UserStatus};
    use crate::KernelError;

    fn user(role: UserRole, status: UserStatus) -> User {
        User::new(
            UserId::new(Uuid::new_v4()),
            UserName::new("rider"),
            UserEmail::new("rider@example.com"),
            role,
            status,
        )
    }

    #[test]
    fn owner_or_admin() {
        let owner = user(UserRole::Default, UserStatus::Active);
        let other = user(UserRole::Default, UserStatus::Active);
        let admin = user(UserRole::Admin, UserStatus::Active);

        assert!(owner.ensure_owner_or_admin(owner.id()).is_ok());
        assert!(admin.ensure_owner_or_admin(owner.id()).is_ok());
        let report = other.ensure_owner_or_admin(owner.id()).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Forbidden);
    }

    #[test]
    fn admin_only() {
        assert!(user(UserRole::Admin, UserStatus::Active)
            .ensure_admin()
            .is_ok());
        assert!(user(UserRole::Default, UserStatus::Active)
            .ensure_admin()
            .is_err());
    }

    #[test]
    fn inactive_user_is_forbidden() {
        let report = user(UserRole::Admin, UserStatus::Inactive)
            .ensure_active()
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Forbidden);
    }
}
