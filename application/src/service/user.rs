use error_stack::Report;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::prelude::entity::{User, UserId};
use kernel::KernelError;

use crate::transfer::{GetUserDto, PageDto, SelectDto, UserDto};

#[async_trait::async_trait]
pub trait GetUserService: 'static + Sync + Send + DependOnUserQuery {
    async fn get_user(
        &self,
        requester: &User,
        dto: GetUserDto,
    ) -> error_stack::Result<UserDto, KernelError> {
        let id = UserId::new(dto.id);
        requester.ensure_owner_or_admin(&id)?;

        let mut connection = self.database_connection().transact().await?;
        let user = self
            .user_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound).attach_printable("user not found"))?;

        Ok(UserDto::from(user))
    }

    async fn get_all_users(
        &self,
        requester: &User,
        dto: SelectDto,
    ) -> error_stack::Result<PageDto<UserDto>, KernelError> {
        requester.ensure_admin()?;

        let mut connection = self.database_connection().transact().await?;
        let page = self
            .user_query()
            .find_all(&mut connection, &dto.limit, &dto.page)
            .await?;
        Ok(PageDto::from(page))
    }
}

impl<T> GetUserService for T where T: DependOnUserQuery {}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::prelude::entity::{SelectLimit, SelectPage, UserStatus};
    use kernel::KernelError;

    use crate::memory::MemoryModule;
    use crate::service::GetUserService;
    use crate::transfer::{GetUserDto, SelectDto};

    #[tokio::test]
    async fn users_see_themselves_only() {
        let module = MemoryModule::default();
        let rider = module.seed_user(false, UserStatus::Active).await;
        let other = module.seed_user(false, UserStatus::Active).await;
        let admin = module.seed_user(true, UserStatus::Active).await;

        let me = module
            .get_user(
                &rider,
                GetUserDto {
                    id: rider.id().clone().into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(&me.id, rider.id().as_ref());

        let report = module
            .get_user(
                &other,
                GetUserDto {
                    id: rider.id().clone().into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Forbidden);

        let report = module
            .get_user(&admin, GetUserDto { id: Uuid::new_v4() })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
    }

    #[tokio::test]
    async fn listing_users_is_admin_only() {
        let module = MemoryModule::default();
        let rider = module.seed_user(false, UserStatus::Active).await;
        let admin = module.seed_user(true, UserStatus::Active).await;
        let select = || SelectDto {
            limit: SelectLimit::default(),
            page: SelectPage::default(),
        };

        let page = module.get_all_users(&admin, select()).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.limit, 10);

        let report = module.get_all_users(&rider, select()).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Forbidden);
    }
}
