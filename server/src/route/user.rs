use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Router;
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use application::service::GetUserService;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extract::CurrentUser;
use crate::handler::AppModule;
use crate::request::{GetUserRequest, PageRequest, UserTransformer};
use crate::response::UserPresenter;

pub trait UserRouter {
    fn route_user(self) -> Self;
}

impl UserRouter for Router<AppModule> {
    fn route_user(self) -> Self {
        self.route(
            "/v1/users/:id",
            get(
                |State(handler): State<AppModule>,
                 CurrentUser(user): CurrentUser,
                 WithRejection(Path(id), _): WithRejection<Path<Uuid>, ErrorStatus>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(GetUserRequest::new(id))
                        .handle(|dto| async move { handler.get_user(&user, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/v1/admin/users",
            get(
                |State(handler): State<AppModule>,
                 CurrentUser(user): CurrentUser,
                 WithRejection(Query(req), _): WithRejection<Query<PageRequest>, ErrorStatus>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(req)
                        .handle(|dto| async move { handler.get_all_users(&user, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
