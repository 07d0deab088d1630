use axum::extract::{Path, Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use application::service::{
    CreateBikeService, DeleteBikeService, GetBikeService, UpdateBikeService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extract::CurrentUser;
use crate::handler::AppModule;
use crate::request::{
    BikeTransformer, CreateBikeRequest, DeleteBikeRequest, GetBikeRequest, PageRequest,
    UpdateBikeRequest,
};
use crate::response::BikePresenter;

pub trait BikeRouter {
    fn route_bike(self) -> Self;
}

impl BikeRouter for Router<AppModule> {
    fn route_bike(self) -> Self {
        self.route(
            "/v1/bikes",
            get(
                |State(handler): State<AppModule>,
                 CurrentUser(_): CurrentUser,
                 WithRejection(Query(req), _): WithRejection<Query<PageRequest>, ErrorStatus>| async move {
                    Controller::new(BikeTransformer, BikePresenter)
                        .intake(req)
                        .handle(|dto| async move { handler.get_all_bikes(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/v1/bikes/:id",
            get(
                |State(handler): State<AppModule>,
                 CurrentUser(_): CurrentUser,
                 WithRejection(Path(id), _): WithRejection<Path<Uuid>, ErrorStatus>| async move {
                    Controller::new(BikeTransformer, BikePresenter)
                        .intake(GetBikeRequest::new(id))
                        .handle(|dto| async move { handler.get_bike(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/v1/admin/bikes",
            post(
                |State(handler): State<AppModule>,
                 CurrentUser(user): CurrentUser,
                 WithRejection(Json(req), _): WithRejection<Json<CreateBikeRequest>, ErrorStatus>| async move {
                    Controller::new(BikeTransformer, BikePresenter)
                        .intake(req)
                        .handle(|dto| async move { handler.create_bike(&user, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/v1/admin/bikes/:id",
            put(
                |State(handler): State<AppModule>,
                 CurrentUser(user): CurrentUser,
                 WithRejection(Path(id), _): WithRejection<Path<Uuid>, ErrorStatus>,
                 WithRejection(Json(req), _): WithRejection<Json<UpdateBikeRequest>, ErrorStatus>| async move {
                    Controller::new(BikeTransformer, BikePresenter)
                        .intake((id, req))
                        .handle(|dto| async move { handler.update_bike(&user, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(handler): State<AppModule>,
                 CurrentUser(user): CurrentUser,
                 WithRejection(Path(id), _): WithRejection<Path<Uuid>, ErrorStatus>| async move {
                    Controller::new(BikeTransformer, BikePresenter)
                        .intake(DeleteBikeRequest::new(id))
                        .handle(|dto| async move { handler.delete_bike(&user, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
