use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use application::service::{CreateRentalService, GetRentalService, ReturnRentalService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extract::CurrentUser;
use crate::handler::AppModule;
use crate::request::{
    GetRentalsRequest, PageRequest, RentBikeRequest, RentalTransformer, ReturnBikeRequest,
};
use crate::response::RentalPresenter;

pub trait RentalRouter {
    fn route_rental(self) -> Self;
}

impl RentalRouter for Router<AppModule> {
    fn route_rental(self) -> Self {
        self.route(
            "/v1/rentals/rent/:bike_id",
            post(
                |State(handler): State<AppModule>,
                 CurrentUser(user): CurrentUser,
                 WithRejection(Path(bike_id), _): WithRejection<Path<Uuid>, ErrorStatus>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake(RentBikeRequest::new(bike_id))
                        .handle(|dto| async move { handler.create_rental(&user, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/v1/rentals/return/:rental_id",
            post(
                |State(handler): State<AppModule>,
                 CurrentUser(user): CurrentUser,
                 WithRejection(Path(rental_id), _): WithRejection<Path<Uuid>, ErrorStatus>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake(ReturnBikeRequest::new(rental_id))
                        .handle(|dto| async move { handler.return_bike(&user, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/v1/rentals/:user_id",
            get(
                |State(handler): State<AppModule>,
                 CurrentUser(user): CurrentUser,
                 WithRejection(Path(user_id), _): WithRejection<Path<Uuid>, ErrorStatus>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake(GetRentalsRequest::new(user_id))
                        .handle(|dto| async move { handler.get_rentals_by_user(&user, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/v1/admin/rentals",
            get(
                |State(handler): State<AppModule>,
                 CurrentUser(user): CurrentUser,
                 WithRejection(Query(req), _): WithRejection<Query<PageRequest>, ErrorStatus>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake(req)
                        .handle(|dto| async move { handler.get_all_rentals(&user, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
