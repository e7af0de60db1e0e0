use application::service::{LogInService, SignUpService};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{AuthTransformer, LogInRequest, SignUpRequest};
use crate::response::AuthPresenter;

pub trait AuthRouter {
    fn route_auth(self) -> Self;
}

impl AuthRouter for Router<AppModule> {
    fn route_auth(self) -> Self {
        self.route(
            "/auth/register",
            post(
                |State(module): State<AppModule>, Json(req): Json<SignUpRequest>| async move {
                    Controller::new(AuthTransformer, AuthPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.sign_up(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/auth/login",
            post(
                |State(module): State<AppModule>, Json(req): Json<LogInRequest>| async move {
                    Controller::new(AuthTransformer, AuthPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.log_in(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
