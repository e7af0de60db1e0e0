use application::service::UpdateUserService;
use axum::extract::{Path, State};
use axum::routing::put;
use axum::Router;
use uuid::Uuid;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extract::Authenticated;
use crate::handler::AppModule;
use crate::request::{PromoteUserRequest, UserTransformer};
use crate::response::UserPresenter;

pub trait AdminRouter {
    fn route_admin(self) -> Self;
}

impl AdminRouter for Router<AppModule> {
    fn route_admin(self) -> Self {
        self.route(
            "/admin/promote/:id",
            put(
                |State(module): State<AppModule>,
                 Authenticated(session): Authenticated,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(PromoteUserRequest::new(id))
                        .handle(|dto| async move { module.promote_user(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
