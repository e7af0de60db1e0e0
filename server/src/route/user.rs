use application::service::{DeleteUserService, GetUserService, UpdateUserService};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extract::Authenticated;
use crate::handler::AppModule;
use crate::request::{
    DeleteUserRequest, GetUserRequest, SearchUserRequest, UpdateProfileRequest, UserTransformer,
};
use crate::response::UserPresenter;

pub trait UserRouter {
    fn route_user(self) -> Self;
}

impl UserRouter for Router<AppModule> {
    fn route_user(self) -> Self {
        self.route(
            "/users",
            get(
                |State(module): State<AppModule>,
                 Authenticated(session): Authenticated,
                 Query(req): Query<SearchUserRequest>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.search_users(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id",
            get(
                |State(module): State<AppModule>,
                 Authenticated(session): Authenticated,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(GetUserRequest::new(id))
                        .handle(|dto| async move { module.get_user(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .and_then(|found| found)
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 Authenticated(session): Authenticated,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateProfileRequest>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.update_profile(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 Authenticated(session): Authenticated,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(DeleteUserRequest::new(id))
                        .handle(|dto| async move { module.delete_user(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id/courses",
            get(
                |State(module): State<AppModule>,
                 Authenticated(session): Authenticated,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(GetUserRequest::new(id))
                        .handle(|dto| async move { module.get_user_courses(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
