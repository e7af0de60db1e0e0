use application::service::{
    CreateCourseService, DeleteCourseService, EnrollmentService, GetCourseService,
    UpdateCourseService,
};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extract::{Authenticated, OptionalJson};
use crate::handler::AppModule;
use crate::request::{
    CourseTransformer, CreateCourseRequest, DeleteCourseRequest, EnrollRequest,
    EnrollmentTransformer, GetAllCourseRequest, GetCourseRequest, UpdateCourseRequest,
};
use crate::response::{CoursePresenter, EnrollmentPresenter};

pub trait CourseRouter {
    fn route_course(self) -> Self;
}

impl CourseRouter for Router<AppModule> {
    fn route_course(self) -> Self {
        self.route(
            "/courses",
            get(
                |State(module): State<AppModule>,
                 Authenticated(session): Authenticated,
                 Query(req): Query<GetAllCourseRequest>| async move {
                    Controller::new(CourseTransformer, CoursePresenter)
                        .intake(req)
                        .handle(|dto| async move { module.get_courses(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 Authenticated(session): Authenticated,
                 Json(req): Json<CreateCourseRequest>| async move {
                    Controller::new(CourseTransformer, CoursePresenter)
                        .intake(req)
                        .handle(|dto| async move { module.create_course(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/courses/:id",
            get(
                |State(module): State<AppModule>,
                 Authenticated(session): Authenticated,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(CourseTransformer, CoursePresenter)
                        .intake(GetCourseRequest::new(id))
                        .handle(|dto| async move { module.get_course(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .and_then(|found| found)
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 Authenticated(session): Authenticated,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateCourseRequest>| async move {
                    Controller::new(CourseTransformer, CoursePresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.update_course(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 Authenticated(session): Authenticated,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(CourseTransformer, CoursePresenter)
                        .intake(DeleteCourseRequest::new(id))
                        .handle(|dto| async move { module.delete_course(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/courses/:id/roster",
            get(
                |State(module): State<AppModule>,
                 Authenticated(session): Authenticated,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(CourseTransformer, CoursePresenter)
                        .intake(GetCourseRequest::new(id))
                        .handle(|dto| async move { module.get_roster(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/courses/:id/register",
            post(
                |State(module): State<AppModule>,
                 Authenticated(session): Authenticated,
                 Path(id): Path<Uuid>,
                 OptionalJson(req): OptionalJson<EnrollRequest>| async move {
                    Controller::new(EnrollmentTransformer, EnrollmentPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.register(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/courses/:id/unregister",
            post(
                |State(module): State<AppModule>,
                 Authenticated(session): Authenticated,
                 Path(id): Path<Uuid>,
                 OptionalJson(req): OptionalJson<EnrollRequest>| async move {
                    Controller::new(EnrollmentTransformer, EnrollmentPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.unregister(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
