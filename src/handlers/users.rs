// src/handlers/users.rs
// DOCUMENTATION: HTTP handlers for back-office users
// PURPOSE: User CRUD; responses carry the resolved permission record

use crate::db::UserRepository;
use crate::errors::ApiError;
use crate::models::*;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

/// GET /api/user
pub async fn list_users(
    pool: web::Data<PgPool>,
    query: web::Query<UserListQuery>,
) -> Result<impl Responder, ApiError> {
    let users = UserRepository::list_users(pool.get_ref(), &query).await?;
    let responses: Vec<UserResponse> = users.iter().map(User::to_response).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// GET /api/user/{id}
pub async fn get_user(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let user = UserRepository::get_user(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}

/// POST /api/user
pub async fn create_user(
    pool: web::Data<PgPool>,
    req: web::Json<CreateUserRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let user = UserRepository::create_user(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(user.to_response()))
}

/// PUT /api/user/{id}
pub async fn update_user(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateUserRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let user = UserRepository::update_user(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}

/// DELETE /api/user/{id}
pub async fn delete_user(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    UserRepository::delete_user(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

/// Configuration for user routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/user")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}
