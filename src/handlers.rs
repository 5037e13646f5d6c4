use axum::{
    extract::State,
    http::{header::LOCATION, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use sqlx::SqlitePool;

use crate::{
    data_formats::{ArticleResponse, CreateArticleRequest, UpdateArticleRequest},
    db_helpers::{
        create_article_in_db, delete_article_in_db, get_article_by_id_in_db, list_articles_in_db,
        update_article_in_db,
    },
    errors::{RequestError, RequestErrorJsonWrapper},
    extractors::{ArticleId, ArticleJson},
    JsonResponse,
};

type JsonResult<T> = Result<Json<T>, RequestError>;

// ----------------- Helper Handlers -----------------
pub async fn hello() -> &'static str {
    "Hello, world!"
}

pub async fn not_found(uri: Uri) -> JsonResponse<RequestErrorJsonWrapper> {
    (
        StatusCode::NOT_FOUND,
        Json(RequestErrorJsonWrapper::new(&format!(
            "URL {} provided was not found",
            uri
        ))),
    )
}

// ----------------- Article Handlers -----------------
pub async fn list_articles(State(pool): State<SqlitePool>) -> JsonResult<Vec<ArticleResponse>> {
    let articles = list_articles_in_db(&pool)
        .await?
        .into_iter()
        .map(ArticleResponse::from)
        .collect();
    Ok(Json(articles))
}

pub async fn get_article(
    State(pool): State<SqlitePool>,
    ArticleId(id): ArticleId,
) -> JsonResult<ArticleResponse> {
    match get_article_by_id_in_db(&pool, id).await? {
        Some(article) => Ok(Json(ArticleResponse::new(article))),
        None => Err(RequestError::NotFound),
    }
}

pub async fn create_article(
    State(pool): State<SqlitePool>,
    ArticleJson(request): ArticleJson<CreateArticleRequest>,
) -> Result<impl IntoResponse, RequestError> {
    let new_article = request.validate()?;
    let article = ArticleResponse::new(create_article_in_db(&pool, new_article).await?);
    tracing::info!(article_id = article.id, "article created");
    Ok((
        StatusCode::CREATED,
        [(LOCATION, article.location())],
        Json(article),
    ))
}

pub async fn update_article(
    State(pool): State<SqlitePool>,
    ArticleId(id): ArticleId,
    ArticleJson(request): ArticleJson<UpdateArticleRequest>,
) -> Result<StatusCode, RequestError> {
    if get_article_by_id_in_db(&pool, id).await?.is_none() {
        return Err(RequestError::NotFound);
    }
    update_article_in_db(&pool, id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_article(
    State(pool): State<SqlitePool>,
    ArticleId(id): ArticleId,
) -> Result<StatusCode, RequestError> {
    if get_article_by_id_in_db(&pool, id).await?.is_none() {
        return Err(RequestError::NotFound);
    }
    delete_article_in_db(&pool, id).await?;
    tracing::info!(article_id = id, "article deleted");
    Ok(StatusCode::NO_CONTENT)
}
