use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path},
    http::{header::CONTENT_TYPE, request::Parts, HeaderMap, Request},
    Json,
};

use crate::errors::RequestError;

/// The `:article_id` path segment. Anything that is not an integer cannot
/// name an article, so it is rejected as not found.
#[derive(Debug, Clone, Copy)]
pub struct ArticleId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ArticleId
where
    S: Send + Sync,
{
    type Rejection = RequestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| RequestError::NotFound)?;
        Ok(ArticleId(id))
    }
}

/// JSON body whose failures use the API's error envelope. A request that
/// does not declare a JSON body reads as an empty object.
#[derive(Debug)]
pub struct ArticleJson<T>(pub T);

#[async_trait]
impl<S, B, T> FromRequest<S, B> for ArticleJson<T>
where
    Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
    T: Default,
    S: Send + Sync,
    B: Send + 'static,
{
    type Rejection = RequestError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        if !declares_json(req.headers()) {
            return Ok(ArticleJson(T::default()));
        }
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ArticleJson(value)),
            Err(rejection) => Err(RequestError::BadRequest(rejection.body_text())),
        }
    }
}

fn declares_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let mime = value.split(';').next().unwrap_or_default().trim();
            mime.eq_ignore_ascii_case("application/json")
                || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}
