use std::any::Any;

use axum::{
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{config::Environment, JsonResponse};

const NOT_FOUND_MESSAGE: &str = "Article doesn't exist";
const SERVER_ERROR_MESSAGE: &str = "server error";

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Missing '{0}' in request body")]
    MissingField(&'static str),
    #[error("{0}")]
    BadRequest(String),
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,
    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("{0}")]
    ServerError(String),
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RequestErrorJsonWrapper {
    pub error: RequestErrorJson,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RequestErrorJson {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl RequestErrorJsonWrapper {
    pub fn new(message: &str) -> RequestErrorJsonWrapper {
        RequestErrorJsonWrapper {
            error: RequestErrorJson {
                message: message.to_string(),
                detail: None,
            },
        }
    }

    pub fn with_detail(message: &str, detail: String) -> RequestErrorJsonWrapper {
        RequestErrorJsonWrapper {
            error: RequestErrorJson {
                message: message.to_string(),
                detail: Some(detail),
            },
        }
    }
}

/// Attached to a 500 response so [`error_responder`] can render it for the
/// running environment.
#[derive(Debug, Clone)]
pub struct ServerFault {
    pub message: String,
    pub detail: String,
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let fault = self.server_fault();
        let mut response = self.to_json_response().into_response();
        if let Some(fault) = fault {
            response.extensions_mut().insert(fault);
        }
        response
    }
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::MissingField(_) | RequestError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RequestError::NotFound => StatusCode::NOT_FOUND,
            RequestError::DatabaseError(_) | RequestError::ServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_json_response(&self) -> JsonResponse<RequestErrorJsonWrapper> {
        let json = match self {
            RequestError::DatabaseError(_) | RequestError::ServerError(_) => {
                RequestErrorJsonWrapper::new(SERVER_ERROR_MESSAGE)
            }
            other => RequestErrorJsonWrapper::new(&other.to_string()),
        };
        (self.status_code(), Json(json))
    }

    fn server_fault(&self) -> Option<ServerFault> {
        match self {
            RequestError::DatabaseError(e) => Some(ServerFault {
                message: self.to_string(),
                detail: format!("{:?}", e),
            }),
            RequestError::ServerError(message) => Some(ServerFault {
                message: message.clone(),
                detail: format!("{:?}", self),
            }),
            _ => None,
        }
    }
}

/// Terminal error handler: every server fault leaves the app as a 500, with
/// the error echoed back only outside production.
pub async fn error_responder<B>(
    State(environment): State<Environment>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let response = next.run(request).await;
    let Some(fault) = response.extensions().get::<ServerFault>().cloned() else {
        return response;
    };

    tracing::error!(message = %fault.message, detail = %fault.detail, "request failed");

    let body = match environment {
        Environment::Production => RequestErrorJsonWrapper::new(SERVER_ERROR_MESSAGE),
        Environment::Development => {
            RequestErrorJsonWrapper::with_detail(&fault.message, fault.detail)
        }
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Turns a handler panic into a server fault instead of dropping the connection.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };
    RequestError::ServerError(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_the_field() {
        let (status, Json(body)) = RequestError::MissingField("style").to_json_response();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, RequestErrorJsonWrapper::new("Missing 'style' in request body"));
    }

    #[test]
    fn not_found_uses_fixed_message() {
        let (status, Json(body)) = RequestError::NotFound.to_json_response();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.message, "Article doesn't exist");
        assert_eq!(body.error.detail, None);
    }

    #[test]
    fn database_errors_hide_their_cause() {
        let error = RequestError::from(sqlx::Error::RowNotFound);
        let (status, Json(body)) = error.to_json_response();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, RequestErrorJsonWrapper::new("server error"));

        let response = error.into_response();
        let fault = response.extensions().get::<ServerFault>().unwrap();
        assert!(fault.message.starts_with("database error"));
    }

    #[test]
    fn client_errors_are_not_server_faults() {
        let response = RequestError::NotFound.into_response();
        assert!(response.extensions().get::<ServerFault>().is_none());
    }

    #[test]
    fn panics_become_server_faults() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let fault = response.extensions().get::<ServerFault>().unwrap();
        assert_eq!(fault.message, "boom");
    }

    #[test]
    fn detail_is_omitted_from_json_when_absent() {
        let json = serde_json::to_value(RequestErrorJsonWrapper::new("server error")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": { "message": "server error" } }));
    }
}
