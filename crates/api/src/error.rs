use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GemschiError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("There was a conflict with the request. Error message: `{0}`")]
    Conflict(String),
    #[error("Unauthenticated request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("The caller is not allowed to perform this action. Error message: `{0}`")]
    Forbidden(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
}

#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
}

impl GemschiError {
    /// Stable machine readable error code
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InternalError => "internal",
            Self::BadClientData(_) => "invalid_argument",
            Self::Conflict(_) => "conflict",
            Self::Unauthorized(_) => "unauthenticated",
            Self::Forbidden(_) => "permission_denied",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl actix_web::error::ResponseError for GemschiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .json(ErrorBody {
                kind: self.kind(),
                message: self.to_string(),
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::{body::to_bytes, ResponseError};

    #[actix_web::test]
    async fn renders_kind_and_message() {
        let err = GemschiError::Forbidden("Only admins".into());
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["kind"], "permission_denied");
        assert!(json["message"].as_str().unwrap().contains("Only admins"));
    }
}
