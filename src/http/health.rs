use crate::http::types::StatusResponse;
use actix_web::HttpResponse;

pub(crate) async fn index() -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse {
        status: "running",
        message: "YouTube Download API",
    })
}

pub(crate) async fn health() -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse {
        status: "ok",
        message: "Server is running",
    })
}
