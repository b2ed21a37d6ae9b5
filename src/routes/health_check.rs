use actix_web::HttpResponse;

/// Liveness probe. Answers 200 with an empty body while the server accepts connections.
#[tracing::instrument(name = "Health check")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
