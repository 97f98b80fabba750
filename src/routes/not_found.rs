use actix_web::HttpResponse;

use super::welcome::ErrorBody;

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody {
        error: "Route non trouvée",
        details: None,
    })
}
