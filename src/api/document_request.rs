use crate::{
    auth::auth::AuthUser,
    model::document_request::{DocumentRequest, DocumentType},
};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateDocumentRequest {
    #[schema(example = "A123456")]
    pub national_id: String,
    #[schema(example = "work_certificate")]
    pub document_type: DocumentType,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct DocumentFilter {
    #[schema(example = "A123456")]
    /// Filter by national ID
    pub national_id: Option<String>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u64>,
    #[schema(example = 10)]
    /// Pagination per page number
    pub per_page: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct DocumentListResponse {
    pub data: Vec<DocumentRequest>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

/* =========================
Log a document request
========================= */
/// Record that an official document was issued for a staff member
#[utoipa::path(
    post,
    path = "/api/v1/document",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document request logged", body = DocumentRequest),
        (status = 404, description = "Staff not found", body = Object, example = json!({
            "message": "No staff record for this national ID"
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Document"
)]
pub async fn create_document_request(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateDocumentRequest>,
) -> actix_web::Result<impl Responder> {
    let national_id = payload.national_id.trim().to_uppercase();

    // documents are only issued for registered staff
    let staff_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM staff WHERE national_id = ? LIMIT 1)")
            .bind(&national_id)
            .fetch_one(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, %national_id, "Failed to look up staff");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;

    if !staff_exists {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "No staff record for this national ID"
        })));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO document_requests (national_id, document_type, status)
        VALUES (?, ?, 'printed')
        "#,
    )
    .bind(&national_id)
    .bind(payload.document_type.to_string())
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, %national_id, "Failed to log document request");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let entry = sqlx::query_as::<_, DocumentRequest>(
        "SELECT * FROM document_requests WHERE id = ?",
    )
    .bind(result.last_insert_id())
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to read back document request");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Created().json(entry))
}

/* =========================
List document requests
========================= */
/// Issued-document history
#[utoipa::path(
    get,
    path = "/api/v1/document",
    params(DocumentFilter),
    responses(
        (status = 200, description = "Paginated document request list", body = DocumentListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Document"
)]
pub async fn list_document_requests(
    pool: web::Data<MySqlPool>,
    query: web::Query<DocumentFilter>,
) -> actix_web::Result<impl Responder> {
    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let mut where_sql = String::from(" WHERE 1=1");
    let mut bindings: Vec<String> = Vec::new();

    if let Some(national_id) = query.national_id.as_deref() {
        where_sql.push_str(" AND national_id = ?");
        bindings.push(national_id.trim().to_uppercase());
    }

    let count_sql = format!("SELECT COUNT(*) FROM document_requests{}", where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for b in &bindings {
        count_q = count_q.bind(b);
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to count document requests");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let data_sql = format!(
        "SELECT * FROM document_requests{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, DocumentRequest>(&data_sql);
    for b in &bindings {
        data_q = data_q.bind(b);
    }

    let documents = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch document requests");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(DocumentListResponse {
        data: documents,
        page: page as u32,
        per_page: per_page as u32,
        total,
    }))
}
