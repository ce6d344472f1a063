use crate::{
    auth::auth::AuthUser,
    model::staff::{Staff, StaffRole},
    utils::db_utils::{build_update_sql, execute_update},
    utils::{national_id_cache, national_id_filter},
};
use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::MySqlPool;
use sqlx::types::Json;
use std::str::FromStr;
use tracing::{debug, error};
use utoipa::ToSchema;

const MIN_NATIONAL_ID_LEN: usize = 5;
const MIN_FULL_NAME_LEN: usize = 3;
const MIN_PHONE_LEN: usize = 10;
const MIN_MOSQUE_LEN: usize = 2;

/// Columns a staff patch may touch; the national ID is the lookup key and
/// never changes after registration.
const STAFF_UPDATE_COLUMNS: &[&str] = &["full_name", "phone_number", "roles", "mosque_name"];

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateStaff {
    #[schema(example = "A123456")]
    pub national_id: String,
    #[schema(example = "Ahmed Ben Salah")]
    pub full_name: String,
    #[schema(example = "+21698123456")]
    pub phone_number: String,
    #[schema(example = json!(["imam"]))]
    pub roles: Vec<StaffRole>,
    #[schema(example = "Al-Nour Mosque")]
    pub mosque_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StaffQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub mosque: Option<String>,
    pub role: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct StaffListResponse {
    pub data: Vec<Staff>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 10)]
    pub total: i64,
}

pub fn validate_new_staff(payload: &CreateStaff) -> Result<(), &'static str> {
    if payload.national_id.trim().len() < MIN_NATIONAL_ID_LEN {
        return Err("National ID is too short");
    }
    if payload.full_name.trim().len() < MIN_FULL_NAME_LEN {
        return Err("Full name is required");
    }
    if payload.phone_number.trim().len() < MIN_PHONE_LEN {
        return Err("Phone number is not valid");
    }
    if payload.mosque_name.trim().len() < MIN_MOSQUE_LEN {
        return Err("Mosque name is required");
    }
    if payload.roles.is_empty() {
        return Err("At least one duty role is required");
    }
    Ok(())
}

/// true  => national ID AVAILABLE
/// false => national ID TAKEN
pub async fn is_national_id_available(national_id: &str, pool: &MySqlPool) -> bool {
    // 1. Cuckoo filter: fast negative
    if !national_id_filter::might_exist(national_id) {
        return true;
    }

    // 2. Moka cache: fast positive
    if national_id_cache::is_taken(national_id).await {
        return false;
    }

    // 3. Database fallback
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM staff WHERE national_id = ? LIMIT 1)",
    )
    .bind(national_id.trim().to_uppercase())
    .fetch_one(pool)
    .await
    .unwrap_or(true); // fail-safe

    !exists
}

/// Inserts a staff record and keeps the duplicate-ID screen populated.
/// Returns the new row id.
pub async fn insert_staff(
    payload: &CreateStaff,
    owner_user_id: u64,
    pool: &MySqlPool,
) -> Result<u64, HttpResponse> {
    let national_id = payload.national_id.trim().to_uppercase();

    let result = sqlx::query(
        r#"
        INSERT INTO staff
            (national_id, full_name, phone_number, roles, mosque_name, user_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&national_id)
    .bind(payload.full_name.trim())
    .bind(payload.phone_number.trim())
    .bind(Json(&payload.roles))
    .bind(payload.mosque_name.trim())
    .bind(owner_user_id)
    .execute(pool)
    .await;

    match result {
        Ok(done) => {
            national_id_filter::insert(&national_id);
            national_id_cache::mark_taken(&national_id).await;
            Ok(done.last_insert_id())
        }
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Err(HttpResponse::Conflict().json(json!({
                        "message": "A staff record with this national ID already exists"
                    })));
                }
            }

            error!(error = %e, %national_id, "Failed to create staff record");
            Err(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

/// Register staff
#[utoipa::path(
    post,
    path = "/api/v1/staff",
    request_body = CreateStaff,
    responses(
        (status = 201, description = "Staff registered", body = Object, example = json!({
            "message": "Staff registered successfully",
            "id": 1
        })),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Duplicate national ID", body = Object, example = json!({
            "message": "A staff record with this national ID already exists"
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Staff"
)]
pub async fn create_staff(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateStaff>,
) -> actix_web::Result<impl Responder> {
    if let Err(msg) = validate_new_staff(&payload) {
        return Ok(HttpResponse::BadRequest().json(json!({ "message": msg })));
    }

    if !is_national_id_available(&payload.national_id, pool.get_ref()).await {
        return Ok(HttpResponse::Conflict().json(json!({
            "message": "A staff record with this national ID already exists"
        })));
    }

    match insert_staff(&payload, auth.user_id, pool.get_ref()).await {
        Ok(id) => Ok(HttpResponse::Created().json(json!({
            "message": "Staff registered successfully",
            "id": id
        }))),
        Err(err_resp) => Ok(err_resp),
    }
}

/// List staff
#[utoipa::path(
    get,
    path = "/api/v1/staff",
    params(
        ("page", Query, description = "Page number"),
        ("per_page", Query, description = "Items per page"),
        ("mosque", Query, description = "Filter by mosque name"),
        ("role", Query, description = "Filter by duty role"),
        ("search", Query, description = "Search by name, phone or national ID")
    ),
    responses(
        (status = 200, description = "Paginated staff list", body = StaffListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Staff"
)]
pub async fn list_staff(
    pool: web::Data<MySqlPool>,
    query: web::Query<StaffQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;

    // ---------- build WHERE clause dynamically ----------
    let mut conditions = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(mosque) = &query.mosque {
        conditions.push("mosque_name LIKE ?");
        bindings.push(format!("%{}%", mosque));
    }

    if let Some(role) = &query.role {
        if StaffRole::from_str(role).is_err() {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": "Unknown duty role. Allowed: khateeb, imam, muezzin"
            })));
        }
        conditions.push("JSON_CONTAINS(roles, JSON_QUOTE(?))");
        bindings.push(role.clone());
    }

    if let Some(search) = &query.search {
        conditions.push("(full_name LIKE ? OR phone_number LIKE ? OR national_id LIKE ?)");
        let like = format!("%{}%", search);
        bindings.push(like.clone());
        bindings.push(like.clone());
        bindings.push(like);
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    // ---------- total count ----------
    let count_sql = format!("SELECT COUNT(*) as total FROM staff {}", where_clause);
    debug!(sql = %count_sql, bindings = ?bindings, "Counting staff");

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for b in &bindings {
        count_query = count_query.bind(b);
    }

    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %count_sql, "Failed to count staff");
        ErrorInternalServerError("Database error")
    })?;

    // ---------- data query ----------
    let data_sql = format!(
        "SELECT * FROM staff {} ORDER BY id DESC LIMIT ? OFFSET ?",
        where_clause
    );
    debug!(sql = %data_sql, bindings = ?bindings, page, per_page, offset, "Fetching staff");

    let mut data_query = sqlx::query_as::<_, Staff>(&data_sql);
    for b in &bindings {
        data_query = data_query.bind(b);
    }
    data_query = data_query.bind(per_page as i64).bind(offset as i64);

    let staff = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %data_sql, "Failed to fetch staff");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(StaffListResponse {
        data: staff,
        page,
        per_page,
        total,
    }))
}

/// Get staff by national ID
#[utoipa::path(
    get,
    path = "/api/v1/staff/{national_id}",
    params(
        ("national_id", Path, description = "National ID of the staff member")
    ),
    responses(
        (status = 200, description = "Staff found", body = Staff),
        (status = 404, description = "Staff not found", body = Object, example = json!({
            "message": "No staff record for this national ID"
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Staff"
)]
pub async fn get_staff(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let national_id = path.into_inner().trim().to_uppercase();

    let staff = sqlx::query_as::<_, Staff>("SELECT * FROM staff WHERE national_id = ?")
        .bind(&national_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, %national_id, "Failed to fetch staff");
            ErrorInternalServerError("Internal Server Error")
        })?;

    match staff {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "No staff record for this national ID"
        }))),
    }
}

/// Update staff
#[utoipa::path(
    put,
    path = "/api/v1/staff/{national_id}",
    params(
        ("national_id", Path, description = "National ID of the staff member")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Staff updated", body = Object, example = json!({
            "message": "Staff updated successfully"
        })),
        (status = 400, description = "Unknown field or bad value"),
        (status = 404, description = "Staff not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Staff"
)]
pub async fn update_staff(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    auth.require_clerk_or_admin()?;

    let national_id = path.into_inner().trim().to_uppercase();

    // roles must stay a valid native list of known duties
    if let Some(roles) = body.get("roles") {
        if serde_json::from_value::<Vec<StaffRole>>(roles.clone()).is_err() {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": "roles must be a list drawn from: khateeb, imam, muezzin"
            })));
        }
    }

    let update = build_update_sql(
        "staff",
        &body,
        STAFF_UPDATE_COLUMNS,
        "national_id",
        &national_id,
    )?;

    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if affected == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "No staff record for this national ID"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Staff updated successfully"
    })))
}

/// Delete staff (admin)
#[utoipa::path(
    delete,
    path = "/api/v1/staff/{national_id}",
    params(
        ("national_id", Path, description = "National ID of the staff member")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Staff not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Staff"
)]
pub async fn delete_staff(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let national_id = path.into_inner().trim().to_uppercase();

    let result = sqlx::query("DELETE FROM staff WHERE national_id = ?")
        .bind(&national_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(res) => {
            if res.rows_affected() == 0 {
                return Ok(HttpResponse::NotFound().json(json!({
                    "message": "No staff record for this national ID"
                })));
            }

            national_id_filter::remove(&national_id);
            national_id_cache::clear(&national_id).await;

            Ok(HttpResponse::Ok().json(json!({
                "message": "Successfully deleted"
            })))
        }

        Err(e) => {
            error!(error = %e, %national_id, "Failed to delete staff");

            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> CreateStaff {
        CreateStaff {
            national_id: "A123456".into(),
            full_name: "Ahmed Ben Salah".into(),
            phone_number: "+21698123456".into(),
            roles: vec![StaffRole::Imam],
            mosque_name: "Al-Nour Mosque".into(),
        }
    }

    #[test]
    fn accepts_a_complete_registration() {
        assert!(validate_new_staff(&valid_payload()).is_ok());
    }

    #[test]
    fn rejects_short_national_id() {
        let mut p = valid_payload();
        p.national_id = "A12".into();
        assert!(validate_new_staff(&p).is_err());
    }

    #[test]
    fn rejects_empty_role_list() {
        let mut p = valid_payload();
        p.roles.clear();
        assert_eq!(
            validate_new_staff(&p),
            Err("At least one duty role is required")
        );
    }
}
