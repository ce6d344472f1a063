use actix_web::error::ErrorBadRequest;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use sqlx::MySqlPool;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug)]
pub enum SqlValue {
    String(String),
    I64(i64),
    F64(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Arrays/objects, bound as JSON text (MySQL JSON columns accept it)
    Json(String),
    Null,
}

/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// ===============================
/// Build dynamic UPDATE SQL
/// ===============================
/// Patch bodies arrive as free-form JSON, so only columns on the allowlist
/// make it into the SET clause.
pub fn build_update_sql(
    table: &str,
    payload: &Value,
    allowed_columns: &[&str],
    id_column: &str,
    id_value: &str,
) -> Result<SqlUpdate, actix_web::Error> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ErrorBadRequest("Payload must be a JSON object"))?;

    if obj.is_empty() {
        return Err(ErrorBadRequest("No fields provided for update"));
    }

    if let Some(unknown) = obj.keys().find(|k| !allowed_columns.contains(&k.as_str())) {
        return Err(ErrorBadRequest(format!(
            "Field '{}' cannot be updated",
            unknown
        )));
    }

    // Build SET clause
    let set_clause = obj
        .keys()
        .map(|k| format!("{} = ?", k))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!("UPDATE {} SET {} WHERE {} = ?", table, set_clause, id_column);

    let mut values = Vec::with_capacity(obj.len() + 1);

    // Convert JSON values -> SqlValue
    for value in obj.values() {
        match value {
            Value::String(s) => {
                if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    values.push(SqlValue::Date(d));
                } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                    values.push(SqlValue::DateTime(dt));
                } else {
                    values.push(SqlValue::String(s.clone()));
                }
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    values.push(SqlValue::I64(i));
                } else if let Some(f) = n.as_f64() {
                    values.push(SqlValue::F64(f));
                }
            }
            Value::Bool(b) => values.push(SqlValue::Bool(*b)),
            Value::Array(_) | Value::Object(_) => {
                values.push(SqlValue::Json(value.to_string()));
            }
            Value::Null => values.push(SqlValue::Null),
        }
    }

    // WHERE id = ?
    values.push(SqlValue::String(id_value.to_string()));

    Ok(SqlUpdate { sql, values })
}

/// ===============================
/// Execute the update
/// ===============================
pub async fn execute_update(pool: &MySqlPool, update: SqlUpdate) -> Result<u64, sqlx::Error> {
    let mut query = sqlx::query(&update.sql);

    for value in update.values {
        query = match value {
            SqlValue::String(v) => query.bind(v),
            SqlValue::I64(v) => query.bind(v),
            SqlValue::F64(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Date(v) => query.bind(v),
            SqlValue::DateTime(v) => query.bind(v),
            SqlValue::Json(v) => query.bind(v),
            SqlValue::Null => query.bind(None::<String>),
        };
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COLUMNS: &[&str] = &["full_name", "phone_number", "roles"];

    #[test]
    fn builds_set_clause_for_allowed_fields() {
        let patch = json!({"full_name": "Omar Haddad"});
        let update = build_update_sql("staff", &patch, COLUMNS, "national_id", "A123456").unwrap();
        assert_eq!(
            update.sql,
            "UPDATE staff SET full_name = ? WHERE national_id = ?"
        );
        assert_eq!(update.values.len(), 2);
    }

    #[test]
    fn arrays_become_json_bindings() {
        let patch = json!({"roles": ["imam"]});
        let update = build_update_sql("staff", &patch, COLUMNS, "national_id", "A123456").unwrap();
        assert!(matches!(&update.values[0], SqlValue::Json(s) if s == r#"["imam"]"#));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let patch = json!({"status": "approved"});
        assert!(build_update_sql("staff", &patch, COLUMNS, "national_id", "A123456").is_err());
    }

    #[test]
    fn empty_patch_is_rejected() {
        let patch = json!({});
        assert!(build_update_sql("staff", &patch, COLUMNS, "national_id", "A123456").is_err());
    }
}
