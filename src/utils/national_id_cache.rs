use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

/// true  => national ID already has a staff record
/// false => available (usually we store only taken)
pub static NATIONAL_ID_CACHE: Lazy<Cache<String, bool>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(500_000) // tune based on memory
        .time_to_live(Duration::from_secs(86400)) // 24h TTL
        .build()
});

/// Mark a single national ID as taken
pub async fn mark_taken(national_id: &str) {
    NATIONAL_ID_CACHE
        .insert(national_id.trim().to_uppercase(), true)
        .await;
}

/// Check if a national ID is taken
pub async fn is_taken(national_id: &str) -> bool {
    NATIONAL_ID_CACHE
        .get(&national_id.trim().to_uppercase())
        .await
        .unwrap_or(false)
}

/// Forget a national ID after its staff record is deleted
pub async fn clear(national_id: &str) {
    NATIONAL_ID_CACHE
        .invalidate(&national_id.trim().to_uppercase())
        .await;
}

/// Batch mark national IDs as taken
async fn batch_mark(national_ids: &[String]) {
    let futures: Vec<_> = national_ids
        .iter()
        .map(|id| NATIONAL_ID_CACHE.insert(id.trim().to_uppercase(), true))
        .collect();

    futures::future::join_all(futures).await;
}

/// Load only RECENTLY registered staff into the in-memory cache (batched)
pub async fn warmup_national_id_cache(
    pool: &MySqlPool,
    days: u32,
    batch_size: usize,
) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (String,)>(
        r#"
        SELECT national_id
        FROM staff
        WHERE created_at >= NOW() - INTERVAL ? DAY
        ORDER BY created_at DESC
        "#,
    )
    .bind(days)
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        let (national_id,) = row?;
        batch.push(national_id);
        total_count += 1;

        if batch.len() >= batch_size {
            batch_mark(&batch).await;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        batch_mark(&batch).await;
    }

    log::info!(
        "National ID cache warmup complete: {} staff (last {} days)",
        total_count,
        days
    );

    Ok(())
}
