use anyhow::{Result, anyhow};
use autoscale_cuckoo_filter::CuckooFilter;
use futures::StreamExt;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::sync::RwLock;

/// Expected capacity and false-positive rate.
/// Tune these based on real staff counts.
const FILTER_CAPACITY: usize = 100_000;
const FALSE_POSITIVE_RATE: f64 = 0.001;

static NATIONAL_ID_FILTER: Lazy<RwLock<CuckooFilter<String>>> =
    Lazy::new(|| RwLock::new(CuckooFilter::new(FILTER_CAPACITY, FALSE_POSITIVE_RATE)));

#[inline]
fn normalize(national_id: &str) -> String {
    national_id.trim().to_uppercase()
}

/// Check if a national ID might already be registered (false positives possible)
pub fn might_exist(national_id: &str) -> bool {
    let national_id = normalize(national_id);
    NATIONAL_ID_FILTER
        .read()
        .expect("national id filter poisoned")
        .contains(&national_id)
}

/// Insert a single national ID into the filter
pub fn insert(national_id: &str) {
    let national_id = normalize(national_id);
    NATIONAL_ID_FILTER
        .write()
        .expect("national id filter poisoned")
        .add(&national_id);
}

/// Remove a national ID from the filter
pub fn remove(national_id: &str) {
    let national_id = normalize(national_id);
    NATIONAL_ID_FILTER
        .write()
        .expect("national id filter poisoned")
        .remove(&national_id);
}

/// Warm up the filter from the staff table using streaming + batching
pub async fn warmup_national_id_filter(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (String,)>("SELECT national_id FROM staff").fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total = 0usize;

    while let Some(row) = stream.next().await {
        let (national_id,) = row.map_err(|e| anyhow!("DB row fetch failed: {}", e))?;

        batch.push(normalize(&national_id));
        total += 1;

        if batch.len() == batch_size {
            insert_batch(&batch);
            batch.clear();
        }
    }

    if !batch.is_empty() {
        insert_batch(&batch);
    }

    log::info!("National ID filter warmup complete: {} staff", total);
    Ok(())
}

/// Insert a batch of normalized national IDs
fn insert_batch(national_ids: &[String]) {
    let mut filter = NATIONAL_ID_FILTER
        .write()
        .expect("national id filter poisoned");

    for national_id in national_ids {
        filter.add(national_id);
    }
}
