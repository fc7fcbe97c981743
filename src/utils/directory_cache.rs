use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

use crate::model::employee::EmployeeKind;
use crate::store;

/// (employee id, kind tag) => display name
pub static DIRECTORY_CACHE: Lazy<Cache<(u64, String), String>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000) // tune based on memory
        .time_to_live(Duration::from_secs(86400)) // 24h TTL
        .build()
});

/// Resolve an employee display name, hitting the database only on cache miss.
pub async fn resolve_name(
    pool: &MySqlPool,
    id: u64,
    kind: EmployeeKind,
) -> Result<Option<String>, sqlx::Error> {
    let key = (id, kind.to_string());
    if let Some(name) = DIRECTORY_CACHE.get(&key).await {
        return Ok(Some(name));
    }

    match store::fetch_employee(pool, id, &key.1).await? {
        Some(employee) => {
            DIRECTORY_CACHE.insert(key, employee.name.clone()).await;
            Ok(Some(employee.name))
        }
        None => Ok(None),
    }
}

/// Batch insert a chunk of directory rows
async fn batch_remember(entries: &[(u64, String, String)]) {
    let futures: Vec<_> = entries
        .iter()
        .map(|(id, kind, name)| DIRECTORY_CACHE.insert((*id, kind.clone()), name.clone()))
        .collect();

    // Await all insertions concurrently
    futures::future::join_all(futures).await;
}

/// Preload the full employee directory into the in-memory cache (batched)
pub async fn warmup_directory_cache(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream =
        sqlx::query_as::<_, (u64, String, String)>("SELECT id, kind, name FROM employees")
            .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        batch.push(row?);
        total_count += 1;

        if batch.len() >= batch_size {
            batch_remember(&batch).await;
            batch.clear();
        }
    }

    // Insert any remaining rows
    if !batch.is_empty() {
        batch_remember(&batch).await;
    }

    log::info!(
        "Directory cache warmup complete: {} employees",
        total_count
    );

    Ok(())
}
