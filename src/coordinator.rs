use tokio::{fs::File, task::JoinSet};
use tracing::debug;

use crate::{
    config::Config, error::Result, map::AggregateTable, planner::plan_chunks,
    stream::aggregate_range,
};

pub fn fold_tables(tables: impl IntoIterator<Item = AggregateTable>) -> AggregateTable {
    tables
        .into_iter()
        .fold(AggregateTable::new(), |mut merged, table| {
            merged.merge(table);
            merged
        })
}

/// Plans the input into chunks, aggregates each on its own task and merges
/// the partial tables once every task has finished.
///
/// The first failing task fails the run; dropping the [`JoinSet`] aborts
/// whatever is still running.
pub async fn summarize(config: &Config) -> Result<AggregateTable> {
    let mut file = File::open(&config.path).await?;
    let size = file.metadata().await?.len();
    let ranges = plan_chunks(&mut file, size, config.workers).await?;
    drop(file);
    debug!(size, chunks = ranges.len(), ?ranges, "planned chunks");

    let mut tasks = JoinSet::new();
    for range in ranges {
        let path = config.path.clone();
        let buffer_size = config.buffer_size;
        let last = range.end == size;
        tasks.spawn(async move { aggregate_range(&path, range, last, buffer_size).await });
    }

    let mut tables = Vec::with_capacity(tasks.len());
    while let Some(table) = tasks.join_next().await {
        tables.push(table??);
    }

    let merged = fold_tables(tables);
    debug!(stations = merged.len(), "merged chunk tables");
    Ok(merged)
}
