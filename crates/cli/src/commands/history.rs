use tariffy_core::history::HistorySink;
use tariffy_core::HistoryRecord;
use tariffy_db::{connect_with_config, migrations, SqlHistoryRepository};

use crate::commands::{load_config, runtime, CommandResult};

pub const DEFAULT_LIMIT: usize = 20;

pub fn run(search: Option<String>, limit: usize, json: bool) -> CommandResult {
    let config = match load_config("history") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match runtime("history") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_config(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;
        let repo = SqlHistoryRepository::new(pool.clone());
        let records = match search.as_deref() {
            Some(query) => repo.search(query, limit).await,
            None => repo.recent(limit).await,
        }
        .map_err(|error| ("persistence", error.to_string(), 4u8))?;
        pool.close().await;
        Ok::<Vec<HistoryRecord>, (&'static str, String, u8)>(records)
    });

    match result {
        Ok(records) if json => {
            CommandResult::success_with("history", format!("{} record(s)", records.len()), &records)
        }
        Ok(records) => CommandResult::text(render_human(&records)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("history", error_class, message, exit_code)
        }
    }
}

fn render_human(records: &[HistoryRecord]) -> String {
    if records.is_empty() {
        return "no history records".to_string();
    }
    records
        .iter()
        .map(|record| {
            let top = record
                .candidates
                .first()
                .map(|candidate| format!("{} [{}]", candidate.hs6, candidate.confidence))
                .unwrap_or_else(|| "-".to_string());
            format!(
                "{}  {}  {}  {}",
                record.created_at.format("%Y-%m-%d %H:%M"),
                top,
                record.product_name,
                record.product_ref
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
