//! `db` subcommand handlers.

pub(crate) async fn run_ping(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    tweetdb_db::ping(pool).await?;
    println!("database connection ok");
    Ok(())
}

pub(crate) async fn run_ensure_schema(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    tweetdb_db::ensure_tweets_table(pool).await?;
    println!("{} table ready", tweetdb_db::TWEETS_TABLE);
    Ok(())
}

/// Print per-company totals split by sentiment label.
///
/// # Errors
///
/// Returns an error if a query fails.
pub(crate) async fn run_stats(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    if !tweetdb_db::tweets_table_exists(pool).await? {
        println!("no tweets table; run `db ensure-schema` or `load` first");
        return Ok(());
    }

    let rows = tweetdb_db::count_tweets_by_company(pool).await?;
    if rows.is_empty() {
        println!("no tweets loaded");
        return Ok(());
    }

    println!(
        "{:<24}{:>10}{:>10}{:>10}",
        "COMPANY", "TOTAL", "POSITIVE", "NEGATIVE"
    );
    for row in &rows {
        println!(
            "{:<24}{:>10}{:>10}{:>10}",
            row.company, row.total, row.positive, row.negative
        );
    }
    println!("{:<24}{:>10}", "ALL", tweetdb_db::count_tweets(pool).await?);

    Ok(())
}
