//! `generate` command and company profile resolution.

use std::path::Path;

use anyhow::Context;
use tweetdb_core::{CompanyProfile, TweetRecord};
use tweetdb_mock::GeneratorConfig;

use crate::GenerateArgs;

/// Pick the company profiles: `--companies`, then `fallback`, then the
/// built-in set.
pub(crate) fn resolve_companies(
    flag: Option<&Path>,
    fallback: Option<&Path>,
) -> anyhow::Result<Vec<CompanyProfile>> {
    match flag.or(fallback) {
        Some(path) => tweetdb_core::load_companies(path)
            .with_context(|| format!("failed to load companies from {}", path.display())),
        None => Ok(tweetdb_core::builtin_companies()),
    }
}

/// Generate records for `args`, dated relative to the current time.
pub(crate) fn generate_records(
    args: &GenerateArgs,
    fallback_companies: Option<&Path>,
) -> anyhow::Result<Vec<TweetRecord>> {
    let companies = resolve_companies(args.companies.as_deref(), fallback_companies)?;
    let config = GeneratorConfig {
        per_company: args.per_company,
        days: args.days,
        seed: args.seed,
        now: chrono::Utc::now(),
    };
    let records = tweetdb_mock::generate_tweets(&companies, &config)?;
    tracing::info!(
        companies = companies.len(),
        records = records.len(),
        seed = args.seed,
        "generated mock tweets"
    );
    Ok(records)
}

/// Write generated tweets to `output` without touching the database. The
/// file format follows the extension of `output`.
pub(crate) fn run_generate(
    args: &GenerateArgs,
    output: &Path,
    fallback_companies: Option<&Path>,
) -> anyhow::Result<()> {
    let records = generate_records(args, fallback_companies)?;
    tweetdb_core::write_records(output, &records)?;
    println!("wrote {} tweets to {}", records.len(), output.display());
    Ok(())
}
