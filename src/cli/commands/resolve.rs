//! Resolve command - map paths into the alternate root

use crate::cache::{CacheStats, Resolution};
use crate::cli::args::{OutputFormat, ResolveArgs};
use crate::config::Settings;
use crate::error::{AltrootError, AltrootResult};
use crate::ui::{self, UiContext};
use console::style;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// One requested path and where it resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPath {
    pub requested: String,
    pub resolved: String,
    pub remapped: bool,
}

impl ResolvedPath {
    fn new(requested: String, resolution: Resolution) -> Self {
        match resolution {
            Resolution::Remapped(resolved) => Self {
                requested,
                resolved,
                remapped: true,
            },
            Resolution::Unchanged => Self {
                resolved: requested.clone(),
                requested,
                remapped: false,
            },
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    paths: &'a [ResolvedPath],
    stats: CacheStats,
}

/// Execute the resolve command
pub async fn execute(args: ResolveArgs, settings: &Settings) -> AltrootResult<()> {
    let resolver = Arc::new(settings.build_resolver()?);
    debug!("Resolving {} path(s) with {:?}", args.paths.len(), resolver);

    // Lookups block on filesystem I/O; run them on the blocking pool.
    let mut handles = Vec::with_capacity(args.paths.len());
    for path in args.paths {
        let resolver = Arc::clone(&resolver);
        handles.push(tokio::task::spawn_blocking(move || {
            let resolution = resolver.lookup(&path);
            ResolvedPath::new(path, resolution)
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let resolved = handle
            .await
            .map_err(|e| AltrootError::User(format!("Resolve task failed: {}", e)))?;
        results.push(resolved);
    }

    let stats = resolver.stats();
    match args.format {
        OutputFormat::Table => {
            print_table(&results);
            if args.stats {
                print_stats(&stats);
            }
        }
        OutputFormat::Json => print_json(&results, args.stats.then_some(stats))?,
        OutputFormat::Plain => {
            print_plain(&results);
            if args.stats {
                print_stats(&stats);
            }
        }
    }

    Ok(())
}

fn print_table(results: &[ResolvedPath]) {
    let width = results
        .iter()
        .map(|r| r.requested.len())
        .max()
        .unwrap_or(0)
        .max("REQUESTED".len());

    println!(
        "{:<width$}  {:<10}  {}",
        style("REQUESTED").bold(),
        style("STATUS").bold(),
        style("RESOLVED").bold(),
        width = width
    );

    for result in results {
        let status = if result.remapped {
            style("remapped").green()
        } else {
            style("unchanged").dim()
        };
        println!(
            "{:<width$}  {:<10}  {}",
            result.requested,
            status,
            result.resolved,
            width = width
        );
    }
}

fn print_json(results: &[ResolvedPath], stats: Option<CacheStats>) -> AltrootResult<()> {
    let json = match stats {
        Some(stats) => serde_json::to_string_pretty(&Report {
            paths: results,
            stats,
        })?,
        None => serde_json::to_string_pretty(results)?,
    };
    println!("{}", json);
    Ok(())
}

fn print_plain(results: &[ResolvedPath]) {
    for result in results {
        println!("{}", result.resolved);
    }
}

fn print_stats(stats: &CacheStats) {
    let ctx = UiContext::detect();
    ui::section(&ctx, "Cache");
    ui::key_value(&ctx, "Hits", &stats.hits.to_string());
    ui::key_value(&ctx, "Misses", &stats.misses.to_string());
    ui::key_value(&ctx, "Remapped", &stats.remapped.to_string());
    ui::key_value(&ctx, "Unchanged", &stats.unchanged.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_path_from_remap() {
        let resolved = ResolvedPath::new(
            "/lib/libc.so.6".to_string(),
            Resolution::Remapped("/alt/lib/libc.so.6".to_string()),
        );
        assert!(resolved.remapped);
        assert_eq!(resolved.resolved, "/alt/lib/libc.so.6");
    }

    #[test]
    fn resolved_path_from_passthrough() {
        let resolved = ResolvedPath::new("/etc/hosts".to_string(), Resolution::Unchanged);
        assert!(!resolved.remapped);
        assert_eq!(resolved.resolved, "/etc/hosts");
        assert_eq!(resolved.requested, "/etc/hosts");
    }

    #[test]
    fn report_serializes_with_stats() {
        let paths = vec![ResolvedPath::new("rel".to_string(), Resolution::Unchanged)];
        let json = serde_json::to_value(Report {
            paths: &paths,
            stats: CacheStats::default(),
        })
        .unwrap();
        assert_eq!(json["paths"][0]["requested"], "rel");
        assert_eq!(json["stats"]["hits"], 0);
    }
}
