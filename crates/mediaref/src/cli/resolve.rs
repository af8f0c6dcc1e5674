//! Resolve and sample command handlers.

use super::commands::{OutputFormat, SourceArgs};
use mediaref::{
    ConfigError, ConfigErrorKind, FileSystemMetadataSource, HttpMetadataSource,
    InMemoryMetadataSource, MediaRefResult, MetadataSource, Resolver, ResolverConfig, asset_line,
    assets_json, sample_line,
};
use std::path::Path;
use std::sync::Arc;

/// Build a resolver for the selected source.
pub async fn build_resolver(source: &SourceArgs, config: Option<&Path>) -> MediaRefResult<Resolver> {
    let config = match config {
        Some(path) => ResolverConfig::from_file(path)?,
        None => ResolverConfig::load()?,
    };

    let source: Arc<dyn MetadataSource> = if let Some(fixtures) = &source.fixtures {
        Arc::new(InMemoryMetadataSource::from_json_file(fixtures).await?)
    } else if let Some(server) = &source.server {
        Arc::new(HttpMetadataSource::new(server.clone()))
    } else if let Some(dir) = &source.dir {
        Arc::new(FileSystemMetadataSource::new(dir))
    } else {
        return Err(ConfigError::new(ConfigErrorKind::NoMetadataSource).into());
    };

    tracing::debug!(source = source.name(), "Metadata source selected");
    Ok(Resolver::with_config(source, config))
}

/// Resolve `ids` and print every asset of the session.
pub async fn print_assets(resolver: &Resolver, ids: &[String], format: OutputFormat) -> MediaRefResult<()> {
    resolver.resolve(ids).await?;
    let assets = resolver.export_assets();

    match format {
        OutputFormat::Human => {
            for asset in &assets {
                println!("{}", asset_line(asset));
            }
        }
        OutputFormat::Json => {
            println!("{:#}", assets_json(&assets));
        }
    }
    Ok(())
}

/// Resolve each sample in `ids` and print it.
pub async fn print_samples(resolver: &Resolver, ids: &[String]) -> MediaRefResult<()> {
    for id in ids {
        let sample = resolver.resolve_sample(id).await?;
        println!("{}", sample_line(&sample));
    }
    Ok(())
}
