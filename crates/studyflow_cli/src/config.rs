//! Runtime settings resolved from flags, environment and platform defaults.

use crate::cli::Cli;
use anyhow::{anyhow, Context};
use std::path::PathBuf;
use std::time::Duration;
use studyflow_core::{default_log_level, Enricher, NoEnrichment, WikipediaEnricher};

const APP_DIR_NAME: &str = "studyflow";
const DB_FILE_NAME: &str = "studyflow.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub enrich: bool,
    pub wiki_url: String,
    pub wiki_timeout: Duration,
}

impl AppConfig {
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = || -> anyhow::Result<PathBuf> {
            dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or_else(|| anyhow!("no platform data directory; pass --db and --log-dir"))
        };

        let db_path = match &cli.db {
            Some(path) => path.clone(),
            None => {
                let dir = data_dir()?;
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("failed to create {}", dir.display()))?;
                dir.join(DB_FILE_NAME)
            }
        };
        let log_dir = match &cli.log_dir {
            Some(path) => path.clone(),
            None => data_dir()?.join(LOG_DIR_NAME),
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level: cli
                .log_level
                .clone()
                .unwrap_or_else(|| default_log_level().to_string()),
            enrich: !cli.no_enrich,
            wiki_url: cli.wiki_url.clone(),
            wiki_timeout: Duration::from_secs(cli.wiki_timeout),
        })
    }

    /// Summary source chosen by the enrichment settings.
    pub fn summary_source(&self) -> SummarySource {
        if self.enrich {
            SummarySource::Wikipedia(WikipediaEnricher::with_base_url(
                self.wiki_url.as_str(),
                self.wiki_timeout,
            ))
        } else {
            SummarySource::Off(NoEnrichment)
        }
    }
}

pub enum SummarySource {
    Off(NoEnrichment),
    Wikipedia(WikipediaEnricher),
}

impl Enricher for SummarySource {
    fn summarize(&self, topic: &str) -> String {
        match self {
            Self::Off(inner) => inner.summarize(topic),
            Self::Wikipedia(inner) => inner.summarize(topic),
        }
    }
}
