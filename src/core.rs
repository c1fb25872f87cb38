use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use serde::Serialize;
use url::Url;

use crate::env::{EnvConfig, EnvResult};
use crate::error::{StyleStatsError, StyleStatsResult};
use crate::network::response::FetchedResponse;
use crate::network::session::{RequestOptions, Session};
use crate::parsers::content::{classify, ContentKind};
use crate::parsers::css::{extract_rules, Declaration, StyleRule};
use crate::parsers::html::extract_stylesheets;

/// Configuration options for a stylestats run
///
/// Everything here is passed through to the HTTP layer untouched.
#[derive(Debug, Clone, Default)]
pub struct StyleStatsOptions {
    pub request: RequestOptions,
}

impl StyleStatsOptions {
    /// Builds options from `STYLESTATS_*` environment variables
    pub fn from_env() -> EnvResult<StyleStatsOptions> {
        let env_config = EnvConfig::from_env()?;

        Ok(StyleStatsOptions {
            request: RequestOptions {
                user_agent: env_config.user_agent,
                timeout: env_config.timeout,
                insecure: env_config.insecure,
                compression: env_config.compression,
                ..RequestOptions::default()
            },
        })
    }
}

/// The statistics and merged CSS produced by one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedData {
    pub css_string: String,
    /// UTF-8 byte length of `css_string`
    pub css_size: usize,
    pub style_elements: usize,
    pub media_queries: usize,
    pub css_files: usize,
    pub rules: Vec<StyleRule>,
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
}

/// Ordered buffer every piece of CSS text ends up in, whatever its origin
#[derive(Debug, Default)]
struct StyleBuffer {
    fragments: Vec<String>,
}

impl StyleBuffer {
    fn push(&mut self, fragment: String) {
        self.fragments.push(fragment);
    }

    fn concat(&self) -> String {
        self.fragments.concat()
    }
}

/// Collects CSS from URLs, local files and literal fragments
///
/// The caller's inputs are never modified, so `parse` can be run repeatedly.
///
/// # Examples
///
/// ```no_run
/// use stylestats::core::{StyleStats, StyleStatsOptions};
///
/// # async fn run() -> Result<(), stylestats::error::StyleStatsError> {
/// let stats = StyleStats::new(
///     vec!["https://example.com/".to_string()],
///     vec![],
///     vec![],
///     StyleStatsOptions::default(),
/// );
/// let parsed_data = stats.parse().await?;
/// println!("{} rules", parsed_data.rules.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StyleStats {
    urls: Vec<String>,
    files: Vec<PathBuf>,
    styles: Vec<String>,
    options: StyleStatsOptions,
}

impl StyleStats {
    pub fn new(
        urls: Vec<String>,
        files: Vec<PathBuf>,
        styles: Vec<String>,
        options: StyleStatsOptions,
    ) -> StyleStats {
        StyleStats {
            urls,
            files,
            styles,
            options,
        }
    }

    /// Runs the whole pipeline: local files, first fetch wave, HTML mining,
    /// second fetch wave, then rule extraction
    ///
    /// Fails with the first error encountered; there is no partial result.
    pub async fn parse(&self) -> StyleStatsResult<ParsedData> {
        self.check_inputs()?;
        let urls = self.parse_urls()?;

        let mut parsed_data = ParsedData::default();
        let mut buffer = StyleBuffer::default();

        for style in &self.styles {
            buffer.push(style.clone());
        }

        for file in self.files.iter().filter(|file| is_css_file(file)) {
            buffer.push(read_css_file(file)?);
            parsed_data.css_files += 1;
        }

        if !urls.is_empty() {
            let session = Session::new(&self.options.request)?;

            tracing::info!("fetching {} documents", urls.len());
            let responses = fetch_wave(&session, &urls).await?;

            let mut linked_urls: Vec<Url> = Vec::new();
            for response in responses {
                match classify(&response)? {
                    ContentKind::Css => {
                        parsed_data.css_files += 1;
                        buffer.push(response.body);
                    }
                    ContentKind::Html => {
                        let extracted = extract_stylesheets(&response.body, &response.final_url);
                        parsed_data.css_files += extracted.links.len();
                        parsed_data.style_elements += extracted.styles.len();
                        for style in extracted.styles {
                            buffer.push(style);
                        }
                        linked_urls.extend(extracted.links);
                    }
                }
            }

            if !linked_urls.is_empty() {
                tracing::info!("fetching {} linked stylesheets", linked_urls.len());
                for response in fetch_wave(&session, &linked_urls).await? {
                    buffer.push(response.body);
                }
            }
        }

        parsed_data.css_string = buffer.concat();
        parsed_data.css_size = parsed_data.css_string.len();
        tracing::debug!("aggregated {} bytes of CSS", parsed_data.css_size);

        let statistics = extract_rules(&parsed_data.css_string)?;
        parsed_data.media_queries = statistics.media_queries;
        parsed_data.rules = statistics.rules;
        parsed_data.selectors = statistics.selectors;
        parsed_data.declarations = statistics.declarations;

        tracing::info!(
            "found {} rules, {} selectors, {} declarations",
            parsed_data.rules.len(),
            parsed_data.selectors.len(),
            parsed_data.declarations.len()
        );

        Ok(parsed_data)
    }

    /// URLs, files and literal styles may not all be given at once
    fn check_inputs(&self) -> StyleStatsResult<()> {
        if !self.urls.is_empty() && !self.files.is_empty() && !self.styles.is_empty() {
            return Err(StyleStatsError::InvalidArgument(
                "URLs, files and styles cannot all be given at once".to_string(),
            ));
        }

        Ok(())
    }

    fn parse_urls(&self) -> StyleStatsResult<Vec<Url>> {
        self.urls
            .iter()
            .map(|url| {
                Url::parse(url.trim()).map_err(|e| {
                    StyleStatsError::InvalidArgument(format!("invalid URL {url:?}: {e}"))
                })
            })
            .collect()
    }
}

/// Fetches every URL concurrently; the first failure aborts the wave
async fn fetch_wave(session: &Session, urls: &[Url]) -> StyleStatsResult<Vec<FetchedResponse>> {
    try_join_all(urls.iter().map(|url| session.fetch(url))).await
}

/// Checks if the file extension marks a stylesheet
pub fn is_css_file(path: &Path) -> bool {
    let is_css = path
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|extension| extension.eq_ignore_ascii_case("css"));

    if !is_css {
        tracing::debug!("ignoring {}: not a CSS file", path.display());
    }

    is_css
}

fn read_css_file(path: &Path) -> StyleStatsResult<String> {
    tracing::debug!("reading {}", path.display());

    fs::read_to_string(path).map_err(|source| StyleStatsError::Filesystem {
        path: path.to_path_buf(),
        source,
    })
}
