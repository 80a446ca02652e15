use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{DataError, Result};

/// Where the dataset text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// Interpret a user-supplied location: `http://` / `https://` prefixes
    /// are URLs, everything else is a local path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }

    /// Read the whole resource as UTF-8 text.
    pub fn fetch_text(&self, timeout: Duration) -> Result<String> {
        match self {
            DataSource::File(path) => read_file(path),
            DataSource::Url(url) => fetch_url(url, timeout),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)?;
    log::debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

fn fetch_url(url: &str, timeout: Duration) -> Result<String> {
    let transport = |e: reqwest::Error| DataError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(format!("realty-lens/{}", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(transport)?;

    let response = client.get(url).send().map_err(transport)?;
    let status = response.status();
    if !status.is_success() {
        return Err(DataError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let text = response.text().map_err(transport)?;
    log::debug!("Fetched {} bytes from {url}", text.len());
    Ok(text)
}
