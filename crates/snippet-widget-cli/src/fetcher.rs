use snippet_widget_config::Config;
use snippet_widget_engine::{IconError, IconFetcher};
use std::path::{Path, PathBuf};

/// Fetches icons over HTTP(S) or from local files.
///
/// Relative paths resolve against the configured `icon_root`.
pub struct CliIconFetcher {
    config: Config,
    client: reqwest::blocking::Client,
}

impl CliIconFetcher {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("snippet-widget/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, client })
    }

    fn fetch_http(&self, url: &str) -> Result<Vec<u8>, IconError> {
        let transport = |err: reqwest::Error| IconError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        };

        let response = self.client.get(url).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(IconError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().map_err(transport)?.to_vec())
    }

    fn local_path(&self, url: &str) -> PathBuf {
        match url.strip_prefix("file://") {
            Some(path) => PathBuf::from(path),
            None => self.config.resolve_icon_path(url),
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, IconError> {
    if !path.is_file() {
        return Err(IconError::NotFound(path.display().to_string()));
    }
    Ok(std::fs::read(path)?)
}

fn is_http(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl IconFetcher for CliIconFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, IconError> {
        if is_http(url) {
            self.fetch_http(url)
        } else {
            read_file(&self.local_path(url))
        }
    }
}
