use {
    std::fs::read_to_string,
    tracing::warn,
    serde::Deserialize,
    crate::{
        dataset::ALL_EPISODES,
        filter::{SentimentChoice, NO_KEYWORD},
        keywords::{MIN_LENGTH_MAX, MIN_LENGTH_MIN, TOP_N_MAX, TOP_N_MIN},
    },
};

pub const DEFAULT_DATASET_PATH: &str = "podcast_sentiment_demo.csv";

#[derive(Deserialize, Debug)]
pub struct Config {
    pub dataset: Option<DatasetConfig>,
    pub controls: Option<ControlsConfig>,
    pub export: Option<ExportConfig>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatasetConfig {
    path: Option<String>,
    raw_preview: Option<bool>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ControlsConfig {
    episode: Option<String>,
    sentiment: Option<SentimentChoice>,
    search: Option<String>,
    top_n: Option<usize>,
    min_word_length: Option<usize>,
    keyword: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ExportConfig {
    enabled: Option<bool>,
    dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: None,
            controls: None,
            export: None,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            raw_preview: None,
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            episode: None,
            sentiment: None,
            search: None,
            top_n: None,
            min_word_length: None,
            keyword: None,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        read_to_string("./config.toml")
            .or_else(|_| read_to_string("/config/config.toml"))
            .map_err(|err| err.to_string())
            .and_then(|v| toml::from_str(&v).map_err(|err| err.to_string()))
            .unwrap_or_else(|err| {
                warn!("failed to read config: {}", err);
                Config::default()
            })
    }

    pub fn dataset(&self) -> DatasetConfig {
        self.dataset.as_ref().cloned().unwrap_or_default()
    }

    pub fn controls(&self) -> ControlsConfig {
        self.controls.as_ref().cloned().unwrap_or_default()
    }

    pub fn export(&self) -> ExportConfig {
        self.export.as_ref().cloned().unwrap_or_default()
    }
}

impl DatasetConfig {
    pub fn path(&self) -> String {
        self.path.as_ref().cloned().unwrap_or(DEFAULT_DATASET_PATH.to_owned())
    }

    pub fn raw_preview(&self) -> bool {
        self.raw_preview.unwrap_or(false)
    }
}

impl ControlsConfig {
    pub fn episode(&self) -> String {
        self.episode.as_ref().cloned().unwrap_or(ALL_EPISODES.to_owned())
    }

    pub fn sentiment(&self) -> SentimentChoice {
        self.sentiment.unwrap_or_default()
    }

    pub fn search(&self) -> Option<&String> {
        self.search.as_ref()
    }

    // slider ranges from the hosting interface, out-of-range values clamp
    pub fn top_n(&self) -> usize {
        self.top_n.unwrap_or(20).clamp(TOP_N_MIN, TOP_N_MAX)
    }

    pub fn min_word_length(&self) -> usize {
        self.min_word_length.unwrap_or(3).clamp(MIN_LENGTH_MIN, MIN_LENGTH_MAX)
    }

    pub fn keyword(&self) -> String {
        self.keyword.as_ref().cloned().unwrap_or(NO_KEYWORD.to_owned())
    }
}

impl ExportConfig {
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    pub fn dir(&self) -> String {
        self.dir.as_ref().cloned().unwrap_or(".".to_owned())
    }
}
