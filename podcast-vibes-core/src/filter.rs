use {
    serde::Deserialize,
    typed_builder::TypedBuilder,
    crate::dataset::{Dataset, ALL_EPISODES},
};

/// Drilldown sentinel meaning "no keyword selected".
pub const NO_KEYWORD: &str = "(none)";

/// The real sentiment labels, in presentation order.
pub const SENTIMENT_LABELS: &[&str] = &["positive", "neutral", "negative"];

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SentimentChoice {
    #[default]
    All,
    Positive,
    Neutral,
    Negative,
}

impl SentimentChoice {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// The three row predicates of one interaction. Each is independent and
/// optional, applying them in any order yields the same subset.
#[derive(TypedBuilder, Clone, Debug, Default)]
pub struct FilterParams {
    #[builder(default, setter(strip_option, into))]
    pub episode: Option<String>,
    #[builder(default)]
    pub sentiment: SentimentChoice,
    #[builder(default, setter(strip_option, into))]
    pub query: Option<String>,
}

/// Case-insensitive substring containment, the predicate shared by free-text
/// search and keyword drilldown. Empty text never matches a non-empty needle.
pub fn text_contains(text: &str, needle: &str) -> bool {
    text.to_lowercase().contains(&needle.to_lowercase())
}

pub fn apply(dataset: &Dataset, params: &FilterParams) -> Dataset {
    let episode = params
        .episode
        .as_deref()
        .filter(|choice| *choice != ALL_EPISODES);
    let query = params
        .query
        .as_deref()
        .map(|q| q.trim())
        .filter(|q| !q.is_empty());

    let rows = dataset
        .rows()
        .iter()
        .filter(|row| episode.map_or(true, |choice| row.episode == choice))
        .filter(|row| match params.sentiment {
            SentimentChoice::All => true,
            choice => row.sentiment == choice.label(),
        })
        .filter(|row| query.map_or(true, |q| text_contains(&row.text, q)))
        .cloned()
        .collect();

    dataset.with_rows(rows)
}

/// The sentiment radio degrades to "all" when the dataset carries no real
/// labels, matching the disabled control in the hosting interface.
pub fn effective_sentiment(dataset: &Dataset, choice: SentimentChoice) -> SentimentChoice {
    if dataset.schema().has_sentiment() {
        choice
    } else {
        SentimentChoice::All
    }
}

/// Keyword drilldown: the text-search predicate invoked with a chosen
/// keyword, or the unchanged dataset for the "(none)" sentinel.
pub fn drilldown(dataset: &Dataset, keyword: &str) -> Dataset {
    if keyword == NO_KEYWORD {
        return dataset.clone();
    }
    apply(dataset, &FilterParams::builder().query(keyword).build())
}
