use {
    std::{collections::BTreeSet, fs::File, io::Read, path::Path},
    tracing::warn,
    crate::error::DatasetError,
};

pub const TEXT_COLUMN_CANDIDATES: &[&str] = &["text", "comment", "comment_text", "body"];
pub const SENTIMENT_COLUMN_CANDIDATES: &[&str] = &["bert_label_norm", "sentiment", "label"];
// plain `episode` is what our own exports carry, so round trips keep it
pub const EPISODE_COLUMN_CANDIDATES: &[&str] = &["episode_title", "episode"];

pub const DEFAULT_SENTIMENT: &str = "unknown";
pub const DEFAULT_EPISODE: &str = "All comments";
pub const ALL_EPISODES: &str = "All episodes";

// Column order for tables and exports. Internal fields surface as plain
// `episode`/`text`/`sentiment`, passthrough columns only when the CSV has them.
const DISPLAY_COLUMNS: &[&str] = &[
    "episode",
    "author",
    "text",
    "sentiment",
    "bert_score",
    "vader_label",
    "vader_score",
    "published_at",
    "like_count",
];

/// Column layout resolved once at load time. Each logical field picks the
/// first matching candidate from its priority list.
#[derive(Clone, Debug)]
pub struct Schema {
    columns: Vec<String>,
    text_index: usize,
    sentiment_index: Option<usize>,
    episode_index: Option<usize>,
}

impl Schema {
    pub fn resolve(columns: Vec<String>) -> Result<Self, DatasetError> {
        let text_index = Self::first_match(&columns, TEXT_COLUMN_CANDIDATES)
            .ok_or_else(|| DatasetError::MissingColumn {
                accepted: TEXT_COLUMN_CANDIDATES.to_vec(),
            })?;
        let sentiment_index = Self::first_match(&columns, SENTIMENT_COLUMN_CANDIDATES);
        let episode_index = Self::first_match(&columns, EPISODE_COLUMN_CANDIDATES);

        Ok(Self {
            columns,
            text_index,
            sentiment_index,
            episode_index,
        })
    }

    fn first_match(columns: &[String], candidates: &[&str]) -> Option<usize> {
        candidates
            .iter()
            .find_map(|candidate| columns.iter().position(|c| c == candidate))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_sentiment(&self) -> bool {
        self.sentiment_index.is_some()
    }

    pub fn has_episode(&self) -> bool {
        self.episode_index.is_some()
    }
}

/// One comment with its derived fields alongside the untouched source record.
#[derive(Clone, Debug)]
pub struct CommentRow {
    pub text: String,
    pub sentiment: String,
    pub episode: String,
    fields: Vec<String>,
}

impl CommentRow {
    fn from_fields(schema: &Schema, fields: Vec<String>) -> Self {
        let text = fields.get(schema.text_index).cloned().unwrap_or_default();
        let sentiment = schema
            .sentiment_index
            .and_then(|i| fields.get(i))
            .map(|v| v.trim().to_lowercase())
            .unwrap_or_else(|| DEFAULT_SENTIMENT.to_owned());
        let episode = schema
            .episode_index
            .and_then(|i| fields.get(i))
            .cloned()
            .unwrap_or_else(|| DEFAULT_EPISODE.to_owned());

        Self {
            text,
            sentiment,
            episode,
            fields,
        }
    }

    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(|v| v.as_str()).unwrap_or("")
    }
}

/// An immutable, ordered collection of comment rows sharing one schema.
/// Filtering produces derived datasets, the loaded original is never mutated.
#[derive(Clone, Debug)]
pub struct Dataset {
    schema: Schema,
    rows: Vec<CommentRow>,
}

impl Dataset {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let columns: Vec<String> = reader.headers()?.iter().map(|v| v.to_owned()).collect();
        let schema = Schema::resolve(columns)?;

        if !schema.has_sentiment() {
            warn!(
                "no sentiment column found (expected one of: {}), sentiment features will be limited",
                SENTIMENT_COLUMN_CANDIDATES.join(", ")
            );
        }
        if !schema.has_episode() {
            warn!(
                "no episode column (expected one of: {}), treating the dataset as a single episode",
                EPISODE_COLUMN_CANDIDATES.join(", ")
            );
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let fields: Vec<String> = record?.iter().map(|v| v.to_owned()).collect();
            rows.push(CommentRow::from_fields(&schema, fields));
        }

        Ok(Self { schema, rows })
    }

    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                DatasetError::DatasetNotFound {
                    path: path.display().to_string(),
                }
            } else {
                DatasetError::Io(err)
            }
        })?;
        Self::from_reader(file)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[CommentRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.text.as_str())
    }

    /// Derived subset sharing this dataset's schema, in original row order.
    pub fn with_rows(&self, rows: Vec<CommentRow>) -> Self {
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// First `limit` rows of this view as a derived dataset, for raw
    /// previews.
    pub fn preview(&self, limit: usize) -> Self {
        self.with_rows(self.rows.iter().take(limit).cloned().collect())
    }

    /// Distinct episode values, sorted, behind the "All episodes" sentinel.
    pub fn episode_options(&self) -> Vec<String> {
        let distinct: BTreeSet<&str> = self.rows.iter().map(|row| row.episode.as_str()).collect();
        let mut options = vec![ALL_EPISODES.to_owned()];
        options.extend(distinct.into_iter().map(|v| v.to_owned()));
        options
    }

    pub fn display_columns(&self) -> Vec<&'static str> {
        DISPLAY_COLUMNS
            .iter()
            .filter(|name| {
                matches!(**name, "episode" | "text" | "sentiment")
                    || self.schema.column_index(name).is_some()
            })
            .copied()
            .collect()
    }

    pub fn display_value<'a>(&self, row: &'a CommentRow, column: &str) -> &'a str {
        match column {
            "text" => &row.text,
            "sentiment" => &row.sentiment,
            "episode" => &row.episode,
            other => self
                .schema
                .column_index(other)
                .map(|i| row.field(i))
                .unwrap_or(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(csv: &str) -> Dataset {
        Dataset::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn resolves_first_matching_text_candidate() {
        let data = dataset("comment_text,body\nfrom comment_text,from body\n");
        assert_eq!(data.rows()[0].text, "from comment_text");
    }

    #[test]
    fn missing_text_column_lists_accepted_names() {
        let err = Dataset::from_reader("author,score\nalice,3\n".as_bytes()).unwrap_err();
        match err {
            DatasetError::MissingColumn { accepted } => {
                assert_eq!(accepted, TEXT_COLUMN_CANDIDATES.to_vec());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_sentiment_column_defaults_every_row_to_unknown() {
        let data = dataset("text\none\ntwo\nthree\n");
        assert!(!data.schema().has_sentiment());
        assert!(data.rows().iter().all(|row| row.sentiment == DEFAULT_SENTIMENT));
    }

    #[test]
    fn sentiment_values_are_lowercased_and_trimmed() {
        let data = dataset("text,sentiment\nhello,  Positive \n");
        assert_eq!(data.rows()[0].sentiment, "positive");
    }

    #[test]
    fn missing_episode_column_synthesizes_single_episode() {
        let data = dataset("text\nhello\n");
        assert_eq!(data.rows()[0].episode, DEFAULT_EPISODE);
        assert_eq!(data.episode_options(), vec![ALL_EPISODES, DEFAULT_EPISODE]);
    }

    #[test]
    fn episode_options_are_sorted_behind_sentinel() {
        let data = dataset("text,episode_title\na,Ep 2\nb,Ep 1\nc,Ep 2\n");
        assert_eq!(data.episode_options(), vec![ALL_EPISODES, "Ep 1", "Ep 2"]);
    }

    #[test]
    fn display_columns_keep_internal_names_and_existing_passthrough() {
        let data = dataset("text,sentiment,author,like_count\nhello,positive,alice,4\n");
        assert_eq!(
            data.display_columns(),
            vec!["episode", "author", "text", "sentiment", "like_count"]
        );
        let row = &data.rows()[0];
        assert_eq!(data.display_value(row, "author"), "alice");
        assert_eq!(data.display_value(row, "episode"), DEFAULT_EPISODE);
    }

    #[test]
    fn plain_episode_column_resolves_behind_episode_title() {
        let data = dataset("text,episode\nhello,Ep 1\n");
        assert!(data.schema().has_episode());
        assert_eq!(data.rows()[0].episode, "Ep 1");

        let both = dataset("text,episode,episode_title\nhello,wrong,Ep 2\n");
        assert_eq!(both.rows()[0].episode, "Ep 2");
    }

    #[test]
    fn preview_truncates_the_current_view_in_order() {
        let data = dataset("text,episode_title\na,Ep 1\nb,Ep 2\nc,Ep 1\n");
        let preview = data.preview(2);
        assert_eq!(preview.len(), 2);
        assert_eq!(preview.rows()[0].text, "a");
        assert_eq!(preview.rows()[1].episode, "Ep 2");
        assert_eq!(data.preview(10).len(), 3);
    }

    #[test]
    fn short_records_coerce_to_empty_text() {
        let data = dataset("author,text\nalice,hello\nbob\n");
        assert_eq!(data.rows()[1].text, "");
    }
}
