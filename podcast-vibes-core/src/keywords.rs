use {
    std::collections::{HashMap, HashSet},
    once_cell::sync::Lazy,
    regex::Regex,
    serde::Serialize,
    typed_builder::TypedBuilder,
    crate::{dataset::Dataset, filter::NO_KEYWORD},
};

pub const TOP_N_MIN: usize = 5;
pub const TOP_N_MAX: usize = 50;
pub const MIN_LENGTH_MIN: usize = 2;
pub const MIN_LENGTH_MAX: usize = 6;

/// How many keywords the drilldown selector is built from.
const DRILLDOWN_POOL: usize = 50;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+|www\.\S+").unwrap());
static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z']+").unwrap());

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    "a an and are as at be but by for from has have he her hers him his i if in into is it its
     just me my no not of on or our ours she so that the their them then there these they this to
     too up was we were what when where which who will with you your yours"
        .split_whitespace()
        .collect()
});

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

#[derive(TypedBuilder, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeywordParams {
    #[builder(default = 20)]
    pub top_n: usize,
    #[builder(default = 3)]
    pub min_length: usize,
}

impl Default for KeywordParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Lowercases, blanks out URL spans (replaced with a space so tokens on
/// either side don't fuse), then takes maximal runs of ASCII letters and
/// apostrophes. Digits and punctuation separate tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = URL_PATTERN.replace_all(&lowered, " ");
    WORD_PATTERN
        .find_iter(&cleaned)
        .map(|m| m.as_str().to_owned())
        .collect()
}

/// Top-N keyword frequencies across all texts combined. Purely a function of
/// the inputs and the fixed stopword set; ties keep first-appearance order
/// via the stable sort.
pub fn top_keywords<'a, I>(texts: I, params: &KeywordParams) -> Vec<KeywordCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for text in texts {
        for token in tokenize(text) {
            if token.len() < params.min_length {
                continue;
            }
            if STOPWORDS.contains(token.as_str()) {
                continue;
            }
            // the tokenizer never emits digit runs, but drop them if one
            // arrives anyway
            if token.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let entry = counts.entry(token.clone()).or_insert(0);
            if *entry == 0 {
                order.push(token);
            }
            *entry += 1;
        }
    }

    let mut ranked: Vec<KeywordCount> = order
        .into_iter()
        .map(|keyword| {
            let count = counts[&keyword];
            KeywordCount { keyword, count }
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(params.top_n);
    ranked
}

/// Comment texts carrying the given sentiment label, for per-partition
/// keyword tables.
pub fn texts_with_label<'a>(dataset: &'a Dataset, label: &'a str) -> impl Iterator<Item = &'a str> {
    dataset
        .rows()
        .iter()
        .filter(move |row| row.sentiment == label)
        .map(|row| row.text.as_str())
}

/// Options for the drilldown selector: the "(none)" sentinel followed by the
/// top keywords of the whole current view at the active minimum length.
pub fn drilldown_options(dataset: &Dataset, min_length: usize) -> Vec<String> {
    let params = KeywordParams::builder()
        .top_n(DRILLDOWN_POOL)
        .min_length(min_length)
        .build();
    let mut options = vec![NO_KEYWORD.to_owned()];
    options.extend(top_keywords(dataset.texts(), &params).into_iter().map(|k| k.keyword));
    options
}
