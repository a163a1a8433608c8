use {
    std::{
        collections::HashMap,
        io::Cursor,
        sync::{Arc, RwLock},
    },
    crate::{
        dataset::Dataset,
        error::DatasetError,
        filter::SENTIMENT_LABELS,
        keywords::{self, KeywordCount, KeywordParams},
    },
};

/// Loaded datasets keyed by source identity (path or upload name). Entries
/// are inserted once and never mutated afterwards, readers share them via
/// `Arc` so repeated interactions skip the re-parse.
#[derive(Default)]
pub struct DatasetCache {
    entries: RwLock<HashMap<String, Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_or_insert_with<F>(&self, source: &str, load: F) -> Result<Arc<Dataset>, DatasetError>
    where
        F: FnOnce() -> Result<Dataset, DatasetError>,
    {
        if let Some(found) = self.entries.read().unwrap().get(source) {
            return Ok(found.clone());
        }
        let dataset = Arc::new(load()?);
        self.entries
            .write()
            .unwrap()
            .insert(source.to_owned(), dataset.clone());
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
struct KeywordCacheKey {
    fingerprint: u128,
    params: KeywordParams,
}

/// Keyword extraction is a pure function of (texts, top_n, min_length), so
/// results memoize under a corpus fingerprint plus the parameters.
#[derive(Default)]
pub struct KeywordCache {
    entries: RwLock<HashMap<KeywordCacheKey, Arc<Vec<KeywordCount>>>>,
}

impl KeywordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top_keywords<'a, I>(&self, texts: I, params: &KeywordParams) -> Arc<Vec<KeywordCount>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let texts: Vec<&str> = texts.into_iter().collect();
        let key = KeywordCacheKey {
            fingerprint: corpus_fingerprint(&texts),
            params: *params,
        };

        if let Some(found) = self.entries.read().unwrap().get(&key) {
            return found.clone();
        }
        let ranked = Arc::new(keywords::top_keywords(texts, params));
        self.entries.write().unwrap().insert(key, ranked.clone());
        ranked
    }

    /// One memoized keyword table per real sentiment label, in presentation
    /// order. Labels absent from the dataset yield empty tables.
    pub fn by_sentiment(
        &self,
        dataset: &Dataset,
        params: &KeywordParams,
    ) -> Vec<(&'static str, Arc<Vec<KeywordCount>>)> {
        SENTIMENT_LABELS
            .iter()
            .map(|label| {
                let ranked = self.top_keywords(keywords::texts_with_label(dataset, label), params);
                (*label, ranked)
            })
            .collect()
    }
}

// murmur3 over each text, position-mixed so reorderings fingerprint
// differently. Reading from an in-memory cursor cannot fail.
fn corpus_fingerprint(texts: &[&str]) -> u128 {
    let mut acc: u128 = texts.len() as u128;
    for (index, text) in texts.iter().enumerate() {
        let hash = murmur3::murmur3_x64_128(&mut Cursor::new(text.as_bytes()), index as u32).unwrap();
        acc = acc.rotate_left(13) ^ hash;
    }
    acc
}
