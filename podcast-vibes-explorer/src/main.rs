use {
    anyhow::Result,
    tracing::info,
    podcast_vibes_core::{
        cache::{DatasetCache, KeywordCache},
        config::Config,
        filter::{self, FilterParams},
        keywords::KeywordParams,
    },
    crate::{
        loader::load_dataset,
        utils::init_logging,
    },
};

mod loader;
mod report;
mod utils;

fn main() -> Result<()> {
    init_logging();

    info!("podcast sentiment explorer");

    let config = Config::load();
    let controls = config.controls();

    let cache = DatasetCache::new();
    let keyword_cache = KeywordCache::new();

    let dataset = load_dataset(&cache, &config)?;

    // episode selection narrows everything downstream, the other controls
    // only narrow the explore/export view
    let view = filter::apply(
        &dataset,
        &FilterParams::builder().episode(controls.episode()).build(),
    );

    let params = KeywordParams::builder()
        .top_n(controls.top_n())
        .min_length(controls.min_word_length())
        .build();

    report::overview(&view);
    report::sentiment_distribution(&view)?;
    report::keyword_tables(&view, &keyword_cache, &params);
    report::keyword_drilldown(&view, &controls.keyword(), controls.min_word_length());

    let sentiment = filter::effective_sentiment(&view, controls.sentiment());
    if sentiment != controls.sentiment() {
        info!("sentiment filter disabled (no sentiment column found)");
    }

    let mut explore = FilterParams::builder().sentiment(sentiment).build();
    explore.query = controls.search().cloned();
    let explored = filter::apply(&view, &explore);
    report::explore(&explored);

    if config.export().enabled() {
        report::export_view(&explored, sentiment, &config.export().dir())?;
    }

    if config.dataset().raw_preview() {
        report::raw_preview(&view);
    }

    Ok(())
}
