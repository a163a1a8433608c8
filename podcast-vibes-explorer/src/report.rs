use {
    std::{fs, path::Path},
    anyhow::Result,
    tracing::info,
    podcast_vibes_core::{
        aggregate::SentimentBreakdown,
        cache::KeywordCache,
        dataset::Dataset,
        export,
        filter::{self, SentimentChoice, SENTIMENT_LABELS},
        keywords::{self, KeywordCount, KeywordParams},
    },
};

const RAW_PREVIEW_ROWS: usize = 50;

/// KPI block: total comments plus the share of each real sentiment label.
/// Without a sentiment column the percentages are meaningless, so they
/// render as a dash.
pub fn overview(view: &Dataset) {
    println!("== Overview ==");
    println!("Total comments: {}", view.len());

    if view.schema().has_sentiment() {
        let breakdown = SentimentBreakdown::of(view);
        for label in SENTIMENT_LABELS {
            println!("{} %: {:.1}", label, breakdown.percentage_for(label));
        }
    } else {
        for label in SENTIMENT_LABELS {
            println!("{} %: —", label);
        }
    }
    println!();
}

/// Bar-chart input: one row per label with the (label, count, percentage)
/// tooltip triple, descending by count, also emitted as JSON for the
/// hosting chart layer.
pub fn sentiment_distribution(view: &Dataset) -> Result<()> {
    let breakdown = SentimentBreakdown::of(view);

    println!("== Sentiment distribution ==");
    if breakdown.slices().is_empty() {
        println!("No rows to chart.");
        println!();
        return Ok(());
    }

    for slice in breakdown.slices() {
        println!("{}\t{}\t{:.2}%", slice.label, slice.count, slice.percentage);
    }
    println!("chart data: {}", serde_json::to_string(breakdown.slices())?);
    println!();
    Ok(())
}

/// Top-N keyword tables: one per real sentiment label, or a single combined
/// table when the dataset carries no labels.
pub fn keyword_tables(view: &Dataset, cache: &KeywordCache, params: &KeywordParams) {
    println!("== Keywords (top {}, min length {}) ==", params.top_n, params.min_length);

    if view.schema().has_sentiment() {
        for (label, ranked) in cache.by_sentiment(view, params) {
            println!("-- {} --", label);
            print_keywords(&ranked);
        }
    } else {
        info!("no sentiment column detected, showing keywords for all comments combined");
        let ranked = cache.top_keywords(view.texts(), params);
        print_keywords(&ranked);
    }
    println!();
}

fn print_keywords(ranked: &[KeywordCount]) {
    if ranked.is_empty() {
        println!("No keywords found.");
        return;
    }
    for entry in ranked {
        println!("{}\t{}", entry.keyword, entry.count);
    }
}

/// Narrows the view to comments containing the chosen keyword and lists
/// them. The selector options come from the top-50 keywords of the whole
/// view at the active minimum word length.
pub fn keyword_drilldown(view: &Dataset, keyword: &str, min_length: usize) {
    let options = keywords::drilldown_options(view, min_length);
    println!("== Keyword drilldown ==");
    println!("keyword options: {}", options.join(", "));

    if !options.iter().any(|option| option == keyword) {
        info!("keyword {:?} is not among the current options, showing it anyway", keyword);
    }

    let matches = filter::drilldown(view, keyword);
    println!("Matching comments: {}", matches.len());
    print_table(&matches);
    println!();
}

/// The explore table: the current view after the sentiment radio and the
/// free-text search box.
pub fn explore(view: &Dataset) {
    println!("== Explore comments ==");
    println!("Showing {} comments", view.len());
    print_table(view);
    println!();
}

pub fn export_view(view: &Dataset, sentiment: SentimentChoice, dir: &str) -> Result<()> {
    let bytes = export::to_csv_bytes(view)?;
    let path = Path::new(dir).join(export::filename(sentiment));
    fs::write(&path, bytes)?;
    info!("exported {} rows to {}", view.len(), path.display());
    Ok(())
}

pub fn raw_preview(view: &Dataset) {
    println!("== Raw data preview (first {} rows) ==", RAW_PREVIEW_ROWS);
    print_table(&view.preview(RAW_PREVIEW_ROWS));
    println!();
}

fn print_table(view: &Dataset) {
    let columns = view.display_columns();
    println!("{}", columns.join("\t"));
    for row in view.rows() {
        let values: Vec<&str> = columns
            .iter()
            .map(|column| view.display_value(row, column))
            .collect();
        println!("{}", values.join("\t"));
    }
}
