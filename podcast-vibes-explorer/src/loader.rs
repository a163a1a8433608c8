use {
    std::{path::Path, sync::Arc},
    indicatif::ProgressBar,
    tracing::info,
    podcast_vibes_core::{
        cache::DatasetCache,
        config::Config,
        dataset::Dataset,
        error::DatasetError,
    },
};

/// Resolves the configured path (or the bundled demo file) through the
/// dataset cache, so repeated interactions against the same source skip the
/// parse entirely.
pub fn load_dataset(cache: &DatasetCache, config: &Config) -> Result<Arc<Dataset>, DatasetError> {
    let path = config.dataset().path();

    cache.load_or_insert_with(&path, || {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!("loading {}", path));

        let dataset = Dataset::from_path(Path::new(&path))?;
        spinner.finish_and_clear();

        info!("loaded {} comments from {}", dataset.len(), path);
        if !dataset.schema().has_episode() {
            info!("tip: add an episode_title column to enable episode-level filtering");
        }

        Ok(dataset)
    })
}
