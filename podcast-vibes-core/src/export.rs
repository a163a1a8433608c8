use {
    crate::{dataset::Dataset, error::DatasetError, filter::SentimentChoice},
};

/// Download name for the currently filtered view, keyed by the active
/// sentiment filter.
pub fn filename(sentiment: SentimentChoice) -> String {
    format!("comments_{}.csv", sentiment.label())
}

/// UTF-8 CSV of the current view, same columns and order as the displayed
/// tables.
pub fn to_csv_bytes(dataset: &Dataset) -> Result<Vec<u8>, DatasetError> {
    let columns = dataset.display_columns();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns)?;
    for row in dataset.rows() {
        writer.write_record(columns.iter().map(|column| dataset.display_value(row, column)))?;
    }

    writer
        .into_inner()
        .map_err(|err| DatasetError::Io(err.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dataset::Dataset,
        filter::{self, FilterParams},
    };

    #[test]
    fn filename_follows_the_sentiment_filter() {
        assert_eq!(filename(SentimentChoice::All), "comments_all.csv");
        assert_eq!(filename(SentimentChoice::Negative), "comments_negative.csv");
    }

    #[test]
    fn export_reparses_to_the_same_view() {
        let data = Dataset::from_reader(
            "text,sentiment,author\n\
             I love this show,positive,alice\n\
             Not my favorite,negative,bob\n\
             I loved episode 3,positive,carol\n"
                .as_bytes(),
        )
        .unwrap();
        let filtered = filter::apply(&data, &FilterParams::builder().query("love").build());

        let bytes = to_csv_bytes(&filtered).unwrap();
        let reparsed = Dataset::from_reader(bytes.as_slice()).unwrap();

        assert_eq!(reparsed.len(), filtered.len());
        for (exported, original) in reparsed.rows().iter().zip(filtered.rows()) {
            assert_eq!(exported.text, original.text);
            assert_eq!(exported.sentiment, original.sentiment);
            assert_eq!(exported.episode, original.episode);
            assert_eq!(
                reparsed.display_value(exported, "author"),
                filtered.display_value(original, "author")
            );
        }
    }

    #[test]
    fn episode_values_survive_an_export_round_trip() {
        let data = Dataset::from_reader(
            "text,sentiment,episode_title\nGreat show,positive,Ep 1\n".as_bytes(),
        )
        .unwrap();
        let bytes = to_csv_bytes(&data).unwrap();
        let reparsed = Dataset::from_reader(bytes.as_slice()).unwrap();

        assert!(reparsed.schema().has_episode());
        assert_eq!(reparsed.display_value(&reparsed.rows()[0], "episode"), "Ep 1");
        assert_eq!(reparsed.episode_options(), data.episode_options());
    }

    #[test]
    fn header_row_uses_display_names() {
        let data = Dataset::from_reader("comment,label\nhi,positive\n".as_bytes()).unwrap();
        let bytes = to_csv_bytes(&data).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("episode,text,sentiment\n"));
    }
}
