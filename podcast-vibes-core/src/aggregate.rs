use {
    std::collections::HashMap,
    serde::Serialize,
    crate::dataset::Dataset,
};

/// One bar of the sentiment distribution, also the chart tooltip payload.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SentimentSlice {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

/// Sparse per-label counts over the current (possibly filtered) dataset.
/// Labels with zero rows are simply absent, lookups default to zero.
#[derive(Clone, Debug, Default)]
pub struct SentimentBreakdown {
    slices: Vec<SentimentSlice>,
    total: usize,
}

impl SentimentBreakdown {
    pub fn of(dataset: &Dataset) -> Self {
        let total = dataset.len();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for row in dataset.rows() {
            let entry = counts.entry(row.sentiment.as_str()).or_insert(0);
            if *entry == 0 {
                order.push(&row.sentiment);
            }
            *entry += 1;
        }

        let mut slices: Vec<SentimentSlice> = order
            .into_iter()
            .map(|label| {
                let count = counts[label];
                SentimentSlice {
                    label: label.to_owned(),
                    count,
                    percentage: percentage_of(count, total),
                }
            })
            .collect();
        // stable sort keeps first-encountered order on equal counts
        slices.sort_by(|a, b| b.count.cmp(&a.count));

        Self { slices, total }
    }

    pub fn slices(&self) -> &[SentimentSlice] {
        &self.slices
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count_for(&self, label: &str) -> usize {
        self.slices
            .iter()
            .find(|slice| slice.label == label)
            .map(|slice| slice.count)
            .unwrap_or(0)
    }

    pub fn percentage_for(&self, label: &str) -> f64 {
        self.slices
            .iter()
            .find(|slice| slice.label == label)
            .map(|slice| slice.percentage)
            .unwrap_or(0.0)
    }
}

/// count / total × 100, rounded to 2 decimals. A zero total yields 0.0.
pub fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn dataset(csv: &str) -> Dataset {
        Dataset::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn two_labels_split_fifty_fifty() {
        let data = dataset(
            "text,sentiment\nGreat episode!,Positive\nTerrible audio quality,Negative\n",
        );
        let breakdown = SentimentBreakdown::of(&data);
        assert_eq!(breakdown.count_for("positive"), 1);
        assert_eq!(breakdown.percentage_for("positive"), 50.0);
        assert_eq!(breakdown.count_for("negative"), 1);
        assert_eq!(breakdown.percentage_for("negative"), 50.0);
    }

    #[test]
    fn counts_sum_to_the_current_total() {
        let data = dataset(
            "text,sentiment\na,positive\nb,positive\nc,neutral\nd,negative\ne,weird\n",
        );
        let breakdown = SentimentBreakdown::of(&data);
        let sum: usize = breakdown.slices().iter().map(|slice| slice.count).sum();
        assert_eq!(sum, data.len());
        assert_eq!(breakdown.total(), data.len());
    }

    #[test]
    fn empty_dataset_yields_no_slices_and_no_division_error() {
        let data = dataset("text,sentiment\n");
        let breakdown = SentimentBreakdown::of(&data);
        assert!(breakdown.slices().is_empty());
        assert_eq!(breakdown.percentage_for("positive"), 0.0);
    }

    #[test]
    fn absent_labels_look_up_as_zero() {
        let data = dataset("text,sentiment\na,positive\n");
        let breakdown = SentimentBreakdown::of(&data);
        assert_eq!(breakdown.count_for("neutral"), 0);
        assert_eq!(breakdown.percentage_for("neutral"), 0.0);
    }

    #[test]
    fn percentages_round_to_two_decimals() {
        assert_eq!(percentage_of(1, 3), 33.33);
        assert_eq!(percentage_of(2, 3), 66.67);
        assert_eq!(percentage_of(0, 0), 0.0);
    }

    #[test]
    fn slices_are_ordered_by_descending_count() {
        let data = dataset("text,sentiment\na,neutral\nb,positive\nc,positive\n");
        let breakdown = SentimentBreakdown::of(&data);
        let labels: Vec<&str> = breakdown.slices().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["positive", "neutral"]);
    }
}
