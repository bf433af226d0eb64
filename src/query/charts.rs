use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::model::Transaction;

pub const BUCKET_LABELS: [&str; 10] = [
    "0-100",
    "101-200",
    "201-300",
    "301-400",
    "401-500",
    "501-600",
    "601-700",
    "701-800",
    "801-900",
    "901-above",
];

/// Index into [`BUCKET_LABELS`] for a price.
///
/// Each bucket includes its upper bound; everything above 900 lands in the
/// last, open-ended bucket.
pub fn bucket_index(price: f64) -> usize {
    (0..BUCKET_LABELS.len() - 1)
        .find(|&i| price <= ((i + 1) * 100) as f64)
        .unwrap_or(BUCKET_LABELS.len() - 1)
}

/// Price histogram. All ten buckets are always present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarChart {
    counts: [u64; 10],
}

impl BarChart {
    pub fn from_records(records: &[Transaction]) -> Self {
        let mut chart = Self::default();
        for record in records {
            chart.counts[bucket_index(record.price)] += 1;
        }
        chart
    }

    pub fn count(&self, label: &str) -> Option<u64> {
        BUCKET_LABELS
            .iter()
            .position(|candidate| *candidate == label)
            .map(|i| self.counts[i])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        BUCKET_LABELS.iter().copied().zip(self.counts.iter().copied())
    }
}

impl Serialize for BarChart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(BUCKET_LABELS.len()))?;
        for (label, count) in self.iter() {
            map.serialize_entry(label, &count)?;
        }
        map.end()
    }
}

/// Category counts in first-seen order. Categories with no records are
/// absent, unlike the bar chart's buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieChart {
    entries: Vec<(String, u64)>,
}

impl PieChart {
    pub fn from_records(records: &[Transaction]) -> Self {
        let mut chart = Self::default();
        for record in records {
            match chart
                .entries
                .iter_mut()
                .find(|(category, _)| *category == record.category)
            {
                Some((_, count)) => *count += 1,
                None => chart.entries.push((record.category.clone(), 1)),
            }
        }
        chart
    }

    pub fn get(&self, category: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == category)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries
            .iter()
            .map(|(category, count)| (category.as_str(), *count))
    }
}

impl Serialize for PieChart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, count) in &self.entries {
            map.serialize_entry(category, count)?;
        }
        map.end()
    }
}
