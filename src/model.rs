use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored product transaction.
///
/// `id` is assigned by the record store in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub sold: bool,
    #[serde(with = "sale_date")]
    pub date_of_sale: DateTime<Utc>,
}

/// A transaction as delivered by the ingestion source, before the store
/// has assigned it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub sold: bool,
    #[serde(with = "sale_date")]
    pub date_of_sale: DateTime<Utc>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), String> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!(
                "'{}': price must be a non-negative number, got {}",
                self.title, self.price
            ));
        }
        if self.category.trim().is_empty() {
            return Err(format!("'{}': category must not be empty", self.title));
        }
        Ok(())
    }

    pub fn into_transaction(self, id: u64) -> Transaction {
        Transaction {
            id,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            image: self.image,
            sold: self.sold,
            date_of_sale: self.date_of_sale,
        }
    }
}

/// `dateOfSale` (de)serialization.
///
/// Accepts RFC 3339 timestamps with any offset, offset-less timestamps and
/// bare `YYYY-MM-DD` dates; the latter two are read as UTC. Always writes
/// RFC 3339 in UTC with millisecond precision.
pub mod sale_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid dateOfSale '{raw}'")))
    }
}
