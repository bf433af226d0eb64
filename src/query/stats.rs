use serde::Serialize;

use crate::model::Transaction;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_sale_amount: f64,
    pub total_sold_items: u64,
    pub total_not_sold_items: u64,
}

impl Statistics {
    pub fn from_records(records: &[Transaction]) -> Self {
        records.iter().fold(Self::default(), |mut acc, record| {
            if record.sold {
                acc.total_sale_amount += record.price;
                acc.total_sold_items += 1;
            } else {
                acc.total_not_sold_items += 1;
            }
            acc
        })
    }
}
