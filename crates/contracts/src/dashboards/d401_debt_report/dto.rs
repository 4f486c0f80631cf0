use serde::{Deserialize, Serialize};

use crate::domain::common::de_amount;

/// Filter for `GET /finance/debts/aging/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtReportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<i64>,
}

/// Khoảng tuổi nợ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgingBucket {
    Days0To30,
    Days31To60,
    Days61To90,
    Over90,
}

impl AgingBucket {
    pub const ALL: [AgingBucket; 4] = [
        AgingBucket::Days0To30,
        AgingBucket::Days31To60,
        AgingBucket::Days61To90,
        AgingBucket::Over90,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AgingBucket::Days0To30 => "0-30",
            AgingBucket::Days31To60 => "31-60",
            AgingBucket::Days61To90 => "61-90",
            AgingBucket::Over90 => "90+",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::Days0To30 => "0-30 ngày",
            AgingBucket::Days31To60 => "31-60 ngày",
            AgingBucket::Days61To90 => "61-90 ngày",
            AgingBucket::Over90 => "Trên 90 ngày",
        }
    }

    pub fn is_overdue(&self) -> bool {
        *self != AgingBucket::Days0To30
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtAgingBuckets {
    #[serde(rename = "0-30", deserialize_with = "de_amount", default)]
    pub d0_30: f64,
    #[serde(rename = "31-60", deserialize_with = "de_amount", default)]
    pub d31_60: f64,
    #[serde(rename = "61-90", deserialize_with = "de_amount", default)]
    pub d61_90: f64,
    #[serde(rename = "90+", deserialize_with = "de_amount", default)]
    pub d90_plus: f64,
}

impl DebtAgingBuckets {
    pub fn get(&self, bucket: AgingBucket) -> f64 {
        match bucket {
            AgingBucket::Days0To30 => self.d0_30,
            AgingBucket::Days31To60 => self.d31_60,
            AgingBucket::Days61To90 => self.d61_90,
            AgingBucket::Over90 => self.d90_plus,
        }
    }

    pub fn add(&mut self, bucket: AgingBucket, amount: f64) {
        let slot = match bucket {
            AgingBucket::Days0To30 => &mut self.d0_30,
            AgingBucket::Days31To60 => &mut self.d31_60,
            AgingBucket::Days61To90 => &mut self.d61_90,
            AgingBucket::Over90 => &mut self.d90_plus,
        };
        *slot += amount;
    }

    pub fn sum(&self) -> f64 {
        AgingBucket::ALL.iter().map(|b| self.get(*b)).sum()
    }

    /// Debt older than 30 days
    pub fn overdue(&self) -> f64 {
        AgingBucket::ALL
            .iter()
            .filter(|b| b.is_overdue())
            .map(|b| self.get(*b))
            .sum()
    }

    /// Percent of `total` per bucket; all zeros when total is not positive.
    pub fn shares(&self, total: f64) -> [(AgingBucket, f64); 4] {
        AgingBucket::ALL.map(|b| {
            let share = if total > 0.0 {
                self.get(b) / total * 100.0
            } else {
                0.0
            };
            (b, share)
        })
    }
}

/// Công nợ của một đại lý theo tuổi nợ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtReport {
    pub agency_id: i64,
    #[serde(default)]
    pub agency_name: String,
    #[serde(deserialize_with = "de_amount")]
    pub total_debt: f64,
    #[serde(default)]
    pub debt_aging_buckets: DebtAgingBuckets,
}

impl DebtReport {
    pub fn overdue(&self) -> f64 {
        self.debt_aging_buckets.overdue()
    }

    pub fn shares(&self) -> [(AgingBucket, f64); 4] {
        self.debt_aging_buckets.shares(self.total_debt)
    }
}

/// The aging endpoint answers with one record when filtered by agency and a list otherwise.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DebtReportResponse {
    Many(Vec<DebtReport>),
    One(DebtReport),
}

impl DebtReportResponse {
    pub fn into_vec(self) -> Vec<DebtReport> {
        match self {
            DebtReportResponse::Many(list) => list,
            DebtReportResponse::One(one) => vec![one],
        }
    }
}

/// Buckets summed over all agencies
pub fn combined_buckets(reports: &[DebtReport]) -> DebtAgingBuckets {
    let mut total = DebtAgingBuckets::default();
    for report in reports {
        for bucket in AgingBucket::ALL {
            total.add(bucket, report.debt_aging_buckets.get(bucket));
        }
    }
    total
}

/// Largest debtors first
pub fn top_debtors(reports: &[DebtReport], limit: usize) -> Vec<DebtReport> {
    let mut sorted = reports.to_vec();
    sorted.sort_by(|a, b| b.total_debt.total_cmp(&a.total_debt));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: i64, total: f64, buckets: [f64; 4]) -> DebtReport {
        DebtReport {
            agency_id: id,
            agency_name: format!("Đại lý {id}"),
            total_debt: total,
            debt_aging_buckets: DebtAgingBuckets {
                d0_30: buckets[0],
                d31_60: buckets[1],
                d61_90: buckets[2],
                d90_plus: buckets[3],
            },
        }
    }

    #[test]
    fn test_overdue_and_shares() {
        let r = report(1, 1000.0, [400.0, 300.0, 200.0, 100.0]);
        assert_eq!(r.overdue(), 600.0);
        let shares = r.shares();
        assert_eq!(shares[0], (AgingBucket::Days0To30, 40.0));
        assert_eq!(shares[3], (AgingBucket::Over90, 10.0));
        assert!(report(2, 0.0, [0.0; 4]).shares().iter().all(|(_, s)| *s == 0.0));
    }

    #[test]
    fn test_response_single_or_list() {
        let one = r#"{"agency_id": 1, "agency_name": "A", "total_debt": "500.00",
            "debt_aging_buckets": {"0-30": 100, "31-60": "200", "61-90": 0, "90+": 200}}"#;
        let parsed: DebtReportResponse = serde_json::from_str(one).unwrap();
        let list = parsed.into_vec();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].debt_aging_buckets.d31_60, 200.0);

        let many = format!("[{one}, {one}]");
        let parsed: DebtReportResponse = serde_json::from_str(&many).unwrap();
        assert_eq!(parsed.into_vec().len(), 2);
    }

    #[test]
    fn test_combined_and_top_debtors() {
        let reports = vec![
            report(1, 100.0, [100.0, 0.0, 0.0, 0.0]),
            report(2, 900.0, [0.0, 400.0, 0.0, 500.0]),
            report(3, 500.0, [250.0, 0.0, 250.0, 0.0]),
        ];
        let total = combined_buckets(&reports);
        assert_eq!(total.sum(), 1500.0);
        assert_eq!(total.overdue(), 1150.0);
        let top: Vec<i64> = top_debtors(&reports, 2).iter().map(|r| r.agency_id).collect();
        assert_eq!(top, vec![2, 3]);
    }
}
