// ABOUTME: API usage type definitions
// ABOUTME: Per-day counters and the aggregated summary returned to the admin screen

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counters for one (day, service, endpoint) bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub date: NaiveDate,
    pub service: String,
    pub endpoint: String,
    pub request_count: i64,
    pub tokens_used: i64,
    pub error_count: i64,
    pub total_cost: f64,
    pub last_used: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyUsage {
    pub date: NaiveDate,
    pub usage: Vec<UsageRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageBreakdown {
    pub requests: i64,
    pub tokens: i64,
    pub cost: f64,
    pub errors: i64,
}

impl UsageBreakdown {
    pub(crate) fn add(&mut self, record: &UsageRecord) {
        self.requests += record.request_count;
        self.tokens += record.tokens_used;
        self.cost += record.total_cost;
        self.errors += record.error_count;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub total_requests: i64,
    pub total_tokens: i64,
    pub total_cost: f64,
    pub by_service: BTreeMap<String, UsageBreakdown>,
    pub by_endpoint: BTreeMap<String, UsageBreakdown>,
    /// Newest day first
    pub daily: Vec<DailyUsage>,
}

impl UsageSummary {
    pub(crate) fn from_records(records: Vec<UsageRecord>) -> Self {
        let mut summary = UsageSummary::default();

        for record in &records {
            summary.total_requests += record.request_count;
            summary.total_tokens += record.tokens_used;
            summary.total_cost += record.total_cost;
            summary
                .by_service
                .entry(record.service.clone())
                .or_default()
                .add(record);
            summary
                .by_endpoint
                .entry(record.endpoint.clone())
                .or_default()
                .add(record);
        }

        // Records arrive sorted by date descending
        for record in records {
            match summary.daily.last_mut() {
                Some(day) if day.date == record.date => day.usage.push(record),
                _ => summary.daily.push(DailyUsage {
                    date: record.date,
                    usage: vec![record],
                }),
            }
        }

        summary
    }
}
