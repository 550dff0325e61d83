//! Session-scoped store: state that lives from page load until navigation

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::events::OperationEvent;

/// One backend operation reported by the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub operation: String,
    /// Timestamp as sent by the server
    pub timestamp: String,
    /// ISO-8601 time the event was received
    pub time: String,
}

/// Ordered log of the operations seen during this page session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationLog {
    records: Vec<OperationRecord>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: OperationEvent, received_at_ms: f64) -> &OperationRecord {
        log::info!(
            "Neo4j Operation: {} completed [{}]",
            event.operation,
            event.timestamp
        );
        self.records.push(OperationRecord {
            operation: event.operation,
            timestamp: event.timestamp,
            time: iso_time(received_at_ms),
        });
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Numbered history lines, also written to the log.
    pub fn show_all(&self) -> Vec<String> {
        if self.records.is_empty() {
            log::info!("No Neo4j operations recorded in this session");
            return Vec::new();
        }

        log::info!("Neo4j Operations History");
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let line = format!("{}. {} [{}]", index + 1, record.operation, record.timestamp);
                log::info!("{line}");
                line
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Everything owned by one page session. Created on page load and cleared
/// when the page is navigated away from.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    pub operations: OperationLog,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.operations.clear();
    }
}

/// Format host clock milliseconds the way `Date.prototype.toISOString` does.
pub fn iso_time(epoch_ms: f64) -> String {
    DateTime::from_timestamp_millis(epoch_ms as i64)
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}
