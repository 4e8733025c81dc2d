//! Per-stream settings.

use crate::time::{DayNumbering, TimeZoneSetting};

/// Rows requested per batch when nothing else is configured.
pub const DEFAULT_BATCH_SIZE: usize = 65_536;

/// Settings fixed for the lifetime of one stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Requested rows per batch. A soft floor: pages are never split, so a
    /// batch may exceed it by up to one page.
    pub batch_size: usize,
    /// Zone used to assign timestamps to calendar days for Date columns.
    pub time_zone: TimeZoneSetting,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            time_zone: TimeZoneSetting::Utc,
        }
    }
}

impl StreamConfig {
    /// Builder: set the batch size. Zero is treated as one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Builder: set the time zone.
    pub fn with_time_zone(mut self, time_zone: TimeZoneSetting) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Batch size with zero normalized to one.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }

    pub fn day_numbering(&self) -> DayNumbering {
        DayNumbering::new(self.time_zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StreamConfig::default();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.time_zone, TimeZoneSetting::Utc);
    }

    #[test]
    fn test_zero_batch_size_normalized() {
        assert_eq!(StreamConfig::default().with_batch_size(0).batch_size, 1);

        let raw = StreamConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert_eq!(raw.effective_batch_size(), 1);
    }

    #[test]
    fn test_time_zone_drives_day_numbering() {
        let config = StreamConfig::default().with_time_zone(TimeZoneSetting::Local);
        assert_eq!(config.day_numbering().zone(), TimeZoneSetting::Local);
    }
}
