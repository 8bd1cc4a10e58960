//! Collision-resistant file naming
//!
//! Stored names look like `{stem}_{HHMMSSddmmYYYY}_{token}{ext}`. The timestamp
//! keeps names readable for staff browsing the upload folder, the 8 hex digit
//! token keeps two uploads in the same second apart.

use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;

pub const TIMESTAMP_FORMAT: &str = "%H%M%S%d%m%Y";

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait IdSource: Send + Sync {
    /// Eight lowercase hex digits.
    fn token(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdSource;

impl IdSource for RandomIdSource {
    fn token(&self) -> String {
        format!("{:08x}", rand::rng().random::<u32>())
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Tokens `00000001`, `00000002`, ...
#[derive(Debug, Default)]
pub struct SequentialIds(AtomicU32);

impl IdSource for SequentialIds {
    fn token(&self) -> String {
        let next = self.0.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{:08x}", next)
    }
}

#[derive(Clone)]
pub struct UniqueNamer {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
}

impl Default for UniqueNamer {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(RandomIdSource))
    }
}

impl UniqueNamer {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdSource>) -> Self {
        Self { clock, ids }
    }

    /// Derive a stored name from an already sanitized filename.
    pub fn unique_name(&self, sanitized: &str) -> String {
        let path = Path::new(sanitized);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("file");
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();

        format!(
            "{}_{}_{}{}",
            stem,
            self.clock.now().format(TIMESTAMP_FORMAT),
            self.ids.token(),
            extension
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_namer() -> UniqueNamer {
        let instant = Utc.with_ymd_and_hms(2025, 1, 1, 14, 22, 58).unwrap();
        UniqueNamer::new(Arc::new(FixedClock(instant)), Arc::new(SequentialIds::default()))
    }

    #[test]
    fn test_unique_name_format() {
        let namer = test_namer();
        assert_eq!(
            namer.unique_name("ornek_dosya.pdf"),
            "ornek_dosya_14225801012025_00000001.pdf"
        );
    }

    #[test]
    fn test_unique_names_differ_within_same_second() {
        let namer = test_namer();
        let first = namer.unique_name("report.pdf");
        let second = namer.unique_name("report.pdf");
        assert_ne!(first, second);
    }

    #[test]
    fn test_unique_name_without_extension() {
        let namer = test_namer();
        assert_eq!(namer.unique_name("notes"), "notes_14225801012025_00000001");
    }

    #[test]
    fn test_random_tokens_are_eight_hex_digits() {
        let token = RandomIdSource.token();
        assert_eq!(token.len(), 8);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
