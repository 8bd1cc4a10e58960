pub mod analytics;
pub mod announcement;
pub mod course;
pub mod cv;
pub mod gallery;
pub mod homework;
pub mod publication;
pub mod student;
pub mod upload;
pub mod user;

pub use analytics::*;
pub use announcement::*;
pub use course::*;
pub use cv::*;
pub use gallery::*;
pub use homework::*;
pub use publication::*;
pub use student::*;
pub use upload::*;
pub use user::*;

use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_PAGE_LIMIT: i64 = 100;
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// `skip`/`limit` pagination shared by the public listing endpoints.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Pagination {
    pub fn from_parts(skip: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        }
    }

    /// Offset and limit clamped to sane bounds.
    pub fn bounds(&self) -> (i64, i64) {
        (self.skip.max(0), self.limit.clamp(1, MAX_PAGE_LIMIT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_bounds_are_clamped() {
        let page = Pagination {
            skip: -5,
            limit: 50_000,
        };
        assert_eq!(page.bounds(), (0, MAX_PAGE_LIMIT));

        let page = Pagination { skip: 10, limit: 0 };
        assert_eq!(page.bounds(), (10, 1));
    }

    #[test]
    fn test_pagination_from_parts_defaults() {
        let page = Pagination::from_parts(None, None);
        assert_eq!(page.bounds(), (0, DEFAULT_PAGE_LIMIT));
    }
}
