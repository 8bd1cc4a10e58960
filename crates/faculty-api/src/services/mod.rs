pub mod announcements;
pub mod homework;
