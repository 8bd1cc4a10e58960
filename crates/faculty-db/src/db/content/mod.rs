pub mod analytics;
pub mod announcement;
pub mod course;
pub mod cv;
pub mod gallery;
pub mod publication;

pub use analytics::AnalyticsRepository;
pub use announcement::AnnouncementRepository;
pub use course::CourseRepository;
pub use cv::CvRepository;
pub use gallery::GalleryRepository;
pub use publication::PublicationRepository;
