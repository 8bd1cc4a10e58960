//! Application state
//!
//! `AppState` groups repositories, the upload pipeline and auth so handlers
//! extract a single `State<Arc<AppState>>`.

use std::sync::Arc;

use faculty_core::Config;
use faculty_db::{
    AnalyticsRepository, AnnouncementRepository, AssignmentRepository, CourseRepository,
    CvRepository, GalleryRepository, HomeworkRepository, PublicationRepository,
    StudentRepository, UserRepository,
};
use faculty_processing::{AssetCleanup, UploadPipeline};
use faculty_storage::LocalStorage;
use sqlx::PgPool;

use crate::auth::JwtService;
use crate::services::announcements::{AnnouncementService, AnnouncementStore};
use crate::services::homework::{HomeworkService, SubmissionStore};

/// Database pool and one repository per table family.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub user_repository: UserRepository,
    pub announcement_repository: AnnouncementRepository,
    pub course_repository: CourseRepository,
    pub publication_repository: PublicationRepository,
    pub gallery_repository: GalleryRepository,
    pub cv_repository: CvRepository,
    pub student_repository: StudentRepository,
    pub assignment_repository: AssignmentRepository,
    pub homework_repository: HomeworkRepository,
    pub analytics_repository: AnalyticsRepository,
}

impl DbState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            user_repository: UserRepository::new(pool.clone()),
            announcement_repository: AnnouncementRepository::new(pool.clone()),
            course_repository: CourseRepository::new(pool.clone()),
            publication_repository: PublicationRepository::new(pool.clone()),
            gallery_repository: GalleryRepository::new(pool.clone()),
            cv_repository: CvRepository::new(pool.clone()),
            student_repository: StudentRepository::new(pool.clone()),
            assignment_repository: AssignmentRepository::new(pool.clone()),
            homework_repository: HomeworkRepository::new(pool.clone()),
            analytics_repository: AnalyticsRepository::new(pool.clone()),
            pool,
        }
    }
}

/// File intake and removal.
#[derive(Clone)]
pub struct UploadState {
    pub pipeline: UploadPipeline,
    pub cleanup: AssetCleanup,
}

impl UploadState {
    pub fn storage(&self) -> &LocalStorage {
        self.pipeline.storage()
    }
}

pub struct AppState {
    pub config: Config,
    pub db: DbState,
    pub uploads: UploadState,
    pub jwt: JwtService,
    pub homework: HomeworkService,
    pub announcements: AnnouncementService,
}

impl AppState {
    pub fn new(
        config: Config,
        pool: PgPool,
        storage: LocalStorage,
        submissions: Arc<dyn SubmissionStore>,
    ) -> Self {
        let pipeline = UploadPipeline::from_config(storage.clone(), &config);
        let cleanup = AssetCleanup::new(storage);
        let homework = HomeworkService::new(
            submissions,
            pipeline.clone(),
            cleanup.clone(),
            config.max_homework_size_bytes,
        );
        let announcements = AnnouncementService::new(
            Arc::new(AnnouncementRepository::new(pool.clone())),
            cleanup.clone(),
        );

        Self {
            jwt: JwtService::new(&config.jwt_secret, config.jwt_expiry_hours),
            db: DbState::new(pool),
            uploads: UploadState { pipeline, cleanup },
            homework,
            announcements,
            config,
        }
    }

    /// Swap the record store behind announcement deletes.
    pub fn with_announcement_store(mut self, store: Arc<dyn AnnouncementStore>) -> Self {
        self.announcements = AnnouncementService::new(store, self.uploads.cleanup.clone());
        self
    }
}
