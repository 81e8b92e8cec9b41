//! PostgreSQL repository implementations

pub mod comment;
pub mod error;
pub mod like;
pub mod subscription;
pub mod user;
pub mod video;

pub use comment::PgCommentRepository;
pub use like::PgLikeRepository;
pub use subscription::PgSubscriptionRepository;
pub use user::PgUserRepository;
pub use video::PgVideoRepository;
