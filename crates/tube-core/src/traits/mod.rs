//! Repository traits implemented by the infrastructure layer

pub mod repositories;

pub use repositories::{
    CommentRepository, LikeRepository, RepoResult, SubscriptionRepository, UserRepository,
    VideoQuery, VideoRepository, VideoSortKey,
};
