//! Database models (SQLx `FromRow` structs)

pub mod comment;
pub mod like;
pub mod subscription;
pub mod user;
pub mod video;

pub use comment::{CommentModel, CommentWithOwnerRow};
pub use like::LikeModel;
pub use subscription::{ChannelCardRow, SubscriptionModel};
pub use user::{ChannelProfileRow, UserModel};
pub use video::{VideoModel, VideoWithOwnerRow};
