//! Like entity <-> model mapper

use tube_core::entities::{Like, LikeTarget};
use tube_core::{DomainError, Snowflake};

use crate::models::LikeModel;

impl TryFrom<LikeModel> for Like {
    type Error = DomainError;

    fn try_from(model: LikeModel) -> Result<Self, Self::Error> {
        let target = match (model.video_id, model.comment_id) {
            (Some(video_id), None) => LikeTarget::Video(Snowflake::new(video_id)),
            (None, Some(comment_id)) => LikeTarget::Comment(Snowflake::new(comment_id)),
            // Unreachable under the CHECK constraint
            _ => {
                return Err(DomainError::DatabaseError(
                    "like row without exactly one target".to_string(),
                ))
            }
        };
        Ok(Like {
            user_id: Snowflake::new(model.user_id),
            target,
            created_at: model.created_at,
        })
    }
}
