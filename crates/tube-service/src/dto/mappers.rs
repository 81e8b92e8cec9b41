//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use tube_core::entities::{
    ChannelCard, ChannelProfile, Comment, CommentWithOwner, OwnerCard, User, Video,
    VideoWithOwner,
};

use super::responses::{
    ChannelCardResponse, ChannelProfileResponse, CommentResponse, CurrentUserResponse,
    OwnerResponse, VideoResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            avatar_url: user.avatar_url.clone(),
            cover_image_url: user.cover_image_url.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<OwnerCard> for OwnerResponse {
    fn from(owner: OwnerCard) -> Self {
        Self {
            id: owner.id.to_string(),
            username: owner.username,
            full_name: owner.full_name,
            avatar_url: owner.avatar_url,
        }
    }
}

impl From<ChannelProfile> for ChannelProfileResponse {
    fn from(profile: ChannelProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username,
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
            cover_image_url: profile.cover_image_url,
            subscriber_count: profile.subscriber_count,
            subscribed_to_count: profile.subscribed_to_count,
            is_subscribed: profile.is_subscribed,
        }
    }
}

impl From<ChannelCard> for ChannelCardResponse {
    fn from(card: ChannelCard) -> Self {
        Self {
            id: card.id.to_string(),
            username: card.username,
            email: card.email,
            avatar_url: card.avatar_url,
            subscribed_at: card.subscribed_at,
        }
    }
}

// ============================================================================
// Video Mappers
// ============================================================================

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        Self {
            id: video.id.to_string(),
            owner_id: video.owner_id.to_string(),
            title: video.title,
            description: video.description,
            video_url: video.video_url,
            thumbnail_url: video.thumbnail_url,
            duration_seconds: video.duration_seconds,
            published: video.published,
            view_count: video.view_count,
            like_count: video.like_count,
            comment_count: video.comment_count,
            created_at: video.created_at,
            owner: None,
        }
    }
}

impl From<VideoWithOwner> for VideoResponse {
    fn from(joined: VideoWithOwner) -> Self {
        let mut response = Self::from(joined.video);
        response.owner = Some(OwnerResponse::from(joined.owner));
        response
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            video_id: comment.video_id.to_string(),
            owner_id: comment.owner_id.to_string(),
            content: comment.content,
            like_count: comment.like_count,
            created_at: comment.created_at,
            owner: None,
        }
    }
}

impl From<CommentWithOwner> for CommentResponse {
    fn from(joined: CommentWithOwner) -> Self {
        let mut response = Self::from(joined.comment);
        response.owner = Some(OwnerResponse::from(joined.owner));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tube_core::Snowflake;

    #[test]
    fn test_video_with_owner_mapping() {
        let video = Video::new(
            Snowflake::new(10),
            Snowflake::new(20),
            "Title".to_string(),
            "Description".to_string(),
            "/media/v.mp4".to_string(),
            "/media/t.png".to_string(),
            3.5,
        );
        let owner = OwnerCard {
            id: Snowflake::new(20),
            username: "creator".to_string(),
            full_name: "The Creator".to_string(),
            avatar_url: None,
        };

        let response = VideoResponse::from(VideoWithOwner { video, owner });
        assert_eq!(response.id, "10");
        assert_eq!(response.owner_id, "20");
        assert_eq!(response.owner.unwrap().username, "creator");
    }

    #[test]
    fn test_comment_mapping_without_owner() {
        let comment = Comment::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "hi".to_string(),
        );
        let response = CommentResponse::from(comment);
        assert_eq!(response.video_id, "2");
        assert!(response.owner.is_none());
    }
}
