//! # tube-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    AuthResponse, ChannelCardResponse, ChannelProfileResponse, ChangePasswordRequest,
    CommentResponse, CreateCommentRequest, CurrentUserResponse, HealthResponse, LoginRequest,
    OwnerResponse, PageResponse, PublishVideoRequest, ReadinessResponse, RefreshTokenRequest,
    RegisterRequest, UpdateAccountRequest, UpdateCommentRequest, UpdateVideoRequest,
    VideoResponse,
};
pub use services::{
    AuthService, CommentService, LikeService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, SubscriptionService, UserService, VideoService,
};
