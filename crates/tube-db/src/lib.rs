//! # tube-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `tube-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the atomic toggle/counter
//!   transactions for likes, subscriptions, and comment counts
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tube_db::pool::{create_pool, DatabaseConfig};
//! use tube_db::repositories::PgVideoRepository;
//! use tube_core::traits::VideoRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let video_repo = PgVideoRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgCommentRepository, PgLikeRepository, PgSubscriptionRepository, PgUserRepository,
    PgVideoRepository,
};
