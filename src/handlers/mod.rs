//! HTTP request handlers
//!
//! - `api` - health check and language listing
//! - `delivery` - response dispatch per delivery mode
//! - `speak` - synthesis endpoints
//! - `voices` - voice listing

pub mod api;
pub mod delivery;
pub mod speak;
pub mod voices;
