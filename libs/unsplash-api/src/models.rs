//! Wire-format DTOs. Field names mirror the JSON the API returns; mapping
//! into application types happens on the caller's side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A photo as returned by `GET /photos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoDto {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub width: u32,
    pub height: u32,
    pub description: Option<String>,
    #[serde(default)]
    pub liked_by_user: bool,
    pub urls: PhotoUrlsDto,
}

/// Per-size asset URLs of a photo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoUrlsDto {
    pub raw: String,
    pub full: String,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

/// The authenticated user's own profile (`GET /me`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeDto {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

/// A public user profile (`GET /users/{username}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub username: String,
    pub profile_image: ProfileImageDto,
}

/// Avatar asset URLs of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileImageDto {
    pub small: String,
    pub medium: String,
    pub large: String,
}

/// OAuth2 token endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDto {
    pub access_token: String,
    pub token_type: String,
    pub scope: String,
    pub created_at: i64,
}
