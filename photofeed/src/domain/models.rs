use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use unsplash_api::{MeDto, PhotoDto};

/// Pixel dimensions of a photo, used for aspect-ratio-preserving layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotoSize {
    pub width: f64,
    pub height: f64,
}

/// A feed entry. Index order within a feed snapshot is append-stable:
/// new pages land at the tail and a like change mutates only `is_liked`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub size: PhotoSize,
    pub created_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub thumb_image_url: String,
    pub full_image_url: String,
    pub is_liked: bool,
}

impl From<PhotoDto> for Photo {
    fn from(dto: PhotoDto) -> Self {
        Self {
            id: dto.id,
            size: PhotoSize {
                width: f64::from(dto.width),
                height: f64::from(dto.height),
            },
            created_at: dto.created_at,
            description: dto.description,
            thumb_image_url: dto.urls.thumb,
            full_image_url: dto.urls.full,
            is_liked: dto.liked_by_user,
        }
    }
}

/// The authenticated user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub name: String,
    pub login_name: String,
    pub bio: Option<String>,
}

impl From<MeDto> for Profile {
    fn from(dto: MeDto) -> Self {
        let name = [dto.first_name, dto.last_name]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            login_name: format!("@{}", dto.username),
            username: dto.username,
            name,
            bio: dto.bio,
        }
    }
}

/// What the profile view renders. Recomputed from [`Profile`] on every
/// update; no lifecycle of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileViewModel {
    pub name: String,
    pub login: String,
    pub bio: Option<String>,
}

impl From<&Profile> for ProfileViewModel {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            login: profile.login_name.clone(),
            bio: profile.bio.clone(),
        }
    }
}
