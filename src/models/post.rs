//! Incident post and report models

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 行政区划 → 下辖地区（信息流筛选使用）
pub const DIVISIONS: &[(&str, &[&str])] = &[
    ("Dhaka", &["Dhaka", "Gazipur", "Narayanganj", "Tangail"]),
    ("Chittagong", &["Chittagong", "Cox's Bazar", "Bandarban", "Rangamati"]),
    ("Sylhet", &["Sylhet", "Sunamganj", "Moulvibazar", "Habiganj"]),
    ("Rajshahi", &["Rajshahi", "Bogra", "Pabna", "Sirajganj"]),
    ("Khulna", &["Khulna", "Jessore", "Satkhira", "Bagerhat"]),
    ("Barisal", &["Barisal", "Bhola", "Patuakhali", "Pirojpur"]),
    ("Rangpur", &["Rangpur", "Dinajpur", "Kurigram", "Gaibandha"]),
    ("Mymensingh", &["Mymensingh", "Jamalpur", "Netrokona", "Sherpur"]),
];

/// 查找某个行政区下辖的地区
pub fn districts_of(division: &str) -> Option<&'static [&'static str]> {
    DIVISIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(division))
        .map(|(_, districts)| *districts)
}

/// 经纬度坐标
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Validate)]
pub struct GeoPoint {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

/// Post author as shown on a card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

/// Server-confirmed interaction counts
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostStats {
    pub upvotes: i64,
    pub downvotes: i64,
    pub comments: i64,
}

impl PostStats {
    /// 显示的票数基数
    pub fn score(&self) -> i64 {
        self.upvotes - self.downvotes
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[serde(alias = "image")]
    Photo,
    Video,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// 服务端生成的图像描述
    #[serde(default)]
    pub ai_description: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentType {
    SuspiciousActivity,
    Theft,
    Missing,
    Assault,
    Vandalism,
    Fraud,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentStatus {
    #[default]
    Unresolved,
    Investigating,
    Resolved,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

/// Incident post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(deserialize_with = "super::id_from_any")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub user: Author,
    #[serde(default)]
    pub time_ago: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub location: String,
    #[serde(default)]
    pub division: Option<String>,
    pub stats: PostStats,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(default)]
    pub is_editable: bool,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    #[serde(default)]
    pub status: IncidentStatus,
    #[serde(default)]
    pub severity: Severity,
}

/// 信息流排序
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Hot,
    Top,
    New,
    Controversial,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Hot => "hot",
            SortOrder::Top => "top",
            SortOrder::New => "new",
            SortOrder::Controversial => "controversial",
        }
    }
}

/// Feed filters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[validate(schema(function = "validate_feed_region"))]
pub struct FeedQuery {
    pub division: Option<String>,
    pub district: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
    #[validate(range(min = 1))]
    pub page: u32,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            division: None,
            district: None,
            sort: SortOrder::Hot,
            page: 1,
        }
    }
}

impl FeedQuery {
    /// 转换为查询参数
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("sort".to_string(), self.sort.as_str().to_string()),
            ("page".to_string(), self.page.to_string()),
        ];
        if let Some(division) = &self.division {
            params.push(("division".to_string(), division.clone()));
        }
        if let Some(district) = &self.district {
            params.push(("district".to_string(), district.clone()));
        }
        params
    }
}

fn validate_feed_region(query: &FeedQuery) -> Result<(), ValidationError> {
    match (&query.division, &query.district) {
        (None, Some(_)) => Err(ValidationError::new("district_without_division")),
        (Some(division), district) => {
            let districts =
                districts_of(division).ok_or_else(|| ValidationError::new("unknown_division"))?;
            match district {
                Some(d) if !districts.iter().any(|known| known.eq_ignore_ascii_case(d)) => {
                    Err(ValidationError::new("unknown_district"))
                }
                _ => Ok(()),
            }
        }
        (None, None) => Ok(()),
    }
}

/// One page of the feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub posts: Vec<Post>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub total: u64,
}

/// Media attached to a report, sent inline as base64
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct MediaUpload {
    pub kind: MediaKind,
    #[validate(length(min = 1))]
    pub file_name: String,
    /// base64 编码的文件内容
    #[validate(length(min = 1))]
    pub content: String,
}

impl MediaUpload {
    /// 从原始字节构建（按扩展名判断图片或视频）
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Self {
        let lower = file_name.to_lowercase();
        let kind = if [".mp4", ".mov", ".webm", ".mkv"]
            .iter()
            .any(|ext| lower.ends_with(ext))
        {
            MediaKind::Video
        } else {
            MediaKind::Photo
        };

        Self {
            kind,
            file_name: file_name.to_string(),
            content: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// New incident report
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IncidentReport {
    #[validate(length(min = 10, message = "Title must be at least 10 characters"))]
    pub title: String,
    #[validate(length(min = 50, message = "Description must be at least 50 characters"))]
    pub description: String,
    pub crime_time: DateTime<Utc>,
    #[validate(nested)]
    pub location: GeoPoint,
    #[serde(default)]
    pub address: Option<String>,
    pub incident_type: IncidentType,
    #[validate(
        length(min = 1, message = "At least one photo or video is required"),
        nested
    )]
    pub media: Vec<MediaUpload>,
}
