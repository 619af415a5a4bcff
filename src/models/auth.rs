//! Authentication and profile models

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use super::post::GeoPoint;

/// 国际格式手机号（可带 +，10-15 位数字）
pub static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").unwrap());

/// 六位数字验证码
pub static OTP_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").unwrap());

/// Account verification state
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VerifiedStatus {
    #[default]
    Unverified,
    Pending,
    Verified,
}

impl VerifiedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifiedStatus::Unverified => "unverified",
            VerifiedStatus::Pending => "pending",
            VerifiedStatus::Verified => "verified",
        }
    }
}

impl From<&str> for VerifiedStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "verified" => VerifiedStatus::Verified,
            "pending" => VerifiedStatus::Pending,
            _ => VerifiedStatus::Unverified,
        }
    }
}

/// Login request
#[derive(Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration request (collected by the multi-step signup flow)
#[derive(Clone, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
    #[validate(length(min = 3, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(regex(path = *PHONE_PATTERN, message = "Invalid phone number"))]
    pub phone: String,
    #[validate(nested)]
    pub location: GeoPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("phone", &self.phone)
            .field("location", &self.location)
            .finish()
    }
}

/// Login / registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
    pub user: UserProfile,
}

/// Token refresh request
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Token refresh response; some servers rotate the refresh token too
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// User profile as returned by the profile endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(deserialize_with = "super::id_from_any")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub verified_status: VerifiedStatus,
}

impl UserProfile {
    /// 展示名：优先名字，否则用户名
    pub fn display_name(&self) -> String {
        if self.first_name.trim().is_empty() {
            self.username.clone()
        } else {
            self.first_name.clone()
        }
    }
}

/// Profile update (PATCH, only present fields are sent)
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 150))]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 150))]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 150))]
    pub username: Option<String>,
}

/// Verification channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OtpType {
    Email,
    Phone,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendOtpRequest {
    pub otp_type: OtpType,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(regex(path = *OTP_PATTERN, message = "Verification code must be 6 digits"))]
    pub otp_code: String,
    pub otp_type: OtpType,
}
