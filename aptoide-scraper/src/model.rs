use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Metadata scraped from one Aptoide listing page.
///
/// Every field is independently optional and serializes as `null` when the
/// page did not yield it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppMetadata {
    /// App name
    #[schema(example = "WhatsApp Messenger")]
    pub name: Option<String>,
    /// App size
    #[schema(example = "54.3 MB")]
    pub size: Option<String>,
    /// Number of downloads
    #[schema(example = "5B")]
    pub downloads: Option<String>,
    /// App version
    #[schema(example = "2.24.8.85")]
    pub version: Option<String>,
    /// Release date
    #[schema(example = "2024-04-22 10:15:43")]
    pub release_date: Option<String>,
    /// Minimum screen size
    #[schema(example = "SMALL")]
    pub min_screen: Option<String>,
    /// Supported CPU architecture
    #[schema(example = "arm64-v8a, armeabi-v7a, x86, x86_64")]
    pub supported_cpu: Option<String>,
    /// Package identifier
    #[schema(example = "com.whatsapp")]
    pub package_id: Option<String>,
    /// SHA1 signature
    pub sha1_signature: Option<String>,
    /// Developer common name
    #[schema(example = "WhatsApp Inc.")]
    pub developer_cn: Option<String>,
    /// Organization name
    pub organization: Option<String>,
    /// Developer location
    pub local: Option<String>,
    /// Country code
    #[schema(example = "US")]
    pub country: Option<String>,
    /// State/City
    pub state_city: Option<String>,
}

impl AppMetadata {
    /// Replace the package id with the one that was requested.
    pub fn with_package_id(self, package: &str) -> Self {
        Self {
            package_id: Some(package.to_string()),
            ..self
        }
    }

    /// Number of fields that hold a value.
    pub fn populated_count(&self) -> usize {
        [
            &self.name,
            &self.size,
            &self.downloads,
            &self.version,
            &self.release_date,
            &self.min_screen,
            &self.supported_cpu,
            &self.package_id,
            &self.sha1_signature,
            &self.developer_cn,
            &self.organization,
            &self.local,
            &self.country,
            &self.state_city,
        ]
        .iter()
        .filter(|field| field.is_some())
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.populated_count() == 0
    }
}
