//! Catalog data types and content view state.
//!
//! The wire structs mirror the camelCase JSON of the RuStore backend.

use serde::Deserialize;

/// One row of a paged search response.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSummary {
    pub package_name: String,
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub average_user_rating: f64,
    #[serde(default)]
    pub total_ratings: u64,
}

/// A screenshot entry; `ordinal` fixes the display order.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotUrl {
    pub file_url: String,
    #[serde(default)]
    pub ordinal: i64,
}

/// Fully resolved record for one app, fetched lazily per summary.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDetail {
    pub app_id: u64,
    pub app_name: String,
    pub package_name: String,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub file_urls: Vec<ScreenshotUrl>,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub version_name: String,
    #[serde(default)]
    pub version_code: u64,
    #[serde(default)]
    pub min_sdk_version: u32,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub app_ver_updated_at: String,
    #[serde(default)]
    pub first_published_at: String,
}

impl AppDetail {
    /// Screenshots sorted by their explicit ordinal.
    pub fn screenshots(&self) -> Vec<&ScreenshotUrl> {
        let mut shots: Vec<&ScreenshotUrl> = self.file_urls.iter().collect();
        shots.sort_by_key(|s| s.ordinal);
        shots
    }

    /// The backend sometimes reports a "first published" timestamp newer than
    /// the last update; show the older of the two as the added date.
    pub fn added_at(&self) -> &str {
        if self.app_ver_updated_at > self.first_published_at {
            &self.first_published_at
        } else {
            &self.app_ver_updated_at
        }
    }
}

/// One entry of the version-history listing.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub version_name: String,
    #[serde(default)]
    pub app_ver_updated_at: String,
    #[serde(default)]
    pub whats_new: String,
}

/// Resolved download-link payload. The shape of the body varies between app
/// types, so the raw JSON is kept for display and URLs are pulled out of it.
#[derive(Clone, Debug)]
pub struct DownloadInfo {
    pub raw: serde_json::Value,
}

impl DownloadInfo {
    /// Every http(s) URL found anywhere in the payload, in document order.
    pub fn urls(&self) -> Vec<String> {
        let mut urls = Vec::new();
        collect_urls(&self.raw, &mut urls);
        urls
    }

    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_default()
    }
}

fn collect_urls(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::String(s) if s.starts_with("http://") || s.starts_with("https://") => {
            out.push(s.clone());
        }
        serde_json::Value::Array(items) => {
            for item in items {
                collect_urls(item, out);
            }
        }
        serde_json::Value::Object(map) => {
            for item in map.values() {
                collect_urls(item, out);
            }
        }
        _ => {}
    }
}

/// One page of search results.
#[derive(Clone, Debug, Default)]
pub struct SearchPage {
    pub items: Vec<AppSummary>,
    pub total_pages: u32,
}

/// A rendered result card: the summary row plus its resolved detail.
#[derive(Clone, Debug)]
pub struct AppCard {
    pub detail: AppDetail,
    pub summary: AppSummary,
}

/// State for the results area.
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub cards: Vec<AppCard>,
    pub selected: usize,
    pub is_loading: bool,
    pub exhausted: bool,
    /// A completed search found nothing.
    pub no_results: bool,
    /// Initial-page failure; replaces the results when set.
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screenshots_sorted_by_ordinal() {
        let detail = AppDetail {
            file_urls: vec![
                ScreenshotUrl {
                    file_url: "b".to_string(),
                    ordinal: 2,
                },
                ScreenshotUrl {
                    file_url: "a".to_string(),
                    ordinal: 1,
                },
                ScreenshotUrl {
                    file_url: "c".to_string(),
                    ordinal: 3,
                },
            ],
            ..Default::default()
        };

        let order: Vec<&str> = detail
            .screenshots()
            .iter()
            .map(|s| s.file_url.as_str())
            .collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_added_at_prefers_older_timestamp() {
        let detail = AppDetail {
            app_ver_updated_at: "2024-03-01T10:00:00Z".to_string(),
            first_published_at: "2022-07-15T10:00:00Z".to_string(),
            ..Default::default()
        };
        assert_eq!(detail.added_at(), "2022-07-15T10:00:00Z");

        let detail = AppDetail {
            app_ver_updated_at: "2022-07-15T10:00:00Z".to_string(),
            first_published_at: "2024-03-01T10:00:00Z".to_string(),
            ..Default::default()
        };
        assert_eq!(detail.added_at(), "2022-07-15T10:00:00Z");
    }

    #[test]
    fn test_download_info_extracts_nested_urls() {
        let info = DownloadInfo {
            raw: serde_json::json!({
                "apkUrl": "https://static.rustore.ru/app.apk",
                "mirrors": ["http://mirror.example/app.apk", 42],
                "meta": { "homepage": "https://example.org", "size": 1024 }
            }),
        };

        let urls = info.urls();
        assert_eq!(urls.len(), 3);
        assert!(urls.contains(&"https://static.rustore.ru/app.apk".to_string()));
        assert!(urls.contains(&"http://mirror.example/app.apk".to_string()));
        assert!(urls.contains(&"https://example.org".to_string()));
    }

    #[test]
    fn test_detail_deserializes_wire_format() {
        let raw = r#"{
            "appId": 123, "appName": "Calc", "packageName": "ru.example.calc",
            "iconUrl": "https://img/icon.png",
            "shortDescription": "short", "fullDescription": "long",
            "fileUrls": [{"fileUrl": "https://img/1.png", "ordinal": 1}],
            "fileSize": 2048, "versionName": "1.2.3", "versionCode": 42,
            "minSdkVersion": 26, "downloads": 1000,
            "appVerUpdatedAt": "2024-01-01T00:00:00Z",
            "firstPublishedAt": "2023-01-01T00:00:00Z"
        }"#;

        let detail: AppDetail = serde_json::from_str(raw).unwrap();
        assert_eq!(detail.app_id, 123);
        assert_eq!(detail.package_name, "ru.example.calc");
        assert_eq!(detail.min_sdk_version, 26);
        assert_eq!(detail.file_urls.len(), 1);
    }
}
