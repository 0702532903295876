//! Version history and download-link modal fetches.
//!
//! These endpoints sit outside the search session: they are fetched in the
//! background without a cancellation token, and their results are dropped by
//! the model if the user has opened a different modal in the meantime.

use super::AppController;

impl AppController {
    pub async fn show_version_history(&self, app_id: u64, app_name: String) {
        {
            let model = self.model.lock().await;
            model.open_version_history(app_name.clone()).await;
        }

        let controller = self.clone();
        tokio::spawn(async move {
            let result = controller.api.version_history(app_id).await;
            let model = controller.model.lock().await;
            match result {
                Ok(entries) => {
                    tracing::info!(app_id, count = entries.len(), "Version history loaded");
                    model.set_version_history(&app_name, entries).await;
                }
                Err(e) => {
                    tracing::error!(app_id, error = %e, "Failed to fetch version history");
                    model
                        .set_version_history_error(
                            &app_name,
                            "Unable to load version history".to_string(),
                        )
                        .await;
                }
            }
        });
    }

    pub async fn request_download_link(&self, app_id: u64, app_name: String) {
        {
            let model = self.model.lock().await;
            model.open_download(app_name.clone()).await;
        }

        let controller = self.clone();
        tokio::spawn(async move {
            let result = controller.api.download_link(app_id).await;
            let model = controller.model.lock().await;
            match result {
                Ok(Some(info)) => {
                    tracing::info!(app_id, urls = info.urls().len(), "Download link resolved");
                    model.set_download(&app_name, info).await;
                }
                Ok(None) => {
                    tracing::info!(app_id, "No download link available");
                    model
                        .set_download_error(&app_name, "No download link available".to_string())
                        .await;
                }
                Err(e) => {
                    tracing::error!(app_id, error = %e, "Failed to resolve download link");
                    model
                        .set_download_error(
                            &app_name,
                            "Unable to obtain download URLs".to_string(),
                        )
                        .await;
                }
            }
        });
    }
}
