use crate::error::{ClientError, Result};
use crate::models::scan::{
    Certificate, PathScanRequest, RuleSetInfo, ScanResult, TextScanRequest,
};
use log::{debug, error};
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// HTTP client for the DArbiter scanning service.
///
/// Every call maps to exactly one request; any non-success status is turned
/// into [`ClientError::Network`] with the body preserved for the operator.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_rulesets(&self) -> Result<Vec<RuleSetInfo>> {
        let url = format!("{}/rulesets", self.base_url);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn scan_path(&self, request: &PathScanRequest) -> Result<ScanResult> {
        let url = format!("{}/scan/path", self.base_url);
        debug!("POST {} path={}", url, request.path);
        let response = self.client.post(&url).json(request).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn scan_text(&self, request: &TextScanRequest) -> Result<ScanResult> {
        let url = format!("{}/scan/text", self.base_url);
        debug!("POST {} ({} bytes)", url, request.content.len());
        let response = self.client.post(&url).json(request).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Uploads the selected files as multipart form data alongside the
    /// configuration fields the service expects.
    pub async fn scan_files(
        &self,
        files: &[impl AsRef<Path>],
        approved_for_ai: bool,
        ruleset: &str,
    ) -> Result<ScanResult> {
        let url = format!("{}/scan/files", self.base_url);
        debug!("POST {} ({} files)", url, files.len());

        let mut form = Form::new()
            .text("approvedForAi", approved_for_ai.to_string())
            .text("ruleset", ruleset.to_string());
        for file in files {
            let path = file.as_ref();
            let bytes = tokio::fs::read(path).await.map_err(|e| {
                ClientError::Validation(format!("cannot read {}: {}", path.display(), e))
            })?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            form = form.part("files", Part::bytes(bytes).file_name(file_name));
        }

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn get_scan(&self, scan_id: &str) -> Result<ScanResult> {
        let url = format!("{}/scan/{}", self.base_url, scan_id);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn certificate(&self, scan_id: &str) -> Result<Certificate> {
        let url = format!("{}/certify/{}", self.base_url, scan_id);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn report_html(&self, scan_id: &str) -> Result<String> {
        let url = format!("{}/report/{}", self.base_url, scan_id);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.text().await?)
    }

    pub async fn certificate_pdf(&self, scan_id: &str) -> Result<Vec<u8>> {
        self.fetch_pdf(format!("{}/certify/{}/pdf", self.base_url, scan_id))
            .await
    }

    pub async fn summary_pdf(&self, scan_id: &str) -> Result<Vec<u8>> {
        self.fetch_pdf(format!("{}/summary/{}/pdf", self.base_url, scan_id))
            .await
    }

    async fn fetch_pdf(&self, url: String) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn check_status(response: Response) -> Result<Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("scan service error {}: {}", status, body);
            // Truncate on char boundaries; the body is service-controlled
            // and may be non-ASCII.
            let snippet: String = body.chars().take(200).collect();
            return Err(ClientError::Network(format!(
                "service returned {}: {}",
                status, snippet
            )));
        }
        Ok(response)
    }
}
