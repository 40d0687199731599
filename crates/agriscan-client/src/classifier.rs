//! Image classifier backend client.

use agriscan_core::{ClassifiedScan, RawObservation};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use tracing::{debug, info};

use crate::ClientError;
use crate::error::server_error;

#[derive(Serialize)]
struct InferRequest<'a> {
    image: &'a str,
}

/// Sends produce photos to the classifier and decodes its observation and advice.
pub struct ClassifierClient {
    client: reqwest::Client,
    base_url: String,
}

impl ClassifierClient {
    /// `base_url` is like `http://localhost:8000`; a trailing slash is dropped.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/infer-image", self.base_url)
    }

    /// Classify one image. `mime` is its content type, e.g. `image/jpeg`.
    pub async fn classify(
        &self,
        image: &[u8],
        mime: &str,
    ) -> Result<ClassifiedScan, ClientError> {
        let url = self.endpoint();
        let data_url = image_data_url(image, mime);

        info!(url = %url, bytes = image.len(), mime, "sending image to classifier");
        let resp = self
            .client
            .post(&url)
            .json(&InferRequest { image: &data_url })
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(server_error(resp).await);
        }

        let body = resp.text().await?;
        debug!(body = %body, "classifier response");
        let scan = decode_scan(&body)?;
        let observation = &scan.observation;
        info!(
            produce = %observation.produce_label,
            prediction = %observation.model_organic_prediction,
            plu = ?observation.detected_plu.as_ref().map(|c| c.as_str()),
            advice = scan.advice.is_some(),
            "classified image"
        );
        Ok(scan)
    }
}

/// Inline an image as a `data:` URL.
pub fn image_data_url(image: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(image))
}

/// Decode a classifier payload into a validated observation plus its advice.
pub fn decode_scan(body: &str) -> Result<ClassifiedScan, ClientError> {
    let raw: RawObservation = serde_json::from_str(body)?;
    Ok(ClassifiedScan::try_from(raw)?)
}

/// Guess an image's content type from its file extension.
pub fn mime_for_path(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}
