//! Data package client for the Academy Awards nominations dataset
//!
//! Reads the `datapackage.json` descriptor, picks the resource whose
//! `datahub.type` matches (the derived CSV export by default), downloads it
//! and casts each cell using the resource's table schema.

use super::AwardsSource;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = "oscars-ranker/0.1.0";

/// Data package client errors
#[derive(Debug, Error)]
pub enum AwardsSourceError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("No resource of type '{0}' in data package")]
    ResourceNotFound(String),
}

/// `datapackage.json` descriptor (only the parts we read)
#[derive(Debug, Clone, Deserialize)]
pub struct DataPackage {
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub datahub: Option<DatahubInfo>,
    #[serde(default)]
    pub schema: Option<TableSchema>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatahubInfo {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl Resource {
    fn kind(&self) -> Option<&str> {
        self.datahub.as_ref().and_then(|d| d.kind.as_deref())
    }
}

/// HTTP client for a published data package
pub struct DataPackageClient {
    http_client: reqwest::Client,
    descriptor_url: String,
    resource_type: String,
}

impl DataPackageClient {
    pub fn new(
        descriptor_url: impl Into<String>,
        resource_type: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AwardsSourceError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AwardsSourceError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            descriptor_url: descriptor_url.into(),
            resource_type: resource_type.into(),
        })
    }

    async fn get_text(&self, url: &str) -> Result<String, AwardsSourceError> {
        tracing::debug!(url = %url, "Fetching data package content");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| AwardsSourceError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AwardsSourceError::ApiError(status.as_u16(), error_text));
        }

        response
            .text()
            .await
            .map_err(|e| AwardsSourceError::NetworkError(e.to_string()))
    }
}

#[async_trait]
impl AwardsSource for DataPackageClient {
    async fn fetch_rows(&self) -> Result<Vec<Value>, AwardsSourceError> {
        let descriptor = self.get_text(&self.descriptor_url).await?;
        let package: DataPackage = serde_json::from_str(&descriptor)
            .map_err(|e| AwardsSourceError::ParseError(e.to_string()))?;

        let resource = select_resource(&package, &self.resource_type)?;
        let path = resource
            .path
            .as_deref()
            .ok_or_else(|| AwardsSourceError::ParseError("resource has no path".to_string()))?;
        let url = resolve_resource_url(&self.descriptor_url, path)?;

        tracing::info!(
            resource = resource.name.as_deref().unwrap_or("unnamed"),
            url = %url,
            "Reading awards resource"
        );

        let body = self.get_text(&url).await?;
        let fields = resource
            .schema
            .as_ref()
            .map(|s| s.fields.as_slice())
            .unwrap_or_default();
        let rows = parse_rows(&body, fields)?;

        tracing::info!(rows = rows.len(), "Retrieved awards dataset");
        Ok(rows)
    }
}

/// First resource whose `datahub.type` equals `resource_type`
pub fn select_resource<'a>(
    package: &'a DataPackage,
    resource_type: &str,
) -> Result<&'a Resource, AwardsSourceError> {
    package
        .resources
        .iter()
        .find(|r| r.kind() == Some(resource_type))
        .ok_or_else(|| AwardsSourceError::ResourceNotFound(resource_type.to_string()))
}

/// Resolve a resource path relative to the descriptor URL
pub fn resolve_resource_url(descriptor_url: &str, path: &str) -> Result<String, AwardsSourceError> {
    let base = reqwest::Url::parse(descriptor_url)
        .map_err(|e| AwardsSourceError::ParseError(format!("descriptor URL: {}", e)))?;
    base.join(path)
        .map(|u| u.to_string())
        .map_err(|e| AwardsSourceError::ParseError(format!("resource path: {}", e)))
}

/// Parse CSV text (header row first) into positional JSON rows
pub fn parse_rows(csv_text: &str, fields: &[FieldDescriptor]) -> Result<Vec<Value>, AwardsSourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AwardsSourceError::ParseError(e.to_string()))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let kind = fields.get(i).and_then(|f| f.kind.as_deref());
                cast_cell(cell, kind)
            })
            .collect();
        rows.push(Value::Array(row));
    }

    Ok(rows)
}

/// Cast one cell by its declared table-schema type. Cells that do not fit
/// the declared type stay strings.
pub fn cast_cell(cell: &str, kind: Option<&str>) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }

    let text = || Value::String(cell.to_string());
    match kind {
        Some("integer") | Some("year") => cell
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| text()),
        Some("number") => cell
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(text),
        Some("boolean") => match cell.trim() {
            "true" | "True" | "TRUE" | "1" => Value::Bool(true),
            "false" | "False" | "FALSE" | "0" => Value::Bool(false),
            _ => text(),
        },
        _ => text(),
    }
}
