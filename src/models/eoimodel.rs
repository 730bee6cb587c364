use axum::body::Bytes;

pub const DEFAULT_PASSPORT1_NAME: &str = "Passport_Party1";
pub const DEFAULT_PASSPORT2_NAME: &str = "Passport_Party2";

/// One interested party on the EOI form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Party {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub nationality: String,
    pub passport_number: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitPreference {
    pub unit_type: String,
    pub unit_number: String,
    pub down_payment: String,
    /// Shown as the "EOI value" in the email.
    pub preferred_unit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgencyInfo {
    pub agency_name: String,
    pub agent_name: String,
    pub agent_mobile: String,
}

/// Uploaded passport scan, held in memory only.
#[derive(Debug, Clone, PartialEq)]
pub struct PassportUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub content: Bytes,
}

/// A single Expression of Interest, built from one request and dropped after it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub party1: Party,
    pub party2: Option<Party>,
    pub unit: UnitPreference,
    pub sales_manager: String,
    pub agency: AgencyInfo,
    pub submitted_at: String,
    pub source: String,
    pub passport1: Option<PassportUpload>,
    pub passport2: Option<PassportUpload>,
}

impl SubmissionRequest {
    /// Passport uploads in party order, skipping the ones not provided.
    pub fn passports(&self) -> impl Iterator<Item = &PassportUpload> {
        self.passport1.iter().chain(self.passport2.iter())
    }
}

impl PassportUpload {
    /// Returns `None` for empty uploads; browsers send an empty part for an untouched file input.
    pub fn from_part(
        filename: Option<String>,
        content_type: Option<String>,
        content: Bytes,
        default_name: &str,
    ) -> Option<Self> {
        if content.is_empty() {
            return None;
        }

        let filename = filename
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| default_name.to_string());

        Some(PassportUpload {
            filename,
            content_type,
            content,
        })
    }

    /// Content type for the outbound attachment, guessed from the extension when the upload had none.
    pub fn mime_type(&self) -> String {
        if let Some(content_type) = self
            .content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
        {
            return content_type.to_string();
        }

        let extension = self
            .filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => "application/pdf",
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            _ => "application/octet-stream",
        }
        .to_string()
    }
}
