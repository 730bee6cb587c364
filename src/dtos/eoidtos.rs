use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::eoimodel::*;

pub const NOT_SPECIFIED: &str = "Not specified";
pub const NOT_ASSIGNED: &str = "Not assigned";
pub const NOT_APPLICABLE: &str = "N/A";
pub const DEFAULT_SOURCE: &str = "EOI Form";

pub const PASSPORT1_FIELD: &str = "passport1";
pub const PASSPORT2_FIELD: &str = "passport2";

/// Gulf Standard Time, the timezone the sales team reads submissions in.
const DUBAI_OFFSET_SECS: i32 = 4 * 3600;

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error("Malformed JSON body: {0}")]
    Json(String),
}

/// Wire shape of the EOI form, shared by the multipart and JSON paths.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EoiFormDto {
    pub name1: Option<String>,
    pub mobile1: Option<String>,
    pub email1: Option<String>,
    pub nationality1: Option<String>,
    pub passport_number1: Option<String>,

    pub name2: Option<String>,
    pub mobile2: Option<String>,
    pub email2: Option<String>,
    pub nationality2: Option<String>,
    pub passport_number2: Option<String>,

    pub unit_type: Option<String>,
    pub unit_number: Option<String>,
    pub down_payment: Option<String>,
    pub preferred_unit: Option<String>,
    pub sales_manager: Option<String>,

    pub agency_name: Option<String>,
    pub agent_name: Option<String>,
    pub agent_mobile: Option<String>,

    pub submitted_at: Option<String>,
    pub source: Option<String>,
}

impl EoiFormDto {
    /// Records a multipart text field. Unknown names are ignored and the first occurrence wins.
    pub fn set_field(&mut self, name: &str, value: String) {
        let slot = match name {
            "name1" => &mut self.name1,
            "mobile1" => &mut self.mobile1,
            "email1" => &mut self.email1,
            "nationality1" => &mut self.nationality1,
            "passportNumber1" => &mut self.passport_number1,
            "name2" => &mut self.name2,
            "mobile2" => &mut self.mobile2,
            "email2" => &mut self.email2,
            "nationality2" => &mut self.nationality2,
            "passportNumber2" => &mut self.passport_number2,
            "unitType" => &mut self.unit_type,
            "unitNumber" => &mut self.unit_number,
            "downPayment" => &mut self.down_payment,
            "preferredUnit" => &mut self.preferred_unit,
            "salesManager" => &mut self.sales_manager,
            "agencyName" => &mut self.agency_name,
            "agentName" => &mut self.agent_name,
            "agentMobile" => &mut self.agent_mobile,
            "submittedAt" => &mut self.submitted_at,
            "source" => &mut self.source,
            _ => return,
        };

        if slot.is_none() {
            *slot = Some(value);
        }
    }

    /// Turns the raw form into a submission. Party 1's keys must be present (empty values are
    /// accepted); absent keys elsewhere fall back to the same placeholders the form itself sends.
    pub fn into_submission(
        self,
        passport1: Option<PassportUpload>,
        passport2: Option<PassportUpload>,
    ) -> Result<SubmissionRequest, ParseError> {
        let EoiFormDto {
            name1,
            mobile1,
            email1,
            nationality1,
            passport_number1,
            name2,
            mobile2,
            email2,
            nationality2,
            passport_number2,
            unit_type,
            unit_number,
            down_payment,
            preferred_unit,
            sales_manager,
            agency_name,
            agent_name,
            agent_mobile,
            submitted_at,
            source,
        } = self;

        let party1 = Party {
            name: required(name1, "name1")?,
            mobile: required(mobile1, "mobile1")?,
            email: required(email1, "email1")?,
            nationality: required(nationality1, "nationality1")?,
            passport_number: required(passport_number1, "passportNumber1")?,
        };

        // Party 2 exists only when a name was typed in.
        let party2 = match name2 {
            Some(name) if !name.trim().is_empty() => Some(Party {
                name,
                mobile: mobile2.unwrap_or_default(),
                email: email2.unwrap_or_default(),
                nationality: nationality2.unwrap_or_default(),
                passport_number: passport_number2.unwrap_or_default(),
            }),
            _ => None,
        };

        Ok(SubmissionRequest {
            party1,
            party2,
            unit: UnitPreference {
                unit_type: or_placeholder(unit_type, NOT_SPECIFIED),
                unit_number: or_placeholder(unit_number, NOT_SPECIFIED),
                down_payment: or_placeholder(down_payment, NOT_SPECIFIED),
                preferred_unit: or_placeholder(preferred_unit, NOT_SPECIFIED),
            },
            sales_manager: or_placeholder(sales_manager, NOT_ASSIGNED),
            agency: AgencyInfo {
                agency_name: or_placeholder(agency_name, NOT_APPLICABLE),
                agent_name: or_placeholder(agent_name, NOT_APPLICABLE),
                agent_mobile: or_placeholder(agent_mobile, NOT_APPLICABLE),
            },
            submitted_at: submitted_at.unwrap_or_else(|| format_submitted_at(Utc::now())),
            source: or_placeholder(source, DEFAULT_SOURCE),
            passport1,
            passport2,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ParseError> {
    value.ok_or(ParseError::MissingField(field))
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value.unwrap_or_else(|| placeholder.to_string())
}

/// Server-side stand-in for the timestamp the form normally stamps in Dubai time.
pub fn format_submitted_at(now: DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(DUBAI_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    now.with_timezone(&offset)
        .format("%A, %-d %B %Y at %-I:%M:%S %P GST")
        .to_string()
}

/// `{ success, message }` envelope used for every EOI response, success or failure.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn submitted() -> Self {
        ApiResponse {
            success: true,
            message: "EOI submitted successfully".to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            message: message.into(),
        }
    }
}
