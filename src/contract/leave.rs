//! Generator for leave contracts.

use std::collections::BTreeMap;
use std::fs;

use chrono::{NaiveDate, Utc};
use log::debug;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{current_contract_date, sanitize_subject_name};
use super::engine::DocxRenderEngine;
use super::template::TemplateStore;
use super::traits::{Generator, Validator};
use super::validation::{validate_present, validate_required, ValidationErrors};
use super::{DocumentKind, GeneratedArtifact, GeneratorError};

/// Request payload for a leave contract.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LeaveContractRequest {
    pub employee_name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason_for_leave: String,
}

impl Validator for LeaveContractRequest {
    fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();

        validate_required(
            &self.employee_name,
            "employee_name",
            "Employee name",
            &mut errors,
        );
        validate_present(&self.start_date, "start_date", "Start date", &mut errors);
        validate_present(&self.end_date, "end_date", "End date", &mut errors);
        validate_required(
            &self.reason_for_leave,
            "reason_for_leave",
            "Reason for leave",
            &mut errors,
        );

        errors.into_result()
    }
}

impl LeaveContractRequest {
    fn bindings(&self) -> BTreeMap<String, String> {
        let mut bindings = BTreeMap::new();
        bindings.insert("employee_name".to_string(), self.employee_name.clone());
        bindings.insert("start_date".to_string(), format_date(self.start_date));
        bindings.insert("end_date".to_string(), format_date(self.end_date));
        bindings.insert(
            "reason_for_leave".to_string(),
            self.reason_for_leave.clone(),
        );
        bindings.insert("contract_date".to_string(), current_contract_date());
        bindings
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Generator for leave contract documents.
pub struct LeaveContractGenerator {
    store: TemplateStore,
}

impl LeaveContractGenerator {
    pub fn new(store: TemplateStore) -> Self {
        Self { store }
    }
}

impl Generator<LeaveContractRequest> for LeaveContractGenerator {
    fn generate(&self, request: LeaveContractRequest) -> Result<GeneratedArtifact, GeneratorError> {
        let kind = DocumentKind::Leave;
        let template = self.store.load_template(kind)?;
        let rendered = DocxRenderEngine::render(&template, &request.bindings())?;

        let file_name = format!(
            "{}_{}.docx",
            sanitize_subject_name(&request.employee_name),
            kind.file_suffix()
        );

        self.store.ensure_output_dir(kind);
        let id = Uuid::new_v4();
        let path = self.store.output_dir(kind).join(format!("{id}_{file_name}"));
        fs::write(&path, &rendered).map_err(GeneratorError::OutputIo)?;
        debug!("Wrote leave contract artifact to {}", path.display());

        Ok(GeneratedArtifact {
            id,
            kind,
            file_name,
            path,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization() {
        let json = r#"{
            "employee_name": "Maria Santos",
            "start_date": "2025-01-10",
            "end_date": "2025-01-15",
            "reason_for_leave": "Medical"
        }"#;

        let request: LeaveContractRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_name, "Maria Santos");
        assert_eq!(
            request.start_date,
            NaiveDate::from_ymd_opt(2025, 1, 10)
        );
        assert_eq!(request.reason_for_leave, "Medical");
    }

    #[test]
    fn test_validate_requires_dates() {
        let request = LeaveContractRequest {
            employee_name: "Maria Santos".to_string(),
            reason_for_leave: "Medical".to_string(),
            ..Default::default()
        };

        let message = request.validate().unwrap_err();
        assert!(message.contains("start_date"));
        assert!(message.contains("end_date"));
        assert!(!message.contains("employee_name"));
    }
}
