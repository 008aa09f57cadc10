//! Generator for employment contracts.
//!
//! Binds the staffing details of a construction project (employee, project,
//! position, dates, salary) into the employment contract template.

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
use super::validation::{validate_required, ValidationErrors};
use super::{DocumentKind, GeneratedArtifact, GeneratorError};

/// Request payload for an employment contract.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct EmploymentContractRequest {
    pub employee_name: String,
    pub project_name: String,
    pub project_location: Option<String>,
    pub position: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub salary: Option<f64>,
}

impl Validator for EmploymentContractRequest {
    fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();

        validate_required(
            &self.employee_name,
            "employee_name",
            "Employee name",
            &mut errors,
        );
        validate_required(
            &self.project_name,
            "project_name",
            "Project name",
            &mut errors,
        );
        validate_required(&self.position, "position", "Position", &mut errors);

        errors.into_result()
    }
}

impl EmploymentContractRequest {
    /// Placeholder bindings for the template. Optional fields bind as empty
    /// strings; `contract_date` is always the server's current date.
    fn bindings(&self) -> BTreeMap<String, String> {
        let mut bindings = BTreeMap::new();
        bindings.insert("employee_name".to_string(), self.employee_name.clone());
        bindings.insert("project_name".to_string(), self.project_name.clone());
        bindings.insert(
            "project_location".to_string(),
            self.project_location.clone().unwrap_or_default(),
        );
        bindings.insert("position".to_string(), self.position.clone());
        bindings.insert("start_date".to_string(), format_date(self.start_date));
        bindings.insert("end_date".to_string(), format_date(self.end_date));
        bindings.insert(
            "salary".to_string(),
            self.salary.map(|s| s.to_string()).unwrap_or_default(),
        );
        bindings.insert("contract_date".to_string(), current_contract_date());
        bindings
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Generator for employment contract documents.
pub struct EmploymentContractGenerator {
    store: TemplateStore,
}

impl EmploymentContractGenerator {
    pub fn new(store: TemplateStore) -> Self {
        Self { store }
    }
}

impl Generator<EmploymentContractRequest> for EmploymentContractGenerator {
    fn generate(
        &self,
        request: EmploymentContractRequest,
    ) -> Result<GeneratedArtifact, GeneratorError> {
        let kind = DocumentKind::Employment;
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
        debug!("Wrote employment contract artifact to {}", path.display());

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
            "employee_name": "Jane Doe",
            "project_name": "Riverside Tower",
            "project_location": "Quezon City",
            "position": "Site Engineer",
            "start_date": "2025-02-01",
            "end_date": "2025-12-31",
            "salary": 45000
        }"#;

        let request: EmploymentContractRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_name, "Jane Doe");
        assert_eq!(request.position, "Site Engineer");
        assert_eq!(request.salary, Some(45000.0));
    }

    #[test]
    fn test_validate_reports_all_missing_fields() {
        let request = EmploymentContractRequest::default();
        let message = request.validate().unwrap_err();
        assert!(message.contains("employee_name"));
        assert!(message.contains("project_name"));
        assert!(message.contains("position"));
    }

    #[test]
    fn test_bindings_include_computed_contract_date() {
        let request = EmploymentContractRequest {
            employee_name: "Jane Doe".to_string(),
            project_name: "Riverside Tower".to_string(),
            position: "Site Engineer".to_string(),
            ..Default::default()
        };

        let bindings = request.bindings();
        assert_eq!(bindings["employee_name"], "Jane Doe");
        assert_eq!(bindings["start_date"], "");
        let contract_date = &bindings["contract_date"];
        assert_eq!(contract_date.len(), 10);
        assert_eq!(contract_date.as_bytes()[4], b'-');
    }
}
