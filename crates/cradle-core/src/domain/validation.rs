use crate::domain::{
    entities::{PackageSpec, TemplateMap},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_spec(spec: &PackageSpec) -> Result<(), DomainError> {
        spec.validate()
    }

    pub fn validate_template_map(map: &TemplateMap) -> Result<(), DomainError> {
        map.validate()
    }
}
