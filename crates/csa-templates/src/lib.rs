//! csa-templates: architecture template catalog.
//!
//! Provides:
//! - The fixed catalog of named templates ([`list_templates`], [`get_template`])
//! - Override bundles and the pure merge of caller patches
//! - Template recommendation from plant size and requirements

pub mod catalog;
pub mod error;
pub mod overrides;
pub mod resolved;
pub mod select;

pub use catalog::{
    ArchitectureTemplate, CENTRAL_MCC_DISTRIBUTED_IO, CENTRALIZED, ControllerAllocation,
    DefaultOverrides, FULLY_DISTRIBUTED, HYBRID_SAFETY, IoPlacement, SafetyPolicy,
    VENDOR_PACKAGE_INTEGRATION, VendorIntegration, VfdLocation, get_template, list_templates,
};
pub use error::{TemplateError, TemplateResult};
pub use overrides::{MAX_SPARE_IO_PCT, OverridePatch, TemplateOverrides};
pub use resolved::ResolvedTemplate;
pub use select::{PlantProfile, select_template_for_plant};

/// Look up a template, failing with [`TemplateError::UnknownTemplate`].
pub fn require_template(name: &str) -> TemplateResult<&'static ArchitectureTemplate> {
    get_template(name).ok_or_else(|| TemplateError::UnknownTemplate {
        name: name.to_string(),
    })
}
