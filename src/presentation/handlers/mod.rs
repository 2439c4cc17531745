mod comparison_form;
mod compliance;
mod health;

pub use comparison_form::{ComparisonBody, FormError, read_comparison};
pub use compliance::{ComplianceQuery, ErrorResponse, compliance_check_handler};
pub use health::{ROOT_MESSAGE, health_handler, root_handler};
