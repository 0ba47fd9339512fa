//! Restore-time normalization of stored definitions.

use crate::marathon::Application;

/// Prepare a stored definition for resubmission.
///
/// The restored app starts with zero instances and no fetch URIs; scaling
/// up is left to the operator once the definition has been checked.
/// Every other field, the ID included, passes through.
pub fn normalize_for_restore(mut app: Application) -> Application {
    app.instances = Some(0);
    app.fetch = Some(Vec::new());
    app
}
