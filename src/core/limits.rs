/*!
 * Guard Limits and Constants
 *
 * Centralized location for lookup limits, thresholds, and default names.
 */

use std::time::Duration;

// =============================================================================
// INTROSPECTION LIMITS
// =============================================================================

/// Maximum composition/hierarchy depth walked by the metadata registry
/// Deeper graphs are reported as introspection failures, never as "no marker"
/// [SECURITY]
pub const DEFAULT_MAX_LOOKUP_DEPTH: usize = 32;

// =============================================================================
// TRACING THRESHOLDS
// =============================================================================

/// Resolutions slower than this are logged at warn level
/// [PERF] A well-behaved backend answers in well under a microsecond
pub const SLOW_RESOLUTION_THRESHOLD: Duration = Duration::from_millis(1);

// =============================================================================
// DEFAULT NAMES
// =============================================================================

/// Pre-authorization marker
pub const PRE_AUTHORIZE: &str = "PreAuthorize";

/// Post-authorization marker
pub const POST_AUTHORIZE: &str = "PostAuthorize";

/// Role-restriction marker
pub const SECURED: &str = "Secured";

/// Tag identifying request-handling components
pub const DEFAULT_HANDLER_TAG: &str = "Controller";

/// Attribute string the host framework interprets as "always deny"
pub const DENY_ALL_ATTRIBUTE: &str = "denyAll";

/// Attribute string the host framework interprets as "always permit"
pub const PERMIT_ALL_ATTRIBUTE: &str = "permitAll";
