/*!
 * Coverage Report
 * Decision for every declared handler method
 */

use crate::core::types::{GuardResult, MethodRef, TypeRef};
use crate::metadata::MetadataRegistry;
use crate::policy::{Decision, MethodSecurityMetadataSource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub handler_type: TypeRef,
    pub method: MethodRef,
    pub decision: Decision,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub entries: Vec<ReportEntry>,
    pub total: usize,
    pub denied: usize,
    pub deferred: usize,
}

impl CoverageReport {
    /// Resolve every method callable on every type `registry` knows of
    ///
    /// Inherited methods are resolved against the type a request reaches them
    /// through, exactly as they are at runtime. Whether a type is a handler is
    /// left to `source`. The first resolution failure aborts.
    pub fn build(
        registry: &MetadataRegistry,
        source: &dyn MethodSecurityMetadataSource,
    ) -> GuardResult<Self> {
        let mut report = CoverageReport::default();

        for handler_type in registry.known_types() {
            for method in registry.callable_methods(&handler_type)? {
                let decision = source.resolve(&handler_type, Some(&method))?;

                match decision {
                    Decision::DenyAll => report.denied += 1,
                    Decision::Defer => report.deferred += 1,
                    Decision::PolicyAttributes(_) => {}
                }
                report.entries.push(ReportEntry {
                    handler_type: handler_type.clone(),
                    method,
                    decision,
                });
            }
        }

        report.total = report.entries.len();
        Ok(report)
    }

    /// Handlers that would reject every request
    pub fn denied_methods(&self) -> impl Iterator<Item = &MethodRef> {
        self.entries
            .iter()
            .filter(|e| e.decision.is_deny_all())
            .map(|e| &e.method)
    }
}
