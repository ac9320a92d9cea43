/*!
 * Voter Chain
 * Host-side interpretation of resolver decisions
 */

use super::decision::{ConfigAttribute, Decision};
use super::resolver::MethodSecurityMetadataSource;
use crate::core::types::{GuardResult, HandlerMethod};
use crate::monitoring::ResolutionSpan;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Single voter's opinion on an attribute list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    Grant,
    Deny,
    Abstain,
}

/// Voter that can evaluate resolved attributes
pub trait AccessVoter: Send + Sync {
    fn vote(&self, handler: &HandlerMethod, attributes: &[ConfigAttribute]) -> Vote;

    /// Voter name
    fn name(&self) -> &str;
}

/// Interprets the deny-all and permit-all attributes
pub struct DenyAllVoter;

impl AccessVoter for DenyAllVoter {
    fn vote(&self, _handler: &HandlerMethod, attributes: &[ConfigAttribute]) -> Vote {
        if attributes.contains(&ConfigAttribute::DenyAll) {
            Vote::Deny
        } else if attributes.contains(&ConfigAttribute::PermitAll) {
            Vote::Grant
        } else {
            Vote::Abstain
        }
    }

    fn name(&self) -> &str {
        "deny_all"
    }
}

/// Final verdict handed to the transport layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "verdict")]
pub enum Verdict {
    Granted { reason: String },
    Denied { reason: String },
    /// Resolver deferred and no downstream evaluator was installed
    Deferred,
}

impl Verdict {
    pub fn is_denied(&self) -> bool {
        matches!(self, Verdict::Denied { .. })
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Verdict::Granted { .. })
    }

    /// Transport status for rejected requests (403 Forbidden)
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Verdict::Denied { .. } => Some(403),
            _ => None,
        }
    }
}

type Downstream = Box<dyn Fn(&HandlerMethod) -> Verdict + Send + Sync>;

/// Runs the resolver, then the voter chain
pub struct AccessDecisionManager {
    source: Arc<dyn MethodSecurityMetadataSource>,
    voters: Vec<Box<dyn AccessVoter>>,
    downstream: Option<Downstream>,
}

impl AccessDecisionManager {
    pub fn new(source: Arc<dyn MethodSecurityMetadataSource>) -> Self {
        Self {
            source,
            voters: vec![Box::new(DenyAllVoter)],
            downstream: None,
        }
    }

    /// Add a voter after the existing ones
    pub fn add_voter(&mut self, voter: Box<dyn AccessVoter>) {
        self.voters.push(voter);
    }

    /// Host's normal evaluation path, used when the resolver defers
    pub fn with_downstream<F>(mut self, downstream: F) -> Self
    where
        F: Fn(&HandlerMethod) -> Verdict + Send + Sync + 'static,
    {
        self.downstream = Some(Box::new(downstream));
        self
    }

    /// Decide access for a handler; resolution failures propagate untouched
    pub fn decide(&self, handler: &HandlerMethod) -> GuardResult<Verdict> {
        let span = ResolutionSpan::new(handler);
        let _entered = span.enter();

        let decision = match self.source.resolve_handler(handler) {
            Ok(decision) => decision,
            Err(e) => {
                span.record_error(&e.to_string());
                return Err(e);
            }
        };
        span.record_decision(&decision);

        let attributes = match decision {
            Decision::Defer => {
                return Ok(match &self.downstream {
                    Some(downstream) => downstream(handler),
                    None => Verdict::Deferred,
                });
            }
            other => other.attributes().unwrap_or_default(),
        };

        for voter in &self.voters {
            match voter.vote(handler, &attributes) {
                Vote::Grant => {
                    debug!("Voter '{}' granted access", voter.name());
                    return Ok(Verdict::Granted {
                        reason: format!("Granted by voter '{}'", voter.name()),
                    });
                }
                Vote::Deny => {
                    debug!("Voter '{}' denied access", voter.name());
                    return Ok(Verdict::Denied {
                        reason: format!("Denied by voter '{}'", voter.name()),
                    });
                }
                Vote::Abstain => {
                    debug!("Voter '{}' abstained", voter.name());
                    continue;
                }
            }
        }

        // If all voters abstained, deny by default
        Ok(Verdict::Denied {
            reason: "No voter granted this request".to_string(),
        })
    }
}
