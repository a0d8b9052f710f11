//! Rule-based export policy compiled from configuration.
//!
//! Rules are checked in file order and the first match decides. A candidate
//! matching no rule is not exported.

use hoplite_core::{IfIndex, Metric, Prefix, RouteOrigin};
use hoplite_redist::MetricPolicy;

use crate::config::RedistributeEntry;
use crate::error::DaemonError;

/// What a matched rule does with the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleAction {
    /// Export at this metric.
    Export(Metric),
    /// Refuse to export.
    Deny,
}

/// One compiled rule. `None` constraints match everything.
#[derive(Debug, Clone, Copy)]
struct CompiledRule {
    origin: Option<RouteOrigin>,
    prefix: Option<Prefix>,
    ifindex: Option<IfIndex>,
    action: RuleAction,
}

impl CompiledRule {
    fn matches(&self, dest: &Prefix, ifindex: IfIndex, origin: RouteOrigin) -> bool {
        self.origin.is_none_or(|o| o == origin)
            && self.ifindex.is_none_or(|i| i == ifindex)
            && self.prefix.is_none_or(|p| p.covers(dest))
    }
}

/// First-match-wins policy over the configured rule list.
#[derive(Debug, Clone)]
pub struct RulePolicy {
    rules: Vec<CompiledRule>,
}

impl RulePolicy {
    /// Compile and validate configuration entries, preserving their order.
    pub fn compile(entries: &[RedistributeEntry]) -> Result<Self, DaemonError> {
        let mut rules = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            rules.push(compile_rule(index, entry)?);
        }
        Ok(RulePolicy { rules })
    }

    /// A policy with no rules. Exports nothing.
    #[must_use]
    pub fn deny_all() -> Self {
        RulePolicy { rules: Vec::new() }
    }

    /// Number of compiled rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl MetricPolicy for RulePolicy {
    fn export_metric(&self, dest: &Prefix, ifindex: IfIndex, origin: RouteOrigin) -> Metric {
        for rule in &self.rules {
            if rule.matches(dest, ifindex, origin) {
                return match rule.action {
                    RuleAction::Export(metric) => metric,
                    RuleAction::Deny => Metric::INFINITY,
                };
            }
        }
        Metric::INFINITY
    }
}

fn compile_rule(index: usize, entry: &RedistributeEntry) -> Result<CompiledRule, DaemonError> {
    let action = match (entry.metric, entry.deny) {
        (Some(_), true) => {
            return Err(DaemonError::Config(format!(
                "redistribute rule {index}: metric and deny are mutually exclusive"
            )));
        }
        (None, false) => {
            return Err(DaemonError::Config(format!(
                "redistribute rule {index}: needs either a metric or deny = true"
            )));
        }
        (None, true) => RuleAction::Deny,
        (Some(metric), false) => {
            if metric == Metric::INFINITY.value() {
                return Err(DaemonError::Config(format!(
                    "redistribute rule {index}: metric {metric} is the infinity sentinel, use deny = true"
                )));
            }
            RuleAction::Export(Metric::new(metric))
        }
    };

    let origin = match entry.proto.as_deref() {
        Some(name) => Some(name.parse::<RouteOrigin>().map_err(|e| {
            DaemonError::Config(format!("redistribute rule {index}: {e}"))
        })?),
        None => None,
    };

    let prefix = match entry.prefix.as_deref() {
        Some(text) => Some(text.parse::<Prefix>().map_err(|e| {
            DaemonError::Config(format!("redistribute rule {index}: {e}"))
        })?),
        None => None,
    };

    Ok(CompiledRule {
        origin,
        prefix,
        ifindex: entry.ifindex.map(IfIndex),
        action,
    })
}

// ============================================================================================== //

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use hoplite_redist::{AdmissionVerdict, Candidate, admit};

    use super::*;

    fn entry(
        proto: Option<&str>,
        prefix: Option<&str>,
        ifindex: Option<u32>,
        metric: Option<u16>,
        deny: bool,
    ) -> RedistributeEntry {
        RedistributeEntry {
            proto: proto.map(str::to_string),
            prefix: prefix.map(str::to_string),
            ifindex,
            metric,
            deny,
        }
    }

    fn v4_prefix(addr: [u8; 4], plen: u8) -> Prefix {
        Prefix::v4(Ipv4Addr::from(addr), plen).unwrap()
    }

    // === Matching ===

    #[test]
    fn catch_all_rule_matches_everything() {
        let policy =
            RulePolicy::compile(&[entry(None, None, None, Some(64), false)]).unwrap();
        let dest = v4_prefix([203, 0, 113, 0], 24);
        let metric = policy.export_metric(&dest, IfIndex(9), RouteOrigin::Bgp);
        assert_eq!(metric, Metric::new(64));
    }

    #[test]
    fn first_matching_rule_wins() {
        let policy = RulePolicy::compile(&[
            entry(Some("kernel"), None, None, Some(10), false),
            entry(None, None, None, Some(200), false),
        ])
        .unwrap();
        let dest = v4_prefix([10, 1, 0, 0], 16);
        assert_eq!(
            policy.export_metric(&dest, IfIndex(1), RouteOrigin::Kernel),
            Metric::new(10)
        );
        assert_eq!(
            policy.export_metric(&dest, IfIndex(1), RouteOrigin::Static),
            Metric::new(200)
        );
    }

    #[test]
    fn proto_constraint_restricts() {
        let policy =
            RulePolicy::compile(&[entry(Some("static"), None, None, Some(32), false)]).unwrap();
        let dest = v4_prefix([10, 0, 0, 0], 8);
        assert_eq!(
            policy.export_metric(&dest, IfIndex(1), RouteOrigin::Static),
            Metric::new(32)
        );
        assert!(policy
            .export_metric(&dest, IfIndex(1), RouteOrigin::Kernel)
            .is_infinite());
    }

    #[test]
    fn prefix_constraint_uses_containment() {
        let policy =
            RulePolicy::compile(&[entry(None, Some("10.0.0.0/8"), None, Some(48), false)])
                .unwrap();
        let inside = v4_prefix([10, 42, 0, 0], 16);
        let outside = v4_prefix([11, 0, 0, 0], 16);
        assert_eq!(
            policy.export_metric(&inside, IfIndex(1), RouteOrigin::Kernel),
            Metric::new(48)
        );
        assert!(policy
            .export_metric(&outside, IfIndex(1), RouteOrigin::Kernel)
            .is_infinite());
    }

    #[test]
    fn ifindex_constraint_restricts() {
        let policy = RulePolicy::compile(&[entry(None, None, Some(3), Some(16), false)]).unwrap();
        let dest = v4_prefix([192, 0, 2, 0], 24);
        assert_eq!(
            policy.export_metric(&dest, IfIndex(3), RouteOrigin::Kernel),
            Metric::new(16)
        );
        assert!(policy
            .export_metric(&dest, IfIndex(4), RouteOrigin::Kernel)
            .is_infinite());
    }

    #[test]
    fn deny_rule_shadows_later_allow() {
        let policy = RulePolicy::compile(&[
            entry(Some("connected"), None, None, None, true),
            entry(None, None, None, Some(8), false),
        ])
        .unwrap();
        let dest = v4_prefix([172, 16, 0, 0], 12);
        assert!(policy
            .export_metric(&dest, IfIndex(1), RouteOrigin::Connected)
            .is_infinite());
        assert_eq!(
            policy.export_metric(&dest, IfIndex(1), RouteOrigin::Ospf),
            Metric::new(8)
        );
    }

    #[test]
    fn no_match_means_no_export() {
        let policy =
            RulePolicy::compile(&[entry(Some("rip"), None, None, Some(5), false)]).unwrap();
        let dest = v4_prefix([198, 51, 100, 0], 24);
        assert!(policy
            .export_metric(&dest, IfIndex(1), RouteOrigin::Kernel)
            .is_infinite());
    }

    #[test]
    fn empty_policy_denies_all() {
        let policy = RulePolicy::deny_all();
        assert_eq!(policy.rule_count(), 0);
        let dest = v4_prefix([10, 0, 0, 0], 8);
        assert!(policy
            .export_metric(&dest, IfIndex(1), RouteOrigin::Kernel)
            .is_infinite());
    }

    // === Compile validation ===

    #[test]
    fn rejects_metric_and_deny_together() {
        let err = RulePolicy::compile(&[entry(None, None, None, Some(10), true)]).unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn rejects_rule_without_action() {
        let err = RulePolicy::compile(&[entry(Some("kernel"), None, None, None, false)])
            .unwrap_err();
        assert!(err.to_string().contains("needs either a metric"));
    }

    #[test]
    fn rejects_infinite_metric() {
        let err = RulePolicy::compile(&[entry(None, None, None, Some(65535), false)]).unwrap_err();
        assert!(err.to_string().contains("infinity sentinel"));
    }

    #[test]
    fn rejects_unknown_proto() {
        let err = RulePolicy::compile(&[entry(Some("isis"), None, None, Some(10), false)])
            .unwrap_err();
        assert!(err.to_string().contains("unknown origin name"));
    }

    #[test]
    fn rejects_bad_prefix() {
        let err =
            RulePolicy::compile(&[entry(None, Some("10.0.0.0/40"), None, Some(10), false)])
                .unwrap_err();
        assert!(matches!(err, DaemonError::Config(_)));
    }

    #[test]
    fn error_names_the_failing_rule() {
        let err = RulePolicy::compile(&[
            entry(None, None, None, Some(10), false),
            entry(Some("bogus"), None, None, Some(10), false),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("rule 1"));
    }

    // === Admission integration ===

    #[test]
    fn admission_uses_compiled_policy() {
        let policy = RulePolicy::compile(&[
            entry(Some("kernel"), Some("10.0.0.0/8"), None, Some(96), false),
        ])
        .unwrap();

        let exported = Candidate::v4(
            Ipv4Addr::new(10, 20, 0, 0),
            16,
            Metric::new(0),
            IfIndex(2),
            None,
            RouteOrigin::Kernel,
        )
        .unwrap();
        assert_eq!(
            admit(&policy, &exported),
            AdmissionVerdict::Accept(Metric::new(96))
        );

        let filtered = Candidate::v4(
            Ipv4Addr::new(11, 0, 0, 0),
            8,
            Metric::new(0),
            IfIndex(2),
            None,
            RouteOrigin::Kernel,
        )
        .unwrap();
        assert_eq!(admit(&policy, &filtered), AdmissionVerdict::Filtered);
    }
}
