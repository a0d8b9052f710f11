//! Candidate screening ahead of the export table.
//!
//! Pure decisions: admission consults only the candidate and the metric
//! policy, and touches no table state, so the whole pipeline is testable
//! without a table.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use hoplite_core::{IfIndex, Metric, Prefix, PrefixError, RouteKey, RouteOrigin, is_martian};

/// A route offered for redistribution by the kernel or another process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub key: RouteKey,
    /// Cost reported by the originator. Carried for diagnostics only; the
    /// policy filter alone decides the export metric.
    pub kernel_metric: Metric,
    pub ifindex: IfIndex,
    /// Gateway reported with the event; carried for diagnostics only.
    pub nexthop: Option<IpAddr>,
    pub origin: RouteOrigin,
    /// Whether acceptance triggers an update flood. Set on externally
    /// received adds; cleared by callers replaying already-known state.
    pub propagate: bool,
}

impl Candidate {
    /// IPv4 add event. The destination is mapped into 128-bit space with
    /// the length offset by 96; IPv4 routes carry no source prefix.
    pub fn v4(
        dest: Ipv4Addr,
        plen: u8,
        metric: Metric,
        ifindex: IfIndex,
        nexthop: Option<Ipv4Addr>,
        origin: RouteOrigin,
    ) -> Result<Self, PrefixError> {
        Ok(Candidate {
            key: RouteKey::v4(dest, plen)?,
            kernel_metric: metric,
            ifindex,
            nexthop: nexthop.map(IpAddr::V4),
            origin,
            propagate: true,
        })
    }

    /// IPv6 add event, optionally source-specific.
    pub fn v6(
        dest: Ipv6Addr,
        plen: u8,
        src: Option<(Ipv6Addr, u8)>,
        metric: Metric,
        ifindex: IfIndex,
        nexthop: Option<Ipv6Addr>,
        origin: RouteOrigin,
    ) -> Result<Self, PrefixError> {
        let key = match src {
            Some((src, src_plen)) => RouteKey::v6_src(dest, plen, src, src_plen)?,
            None => RouteKey::v6(dest, plen)?,
        };
        Ok(Candidate {
            key,
            kernel_metric: metric,
            ifindex,
            nexthop: nexthop.map(IpAddr::V6),
            origin,
            propagate: true,
        })
    }

    /// This candidate with the update flood suppressed.
    pub fn without_propagation(mut self) -> Self {
        self.propagate = false;
        self
    }
}

/// Export cost assignment, the one policy seam of the pipeline.
pub trait MetricPolicy {
    /// Cost at which to export a route, or [`Metric::INFINITY`] to refuse
    /// it. Called once per candidate that passed martian screening.
    fn export_metric(&self, dest: &Prefix, ifindex: IfIndex, origin: RouteOrigin) -> Metric;
}

/// What admission decided for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionVerdict {
    /// Forward to the table at this metric.
    Accept(Metric),
    /// Destination lies in reserved address space; drop silently.
    Martian,
    /// Policy refused the export; drop silently.
    Filtered,
}

/// Screen one candidate: martian check first, then policy scoring.
#[must_use]
pub fn admit<P: MetricPolicy + ?Sized>(policy: &P, candidate: &Candidate) -> AdmissionVerdict {
    if is_martian(&candidate.key.dest) {
        return AdmissionVerdict::Martian;
    }
    let metric = policy.export_metric(&candidate.key.dest, candidate.ifindex, candidate.origin);
    if metric.is_infinite() {
        return AdmissionVerdict::Filtered;
    }
    AdmissionVerdict::Accept(metric)
}
