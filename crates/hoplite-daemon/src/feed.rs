//! Line-oriented route event feed.
//!
//! Stands in for an OS route socket listener: one event per line, a verb
//! followed by the destination and `clause value` pairs in any order.
//!
//! ```text
//! add 192.0.2.0/24 metric 0 if 2 via 192.0.2.254 proto kernel
//! add 2001:db8::/32 from 2001:db8:f::/48 if 3 proto static
//! del 192.0.2.0/24
//! show
//! ```
//!
//! Missing clauses default to `proto kernel`, `if 0`, `metric 0`.

use std::net::IpAddr;
use std::str::SplitWhitespace;

use hoplite_core::{IfIndex, Metric, Prefix, RouteKey, RouteOrigin};
use hoplite_redist::Candidate;

use crate::error::DaemonError;

/// One parsed feed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCommand {
    /// A route appeared or changed in the kernel view.
    Add(Candidate),
    /// A route disappeared from the kernel view.
    Del(RouteKey),
    /// Dump the export table.
    Show,
}

/// Parse one feed line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<FeedCommand>, DaemonError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut tokens = line.split_whitespace();
    let Some(verb) = tokens.next() else {
        return Ok(None);
    };
    match verb {
        "add" => parse_add(&mut tokens).map(Some),
        "del" => parse_del(&mut tokens).map(Some),
        "show" => {
            if tokens.next().is_some() {
                return Err(DaemonError::Feed("show takes no arguments".to_string()));
            }
            Ok(Some(FeedCommand::Show))
        }
        unknown => Err(DaemonError::Feed(format!("unknown command {unknown:?}"))),
    }
}

fn parse_add(tokens: &mut SplitWhitespace<'_>) -> Result<FeedCommand, DaemonError> {
    let dest = parse_dest(tokens.next())?;
    let mut src: Option<Prefix> = None;
    let mut metric = Metric::new(0);
    let mut ifindex = IfIndex::UNSPECIFIED;
    let mut nexthop: Option<IpAddr> = None;
    let mut origin = RouteOrigin::Kernel;

    while let Some(clause) = tokens.next() {
        let value = tokens
            .next()
            .ok_or_else(|| DaemonError::Feed(format!("{clause} needs a value")))?;
        match clause {
            "from" => src = Some(parse_src(value)?),
            "metric" => {
                let value = value
                    .parse()
                    .map_err(|_| DaemonError::Feed(format!("bad metric {value:?}")))?;
                metric = Metric::new(value);
            }
            "if" => {
                let value = value
                    .parse()
                    .map_err(|_| DaemonError::Feed(format!("bad interface index {value:?}")))?;
                ifindex = IfIndex(value);
            }
            "via" => {
                let addr = value
                    .parse()
                    .map_err(|_| DaemonError::Feed(format!("bad gateway address {value:?}")))?;
                nexthop = Some(addr);
            }
            "proto" => {
                origin = value.parse().map_err(|e| DaemonError::Feed(format!("{e}")))?;
            }
            unknown => {
                return Err(DaemonError::Feed(format!("unknown clause {unknown:?}")));
            }
        }
    }

    Ok(FeedCommand::Add(Candidate {
        key: make_key(dest, src)?,
        kernel_metric: metric,
        ifindex,
        nexthop,
        origin,
        propagate: true,
    }))
}

fn parse_del(tokens: &mut SplitWhitespace<'_>) -> Result<FeedCommand, DaemonError> {
    let dest = parse_dest(tokens.next())?;
    let mut src: Option<Prefix> = None;

    while let Some(clause) = tokens.next() {
        let value = tokens
            .next()
            .ok_or_else(|| DaemonError::Feed(format!("{clause} needs a value")))?;
        match clause {
            "from" => src = Some(parse_src(value)?),
            unknown => {
                return Err(DaemonError::Feed(format!("unknown clause {unknown:?}")));
            }
        }
    }

    Ok(FeedCommand::Del(make_key(dest, src)?))
}

fn parse_dest(token: Option<&str>) -> Result<Prefix, DaemonError> {
    let text =
        token.ok_or_else(|| DaemonError::Feed("missing destination prefix".to_string()))?;
    text.parse()
        .map_err(|e| DaemonError::Feed(format!("bad destination {text:?}: {e}")))
}

fn parse_src(text: &str) -> Result<Prefix, DaemonError> {
    let src: Prefix = text
        .parse()
        .map_err(|e| DaemonError::Feed(format!("bad source prefix {text:?}: {e}")))?;
    if src.is_v4() {
        return Err(DaemonError::Feed(
            "source prefixes are IPv6 only".to_string(),
        ));
    }
    Ok(src)
}

fn make_key(dest: Prefix, src: Option<Prefix>) -> Result<RouteKey, DaemonError> {
    match src {
        None => Ok(RouteKey::dest_only(dest)),
        Some(src) => {
            if dest.is_v4() {
                return Err(DaemonError::Feed(
                    "IPv4 routes cannot carry a source prefix".to_string(),
                ));
            }
            Ok(RouteKey::new(dest, src))
        }
    }
}

// ============================================================================================== //
