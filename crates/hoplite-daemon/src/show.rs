//! Administrative rendering of the export table.

use std::fmt::Write;

use hoplite_redist::ExportTable;

/// Render the table one route per line, in table order:
/// `dest [from src] metric M if N proto P`.
#[must_use]
pub fn render_table(table: &ExportTable) -> String {
    let mut out = String::new();
    for entry in table {
        let _ = writeln!(
            out,
            "{} metric {} if {} proto {}",
            entry.key, entry.metric, entry.ifindex, entry.origin
        );
    }
    out
}

// ============================================================================================== //

#[cfg(test)]
mod tests {
    use std::net::Ipv6Addr;

    use hoplite_core::{IfIndex, Metric, RouteKey, RouteOrigin};
    use hoplite_redist::ExportTable;

    use super::*;

    fn upsert(table: &mut ExportTable, key: RouteKey, metric: u16, ifindex: u32) {
        table
            .upsert(key, Metric::new(metric), IfIndex(ifindex), RouteOrigin::Kernel)
            .unwrap();
    }

    #[test]
    fn empty_table_renders_empty() {
        assert_eq!(render_table(&ExportTable::new()), "");
    }

    #[test]
    fn renders_one_line_per_route() {
        let mut table = ExportTable::new();
        upsert(
            &mut table,
            RouteKey::v4("203.0.113.0".parse().unwrap(), 24).unwrap(),
            128,
            2,
        );
        upsert(
            &mut table,
            RouteKey::v6("2001:db8::".parse().unwrap(), 32).unwrap(),
            64,
            3,
        );

        let rendered = render_table(&table);
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.contains("203.0.113.0/24 metric 128 if 2 proto kernel"));
        assert!(rendered.contains("2001:db8::/32 metric 64 if 3 proto kernel"));
    }

    #[test]
    fn renders_source_specific_routes() {
        let mut table = ExportTable::new();
        let key = RouteKey::v6_src(
            Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0),
            32,
            Ipv6Addr::new(0x2001, 0xdb8, 0xf, 0, 0, 0, 0, 0),
            48,
        )
        .unwrap();
        upsert(&mut table, key, 10, 1);

        let rendered = render_table(&table);
        assert!(
            rendered.contains("2001:db8::/32 from 2001:db8:f::/48 metric 10 if 1 proto kernel")
        );
    }
}
