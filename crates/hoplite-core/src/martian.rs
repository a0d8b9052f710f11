//! Reserved-address-space screening for candidate destinations.

use crate::prefix::Prefix;

/// Whether `prefix` lies in address space that must never be redistributed.
///
/// Rejects IPv6 multicast (`ff00::/8`), link-local (`fe80::/10`), the
/// unspecified and loopback host routes (`::/128`, `::1/128`), and for
/// IPv4-mapped prefixes the loopback and this-network blocks (`127.0.0.0/8`,
/// `0.0.0.0/8`) plus multicast-and-above (`224.0.0.0/3`). A prefix too short
/// to fall entirely inside one of these ranges is allowed; in particular
/// both default routes (`::/0` and `0.0.0.0/0`) pass.
#[must_use]
pub fn is_martian(prefix: &Prefix) -> bool {
    let a = prefix.octets();
    let plen = prefix.plen();

    if plen >= 8 && a[0] == 0xff {
        return true;
    }
    if plen >= 10 && a[0] == 0xfe && a[1] & 0xc0 == 0x80 {
        return true;
    }
    if plen == 128 && a[..15] == [0; 15] && a[15] <= 1 {
        return true;
    }
    if prefix.is_v4() {
        if plen >= 104 && (a[12] == 127 || a[12] == 0) {
            return true;
        }
        if plen >= 100 && a[12] & 0xe0 == 0xe0 {
            return true;
        }
    }
    false
}
