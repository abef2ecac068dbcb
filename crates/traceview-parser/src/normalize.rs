//! Hop-sequence normalization: the hop-1-is-localhost invariant.

use traceview_core::Hop;

const LOCAL_HOSTNAME: &str = "localhost";
const LOCAL_IP: &str = "127.0.0.1";

/// Forces hop 1 to be the local machine.
///
/// An existing hop 1 is rewritten in place, keeping its parsed ping time.
/// When hop 1 is missing and the list is non-empty, a synthetic hop 1 with
/// ping time 0 is prepended; if the original first hop was itself labeled 1,
/// every following hop is renumbered up by one. An empty list stays empty.
pub fn normalize_hops(hops: &mut Vec<Hop>) {
    for hop in hops.iter_mut() {
        if hop.hop == 1 {
            hop.hostname = LOCAL_HOSTNAME.to_string();
            hop.ip = LOCAL_IP.to_string();
            return;
        }
    }

    if hops.is_empty() {
        return;
    }

    hops.insert(
        0,
        Hop {
            hop: 1,
            ttl: 1,
            hostname: LOCAL_HOSTNAME.to_string(),
            ip: LOCAL_IP.to_string(),
            ping_time: 0,
        },
    );

    if hops.len() > 1 && hops[1].hop == 1 {
        for hop in hops.iter_mut().skip(1) {
            hop.hop += 1;
            hop.ttl += 1;
        }
    }
}
