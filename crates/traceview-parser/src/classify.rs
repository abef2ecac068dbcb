//! Header/banner classification: locating the first hop line.

use traceview_core::Dialect;

/// Returns the index of the first line that should be treated as a hop line.
///
/// `tracert` prints a banner (`Tracing route to ...`) followed by a
/// column-header block; the first hop line sits four lines after the banner.
/// `traceroute` prints a single `traceroute to ...` line and hop lines start
/// immediately after. When no banner is found in the leading lines, the
/// dialect's default offset applies; when the output is shorter than the
/// offset, degrade to offset 1 and let per-line matching discard the noise.
pub fn first_hop_index(lines: &[String], dialect: Dialect) -> usize {
    let mut start = match dialect {
        Dialect::Windows => 4,
        Dialect::Unix => 1,
    };

    match dialect {
        Dialect::Windows => {
            for (i, line) in lines.iter().take(5).enumerate() {
                if line.contains("Tracing route to") {
                    start = i + 4;
                    break;
                }
            }
        }
        Dialect::Unix => {
            for (i, line) in lines.iter().take(3).enumerate() {
                if line.contains("traceroute to") {
                    start = i + 1;
                    break;
                }
            }
        }
    }

    if start >= lines.len() {
        start = 1;
    }
    start
}
