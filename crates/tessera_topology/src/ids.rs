//! Deterministic node and edge identifiers.

use std::collections::HashSet;

/// Lower-cases a name and replaces every non-alphanumeric character with `_`.
pub fn slug(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Returns the edge id for the link that attaches `node_id`.
pub fn edge_id(node_id: &str) -> String {
    format!("e_{node_id}")
}

/// Hands out unique ids, disambiguating repeats with their position index.
#[derive(Debug, Default)]
pub struct IdAllocator {
    used: HashSet<String>,
}

impl IdAllocator {
    /// Creates an allocator with no ids taken.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `base`, or `<base>_<index>` if `base` is already taken.
    ///
    /// Falls back to appending a counter in the unlikely case that the
    /// indexed form is also taken.
    pub fn claim(&mut self, base: String, index: usize) -> String {
        if self.used.insert(base.clone()) {
            return base;
        }
        let mut candidate = format!("{base}_{index}");
        let mut extra = 1;
        while !self.used.insert(candidate.clone()) {
            candidate = format!("{base}_{index}_{extra}");
            extra += 1;
        }
        tracing::warn!(base = %base, id = %candidate, "duplicate block id renamed");
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_normalizes() {
        assert_eq!(slug("PCIe"), "pcie");
        assert_eq!(slug("MIPI CSI-2"), "mipi_csi_2");
        assert_eq!(slug(" USB "), "usb");
    }

    #[test]
    fn edge_ids() {
        assert_eq!(edge_id("npu_0"), "e_npu_0");
    }

    #[test]
    fn allocator_disambiguates() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.claim("io_usb".into(), 0), "io_usb");
        assert_eq!(ids.claim("io_usb".into(), 1), "io_usb_1");
        assert_eq!(ids.claim("io_pcie".into(), 2), "io_pcie");
    }

    #[test]
    fn allocator_never_repeats() {
        let mut ids = IdAllocator::new();
        ids.claim("io_a_1".into(), 0);
        ids.claim("io_a".into(), 0);
        let third = ids.claim("io_a".into(), 1);
        assert_eq!(third, "io_a_1_1");
    }
}
