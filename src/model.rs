use std::collections::HashMap;

/// Cache index number for the "client script" archive namespace.
pub const CLIENTSCRIPT_NAMESPACE: u16 = 12;

/// Scripts with ids at or above this are locally injected content and are
/// exempt from hash verification; everything below is shipped baseline
/// content that must carry a `.hash` sidecar.
pub const LOCAL_SCRIPT_BASE: u32 = 10_000;

/// Combine two 16-bit halves into one 32-bit global id.
pub fn pack_id(high: u16, low: u16) -> u32 {
    (high as u32) << 16 | low as u32
}

/// Flat `"interface:component"` → packed-id map handed to the assembler.
///
/// Built once per run by `symbols::build`, read-only afterwards. Keys are
/// case-folded; inserting an existing key replaces the old value (last
/// write wins).
#[derive(Debug, Default)]
pub struct SymbolTable {
    map: HashMap<String, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous value when the key was already present.
    pub fn insert(&mut self, full_name: String, packed: u32) -> Option<u32> {
        self.map.insert(full_name, packed)
    }

    pub fn lookup(&self, full_name: &str) -> Option<u32> {
        self.map.get(full_name).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// One assembled script as returned by the external assembler.
///
/// The `id` is assigned from the source content; `body` is the instruction
/// stream, opaque to the packer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDefinition {
    pub id: u32,
    pub body: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_id_combines_halves() {
        assert_eq!(pack_id(5, 3), 327_683);
        assert_eq!(pack_id(0, 0), 0);
        assert_eq!(pack_id(0xffff, 0xffff), 0xffff_ffff);
    }

    #[test]
    fn test_symbol_table_last_write_wins() {
        let mut table = SymbolTable::new();
        assert_eq!(table.insert("iface:comp".into(), 1), None);
        assert_eq!(table.insert("iface:comp".into(), 2), Some(1));
        assert_eq!(table.lookup("iface:comp"), Some(2));
        assert_eq!(table.len(), 1);
    }
}
