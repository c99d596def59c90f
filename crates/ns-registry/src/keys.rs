//! Storage layout of record facts: one prefix byte per fact table, then the name bytes.

pub const VALUE_PREFIX: u8 = 0x00;
pub const OWNER_PREFIX: u8 = 0x01;
pub const PRICE_PREFIX: u8 = 0x02;

pub fn value_key(name: &str) -> Vec<u8> {
    prefixed(VALUE_PREFIX, name)
}

pub fn owner_key(name: &str) -> Vec<u8> {
    prefixed(OWNER_PREFIX, name)
}

pub fn price_key(name: &str) -> Vec<u8> {
    prefixed(PRICE_PREFIX, name)
}

fn prefixed(prefix: u8, name: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + name.len());
    key.push(prefix);
    key.extend_from_slice(name.as_bytes());
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fact_tables_do_not_collide() {
        assert_eq!(value_key("alice.id"), b"\x00alice.id".to_vec());
        assert_eq!(owner_key("alice.id"), b"\x01alice.id".to_vec());
        assert_eq!(price_key("alice.id"), b"\x02alice.id".to_vec());
        assert_ne!(value_key("a"), owner_key("a"));
        // names are case-sensitive
        assert_ne!(value_key("Alice.id"), value_key("alice.id"));
    }
}
