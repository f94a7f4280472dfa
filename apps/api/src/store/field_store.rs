use tracing::debug;

use crate::models::{Identity, IdentityField};

/// Holds the scalar identity fields of a resume.
///
/// `set` is unconditional: any string is accepted for any field.
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    identity: Identity,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &Identity {
        &self.identity
    }

    pub fn set(&mut self, field: IdentityField, value: String) {
        debug!(%field, len = value.len(), "identity field set");
        match field {
            IdentityField::Name => self.identity.name = value,
            IdentityField::Email => self.identity.email = value,
            IdentityField::Phone => self.identity.phone = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = FieldStore::new();
        assert_eq!(store.get(), &Identity::default());
    }

    #[test]
    fn test_set_replaces_single_field() {
        let mut store = FieldStore::new();
        store.set(IdentityField::Name, "Ada Lovelace".to_string());
        store.set(IdentityField::Email, "ada@example.com".to_string());

        let identity = store.get();
        assert_eq!(identity.name, "Ada Lovelace");
        assert_eq!(identity.email, "ada@example.com");
        assert_eq!(identity.phone, "");
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let mut store = FieldStore::new();
        store.set(IdentityField::Phone, "555-0100".to_string());
        store.set(IdentityField::Phone, "555-0199".to_string());
        assert_eq!(store.get().phone, "555-0199");
    }

    #[test]
    fn test_set_accepts_empty_and_malformed_values() {
        let mut store = FieldStore::new();
        store.set(IdentityField::Name, "Someone".to_string());
        store.set(IdentityField::Name, String::new());
        store.set(IdentityField::Email, "not-an-email".to_string());
        store.set(IdentityField::Phone, "call me maybe".to_string());

        let identity = store.get();
        assert_eq!(identity.name, "");
        assert_eq!(identity.email, "not-an-email");
        assert_eq!(identity.phone, "call me maybe");
    }
}
