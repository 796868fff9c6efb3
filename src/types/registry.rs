//! Named enum and object types referenced from type expressions

use std::collections::HashMap;

use super::annotation::{EnumType, ObjectType, TypeAnnotation};

/// Registry of user-defined types by name
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    enums: HashMap<String, EnumType>,
    objects: HashMap<String, ObjectType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enum, replacing any type of the same name
    pub fn register_enum(&mut self, enum_type: EnumType) {
        self.objects.remove(&enum_type.name);
        self.enums.insert(enum_type.name.clone(), enum_type);
    }

    /// Register an object type, replacing any type of the same name
    pub fn register_object(&mut self, object_type: ObjectType) {
        self.enums.remove(&object_type.name);
        self.objects.insert(object_type.name.clone(), object_type);
    }

    /// Resolve a name to an annotation
    pub fn lookup(&self, name: &str) -> Option<TypeAnnotation> {
        if let Some(e) = self.enums.get(name) {
            return Some(TypeAnnotation::Enum(e.clone()));
        }
        self.objects.get(name).cloned().map(TypeAnnotation::Object)
    }

    pub fn len(&self) -> usize {
        self.enums.len() + self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let mut registry = TypeRegistry::new();
        registry.register_enum(EnumType::new("State", vec!["open".into(), "closed".into()]));
        registry.register_object(ObjectType::new("Issue").with_field("title", TypeAnnotation::Str));

        assert_eq!(registry.len(), 2);
        assert!(matches!(registry.lookup("State"), Some(TypeAnnotation::Enum(_))));
        assert!(matches!(registry.lookup("Issue"), Some(TypeAnnotation::Object(_))));
        assert!(registry.lookup("Missing").is_none());
    }

    #[test]
    fn test_registry_replaces_by_name() {
        let mut registry = TypeRegistry::new();
        registry.register_enum(EnumType::new("Thing", vec!["a".into()]));
        registry.register_object(ObjectType::new("Thing"));

        assert_eq!(registry.len(), 1);
        assert!(matches!(registry.lookup("Thing"), Some(TypeAnnotation::Object(_))));
    }

    #[test]
    fn test_registry_empty() {
        let registry = TypeRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.lookup("str").is_none());
    }
}
