pub mod class_model;

pub use class_model::{
    ClassModel, Constant, Field, Method, MethodParameter, MethodReturn, Visibility,
};

use crate::wsdl::{CapabilityDescriptor, GeneratorError, Type, TypeCatalog};

/// The external rendering seam. Implementations turn class models into
/// source text for their target language; emission is purely syntactic and
/// capability descriptors carry everything needed to produce the
/// corresponding methods.
pub trait Renderer {
    fn render_class(
        &mut self,
        class: &ClassModel,
        capabilities: Option<&[CapabilityDescriptor]>,
    ) -> String;
}

/// Assembles one class model per catalog record.
///
/// Enumerations become constant lists with the default value promoted under
/// `__default`; complex types carry their own members as protected fields
/// and the guarded base-class name; array wrappers without a base chain
/// additionally name the capability sets they implement.
pub fn build_classes(catalog: &TypeCatalog) -> Result<Vec<ClassModel>, GeneratorError> {
    let mut classes = Vec::new();

    for (id, record) in catalog.types() {
        let mut class = ClassModel::new(record.name());
        match record {
            Type::Enum(record) => {
                if let Some(default) = record.default_value() {
                    class.add_constant("__default", default.to_string())?;
                }
                for value in record.values() {
                    class.add_constant(value.to_string(), value.to_string())?;
                }
            }
            Type::Complex(_) | Type::Array(_) => {
                if let Some(base) = catalog.effective_base(id) {
                    class.set_extends(catalog.get(base).name());
                }
                for member in record.members() {
                    class.add_field(Field {
                        visibility: Visibility::Protected,
                        name: member.name().to_string(),
                        type_name: Some(member.type_name().to_string()),
                        nullable: member.nullable(),
                    })?;
                }
                if let Some(descriptors) = catalog.capabilities(id) {
                    let mut sets = Vec::new();
                    for descriptor in &descriptors {
                        if !sets.contains(&descriptor.set) {
                            sets.push(descriptor.set);
                        }
                    }
                    for set in sets {
                        class.add_implementation(set.name());
                    }
                }
            }
        }
        classes.push(class);
    }

    Ok(classes)
}
