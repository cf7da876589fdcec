use super::catalog::TypeId;
use super::member::Member;

/// A complex type whose sole purpose is to carry one repeating member.
///
/// Wrappers without their own base-type chain are eligible for capability
/// synthesis; wrappers with a base inherit the capability set from the root
/// of the chain instead.
#[derive(Clone, Debug)]
pub struct ArrayType {
    name: String,
    base_name: Option<String>,
    base: Option<TypeId>,
    member: Member,
}

/// The capability families an array wrapper can expose.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CapabilitySet {
    IndexAccess,
    SequentialIteration,
    ElementCount,
}

impl CapabilitySet {
    pub fn name(self) -> &'static str {
        match self {
            Self::IndexAccess => "IndexAccess",
            Self::SequentialIteration => "SequentialIteration",
            Self::ElementCount => "ElementCount",
        }
    }
}

/// Parameter shape of a synthesized operation. An absent `type_name` leaves
/// the parameter untyped for the renderer.
#[derive(Clone, Debug)]
pub struct Parameter {
    pub name: &'static str,
    pub type_name: Option<String>,
    pub optional: bool,
}

#[derive(Clone, Debug)]
pub struct ReturnType {
    pub name: String,
    pub nullable: bool,
}

/// One synthesized operation on an array wrapper, as pure data for an
/// external renderer: no text formatting happens here.
#[derive(Clone, Debug)]
pub struct CapabilityDescriptor {
    pub set: CapabilitySet,
    pub operation: &'static str,
    pub parameters: Vec<Parameter>,
    pub returns: Option<ReturnType>,
}

impl ArrayType {
    pub fn new(name: impl Into<String>, base_name: Option<String>, member: Member) -> Self {
        Self {
            name: name.into(),
            base_name,
            base: None,
            member,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_name(&self) -> Option<&str> {
        self.base_name.as_deref()
    }

    pub fn base(&self) -> Option<TypeId> {
        self.base
    }

    pub(crate) fn set_base(&mut self, base: TypeId) {
        self.base = Some(base);
    }

    /// The backing collection field.
    pub fn member(&self) -> &Member {
        &self.member
    }

    pub(crate) fn member_mut(&mut self) -> &mut Member {
        &mut self.member
    }

    /// The declared member type with its multiplicity marker removed.
    pub fn element_type(&self) -> &str {
        self.member.element_type()
    }

    /// Synthesizes the full capability descriptor set for this wrapper:
    /// index access (existence check, get, set, unset), sequential iteration
    /// (current, next, key, valid, rewind) and element count.
    ///
    /// `offsetSet` takes its offset as an optional parameter; calling it
    /// without an offset appends the value instead of failing. `valid`
    /// reports true exactly when `key` yields a value.
    pub fn capabilities(&self) -> Vec<CapabilityDescriptor> {
        let element = self.element_type().to_string();
        let offset = || Parameter {
            name: "offset",
            type_name: None,
            optional: false,
        };
        let element_return = || {
            Some(ReturnType {
                name: element.clone(),
                nullable: false,
            })
        };
        let bool_return = || {
            Some(ReturnType {
                name: "bool".to_string(),
                nullable: false,
            })
        };

        vec![
            CapabilityDescriptor {
                set: CapabilitySet::IndexAccess,
                operation: "offsetExists",
                parameters: vec![offset()],
                returns: bool_return(),
            },
            CapabilityDescriptor {
                set: CapabilitySet::IndexAccess,
                operation: "offsetGet",
                parameters: vec![offset()],
                returns: element_return(),
            },
            CapabilityDescriptor {
                set: CapabilitySet::IndexAccess,
                operation: "offsetSet",
                parameters: vec![
                    Parameter {
                        name: "offset",
                        type_name: None,
                        optional: true,
                    },
                    Parameter {
                        name: "value",
                        type_name: Some(element.clone()),
                        optional: false,
                    },
                ],
                returns: None,
            },
            CapabilityDescriptor {
                set: CapabilitySet::IndexAccess,
                operation: "offsetUnset",
                parameters: vec![offset()],
                returns: None,
            },
            CapabilityDescriptor {
                set: CapabilitySet::SequentialIteration,
                operation: "current",
                parameters: vec![],
                returns: element_return(),
            },
            CapabilityDescriptor {
                set: CapabilitySet::SequentialIteration,
                operation: "next",
                parameters: vec![],
                returns: None,
            },
            CapabilityDescriptor {
                set: CapabilitySet::SequentialIteration,
                operation: "key",
                parameters: vec![],
                returns: Some(ReturnType {
                    name: "string".to_string(),
                    nullable: true,
                }),
            },
            CapabilityDescriptor {
                set: CapabilitySet::SequentialIteration,
                operation: "valid",
                parameters: vec![],
                returns: bool_return(),
            },
            CapabilityDescriptor {
                set: CapabilitySet::SequentialIteration,
                operation: "rewind",
                parameters: vec![],
                returns: None,
            },
            CapabilityDescriptor {
                set: CapabilitySet::ElementCount,
                operation: "count",
                parameters: vec![],
                returns: Some(ReturnType {
                    name: "int".to_string(),
                    nullable: false,
                }),
            },
        ]
    }
}
