use std::collections::{HashMap, HashSet};

use super::array_type::{ArrayType, CapabilityDescriptor};
use super::builtins::is_builtin;
use super::complex_type::ComplexType;
use super::enumeration::{EnumType, EnumValue};
use super::error::GeneratorError;
use super::member::Member;
use super::schema_document::SchemaGraph;
use super::type_def::{RawTypeContent, RawTypeDefinition};

/// Handle of a record inside one [`TypeCatalog`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) usize);

/// A classified catalog record. The variant is decided once, when the raw
/// definition is first seen; later passes only fill in links.
#[derive(Clone, Debug)]
pub enum Type {
    Complex(ComplexType),
    Enum(EnumType),
    Array(ArrayType),
}

impl Type {
    pub fn name(&self) -> &str {
        match self {
            Self::Complex(record) => record.name(),
            Self::Enum(record) => record.name(),
            Self::Array(record) => record.name(),
        }
    }

    pub fn members(&self) -> &[Member] {
        match self {
            Self::Complex(record) => record.members(),
            Self::Array(record) => std::slice::from_ref(record.member()),
            Self::Enum(_) => &[],
        }
    }

    fn base_name(&self) -> Option<&str> {
        match self {
            Self::Complex(record) => record.base_name(),
            Self::Array(record) => record.base_name(),
            Self::Enum(_) => None,
        }
    }

    fn base(&self) -> Option<TypeId> {
        match self {
            Self::Complex(record) => record.base(),
            Self::Array(record) => record.base(),
            Self::Enum(_) => None,
        }
    }

    fn set_base(&mut self, base: TypeId) {
        match self {
            Self::Complex(record) => record.set_base(base),
            Self::Array(record) => record.set_base(base),
            Self::Enum(_) => {}
        }
    }
}

/// The finished type model of one generation run: every classified record,
/// addressable by name, with base-type chains linked. Read-only once built.
#[derive(Debug)]
pub struct TypeCatalog {
    types: Vec<Type>,
    by_name: HashMap<String, TypeId>,
}

impl TypeCatalog {
    /// Walks every document of the graph in load order and builds the
    /// catalog in two passes: classify and record each raw definition, then
    /// resolve the recorded base-type and member-type names. Definitions may
    /// freely forward-reference types the walk has not visited yet.
    pub fn build(graph: &SchemaGraph) -> Result<Self, GeneratorError> {
        let mut catalog = Self {
            types: Vec::new(),
            by_name: HashMap::new(),
        };

        for document in graph.documents() {
            for def in document.types().iter().chain(document.element_types()) {
                if catalog.by_name.contains_key(&def.name) {
                    continue;
                }
                if let Some(record) = classify(def)? {
                    catalog.insert(record);
                }
            }
        }

        catalog.link_base_types()?;
        catalog.resolve_member_types(graph)?;
        Ok(catalog)
    }

    fn insert(&mut self, record: Type) -> TypeId {
        let id = TypeId(self.types.len());
        self.by_name.insert(record.name().to_string(), id);
        self.types.push(record);
        id
    }

    /// Pass 2: resolve every recorded base-type name to a record in this
    /// catalog. A name that resolves nowhere is an error; a name that
    /// resolves to the record itself is stored as-is and neutralized by
    /// [`effective_base`](Self::effective_base).
    fn link_base_types(&mut self) -> Result<(), GeneratorError> {
        for index in 0..self.types.len() {
            let Some(base_name) = self.types[index].base_name().map(str::to_string) else {
                continue;
            };
            let Some(&target) = self.by_name.get(&base_name) else {
                return Err(GeneratorError::UnresolvedType { name: base_name });
            };
            self.types[index].set_base(target);
        }
        Ok(())
    }

    /// Checks every member's declared type against the built-in table, the
    /// catalog and the graph's raw definitions, and tags members whose type
    /// is an enumeration with the enumeration's restriction kind (the
    /// out-of-range representation such members also accept).
    ///
    /// Simple types without enumeration facets have no catalog record but
    /// still live in the graph; a member declared with one resolves to its
    /// base primitive and is accepted as-is.
    fn resolve_member_types(&mut self, graph: &SchemaGraph) -> Result<(), GeneratorError> {
        let raw_names: HashSet<&str> = graph
            .documents()
            .flat_map(|document| document.types().iter().chain(document.element_types()))
            .map(|def| def.name.as_str())
            .collect();

        let mut enum_members = Vec::new();
        for (index, record) in self.types.iter().enumerate() {
            for member in record.members() {
                let element = member.element_type();
                if is_builtin(element) {
                    continue;
                }
                match self.by_name.get(element) {
                    Some(target) => {
                        if let Type::Enum(record) = &self.types[target.0] {
                            enum_members.push((
                                index,
                                member.name().to_string(),
                                record.restriction().to_string(),
                            ));
                        }
                    }
                    None if raw_names.contains(element) => {}
                    None => {
                        return Err(GeneratorError::UnresolvedType {
                            name: element.to_string(),
                        })
                    }
                }
            }
        }

        for (index, member_name, restriction) in enum_members {
            match &mut self.types[index] {
                Type::Complex(record) => {
                    if let Some(member) = record
                        .members_mut()
                        .iter_mut()
                        .find(|m| m.name() == member_name)
                    {
                        member.set_extra_type(restriction);
                    }
                }
                Type::Array(record) => {
                    if record.member().name() == member_name {
                        record.member_mut().set_extra_type(restriction);
                    }
                }
                Type::Enum(_) => {}
            }
        }
        Ok(())
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.0]
    }

    pub fn id_of(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.id_of(name).map(|id| self.get(id))
    }

    pub fn types(&self) -> impl Iterator<Item = (TypeId, &Type)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, record)| (TypeId(index), record))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The linked base of a record with the self-link guard applied: a base
    /// link pointing at the record itself means "no base". Two distinct
    /// schema types can end up under one generated identifier when their
    /// namespaces collapse, and such a record must not extend itself.
    pub fn effective_base(&self, id: TypeId) -> Option<TypeId> {
        let base = self.types[id.0].base()?;
        (base != id).then_some(base)
    }

    /// The ordered union of all ancestor members, root-most first. The walk
    /// stops as soon as a base link is absent or self-referential. Name
    /// collisions across the chain are preserved; a consumer that flattens
    /// the list must keep the most-derived declaration.
    pub fn base_type_members(&self, id: TypeId) -> Vec<&Member> {
        match self.effective_base(id) {
            None => Vec::new(),
            Some(base) => {
                let mut members = self.base_type_members(base);
                members.extend(self.get(base).members());
                members
            }
        }
    }

    /// The synthesized capability descriptors of an array wrapper. Wrappers
    /// with an effective base inherit the capability set from the root of
    /// their chain and yield `None` here, as does every non-array record.
    pub fn capabilities(&self, id: TypeId) -> Option<Vec<CapabilityDescriptor>> {
        match &self.types[id.0] {
            Type::Array(record) if self.effective_base(id).is_none() => {
                Some(record.capabilities())
            }
            _ => None,
        }
    }
}

/// Pass 1: decide the variant of one raw definition. Simple types without
/// enumeration facets stay out of the catalog; they map to their base
/// primitive and never become a class.
fn classify(def: &RawTypeDefinition) -> Result<Option<Type>, GeneratorError> {
    match &def.content {
        RawTypeContent::Simple(simple) => {
            if simple.values.is_empty() {
                return Ok(None);
            }
            let mut record =
                EnumType::new(def.name.as_str(), simple.restriction.clone().unwrap_or_default());
            for value in &simple.values {
                record.add_value(value.clone().map(EnumValue::Text))?;
            }
            Ok(Some(Type::Enum(record)))
        }
        RawTypeContent::Complex(complex) => {
            if complex.repeating_wrapper {
                if let [raw] = complex.members.as_slice() {
                    let member =
                        Member::new(raw.type_name.as_str(), raw.name.as_str(), raw.nullable);
                    if member.is_repeating() {
                        return Ok(Some(Type::Array(ArrayType::new(
                            def.name.as_str(),
                            complex.base_type.clone(),
                            member,
                        ))));
                    }
                }
            }
            let mut record = ComplexType::new(def.name.as_str(), complex.base_type.clone());
            for raw in &complex.members {
                record.add_member(Member::new(
                    raw.type_name.as_str(),
                    raw.name.as_str(),
                    raw.nullable,
                ));
            }
            Ok(Some(Type::Complex(record)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fetch::MapFetcher;
    use super::super::schema_document::{LoadOptions, SchemaGraph};
    use super::*;

    fn build_catalog(entries: &[(&str, &str)]) -> Result<TypeCatalog, GeneratorError> {
        let mut map = Vec::new();
        for (location, body) in entries {
            map.push((
                format!("schemas/{location}"),
                format!(
                    r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                                  xmlns:tns="urn:test">{body}</xs:schema>"#
                ),
            ));
        }
        let fetcher = MapFetcher::new_owned(map);
        let mut graph = SchemaGraph::new(LoadOptions::default());
        let root = format!("schemas/{}", entries[0].0);
        graph.load(&root, &fetcher)?;
        TypeCatalog::build(&graph)
    }

    #[test]
    fn forward_references_link_across_documents() {
        let catalog = build_catalog(&[
            (
                "root.xsd",
                r#"<xs:include schemaLocation="base.xsd"/>
                   <xs:complexType name="Employee">
                     <xs:complexContent>
                       <xs:extension base="tns:Person">
                         <xs:sequence>
                           <xs:element name="salary" type="xs:decimal"/>
                         </xs:sequence>
                       </xs:extension>
                     </xs:complexContent>
                   </xs:complexType>"#,
            ),
            (
                "base.xsd",
                r#"<xs:complexType name="Person">
                     <xs:sequence>
                       <xs:element name="name" type="xs:string"/>
                     </xs:sequence>
                   </xs:complexType>"#,
            ),
        ])
        .unwrap();

        let employee = catalog.id_of("Employee").unwrap();
        let base = catalog.effective_base(employee).unwrap();
        assert_eq!(catalog.get(base).name(), "Person");
    }

    #[test]
    fn base_type_members_come_root_first() {
        let catalog = build_catalog(&[(
            "chain.xsd",
            r#"<xs:complexType name="X">
                 <xs:complexContent>
                   <xs:extension base="tns:Y">
                     <xs:sequence><xs:element name="x" type="xs:string"/></xs:sequence>
                   </xs:extension>
                 </xs:complexContent>
               </xs:complexType>
               <xs:complexType name="Y">
                 <xs:complexContent>
                   <xs:extension base="tns:Z">
                     <xs:sequence><xs:element name="y" type="xs:string"/></xs:sequence>
                   </xs:extension>
                 </xs:complexContent>
               </xs:complexType>
               <xs:complexType name="Z">
                 <xs:sequence><xs:element name="z" type="xs:string"/></xs:sequence>
               </xs:complexType>"#,
        )])
        .unwrap();

        let x = catalog.id_of("X").unwrap();
        let names: Vec<_> = catalog
            .base_type_members(x)
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names, ["z", "y"]);
    }

    #[test]
    fn a_self_referential_base_link_terminates_the_chain() {
        let catalog = build_catalog(&[(
            "collision.xsd",
            r#"<xs:complexType name="X">
                 <xs:complexContent>
                   <xs:extension base="tns:Y">
                     <xs:sequence><xs:element name="x" type="xs:string"/></xs:sequence>
                   </xs:extension>
                 </xs:complexContent>
               </xs:complexType>
               <xs:complexType name="Y">
                 <xs:complexContent>
                   <xs:extension base="tns:Y">
                     <xs:sequence><xs:element name="y" type="xs:string"/></xs:sequence>
                   </xs:extension>
                 </xs:complexContent>
               </xs:complexType>"#,
        )])
        .unwrap();

        let y = catalog.id_of("Y").unwrap();
        assert!(catalog.effective_base(y).is_none());
        assert!(catalog.base_type_members(y).is_empty());

        // The chain from X stops at Y; no further ancestor is consulted.
        let x = catalog.id_of("X").unwrap();
        let names: Vec<_> = catalog
            .base_type_members(x)
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names, ["y"]);
    }

    #[test]
    fn unresolved_base_types_fail_loudly() {
        let err = build_catalog(&[(
            "broken.xsd",
            r#"<xs:complexType name="Orphan">
                 <xs:complexContent>
                   <xs:extension base="tns:Missing">
                     <xs:sequence/>
                   </xs:extension>
                 </xs:complexContent>
               </xs:complexType>"#,
        )])
        .unwrap_err();

        assert!(matches!(
            err,
            GeneratorError::UnresolvedType { name } if name == "Missing"
        ));
    }

    #[test]
    fn unresolved_member_types_fail_loudly() {
        let err = build_catalog(&[(
            "broken.xsd",
            r#"<xs:complexType name="Order">
                 <xs:sequence>
                   <xs:element name="customer" type="tns:NoSuchCustomer"/>
                 </xs:sequence>
               </xs:complexType>"#,
        )])
        .unwrap_err();

        assert!(matches!(
            err,
            GeneratorError::UnresolvedType { name } if name == "NoSuchCustomer"
        ));
    }

    #[test]
    fn members_of_facet_restricted_simple_types_are_accepted() {
        let catalog = build_catalog(&[(
            "simple.xsd",
            r#"<xs:simpleType name="PhoneNumber">
                 <xs:restriction base="xs:string">
                   <xs:pattern value="[0-9]+"/>
                 </xs:restriction>
               </xs:simpleType>
               <xs:complexType name="Contact">
                 <xs:sequence>
                   <xs:element name="phone" type="tns:PhoneNumber"/>
                 </xs:sequence>
               </xs:complexType>"#,
        )])
        .unwrap();

        // PhoneNumber maps to its base primitive and gets no record of its
        // own, but a member declared with it still resolves.
        assert!(catalog.lookup("PhoneNumber").is_none());
        let contact = catalog.lookup("Contact").unwrap();
        assert_eq!(contact.members()[0].extra_type(), None);
    }

    #[test]
    fn enum_members_are_tagged_with_the_restriction_kind() {
        let catalog = build_catalog(&[(
            "enums.xsd",
            r#"<xs:complexType name="Order">
                 <xs:sequence>
                   <xs:element name="color" type="tns:Color"/>
                   <xs:element name="note" type="xs:string"/>
                 </xs:sequence>
               </xs:complexType>
               <xs:simpleType name="Color">
                 <xs:restriction base="xs:string">
                   <xs:enumeration value="red"/>
                   <xs:enumeration value="green"/>
                 </xs:restriction>
               </xs:simpleType>"#,
        )])
        .unwrap();

        let order = catalog.lookup("Order").unwrap();
        assert_eq!(order.members()[0].extra_type(), Some("string"));
        assert_eq!(order.members()[1].extra_type(), None);

        let Type::Enum(color) = catalog.lookup("Color").unwrap() else {
            panic!("expected an enum record");
        };
        assert_eq!(color.default_value().unwrap().to_string(), "red");
    }

    #[test]
    fn array_wrappers_are_classified_structurally() {
        let catalog = build_catalog(&[(
            "arrays.xsd",
            r#"<xs:complexType name="ArrayOfItem">
                 <xs:sequence>
                   <xs:element name="item" type="tns:Item" maxOccurs="unbounded"/>
                 </xs:sequence>
               </xs:complexType>
               <xs:complexType name="Basket">
                 <xs:sequence>
                   <xs:element name="label" type="xs:string"/>
                   <xs:element name="item" type="tns:Item" maxOccurs="unbounded"/>
                 </xs:sequence>
               </xs:complexType>
               <xs:complexType name="Item">
                 <xs:sequence><xs:element name="sku" type="xs:string"/></xs:sequence>
               </xs:complexType>"#,
        )])
        .unwrap();

        let array = catalog.id_of("ArrayOfItem").unwrap();
        assert!(matches!(catalog.get(array), Type::Array(_)));
        assert_eq!(catalog.capabilities(array).unwrap().len(), 10);

        // Merely having an array field does not make a wrapper.
        let basket = catalog.id_of("Basket").unwrap();
        assert!(matches!(catalog.get(basket), Type::Complex(_)));
        assert!(catalog.capabilities(basket).is_none());
    }

    #[test]
    fn array_wrappers_with_a_base_do_not_resynthesize_capabilities() {
        let catalog = build_catalog(&[(
            "arrays.xsd",
            r#"<xs:complexType name="SpecialItems">
                 <xs:complexContent>
                   <xs:extension base="tns:ArrayOfItem">
                     <xs:sequence>
                       <xs:element name="item" type="tns:Item" maxOccurs="unbounded"/>
                     </xs:sequence>
                   </xs:extension>
                 </xs:complexContent>
               </xs:complexType>
               <xs:complexType name="ArrayOfItem">
                 <xs:sequence>
                   <xs:element name="item" type="tns:Item" maxOccurs="unbounded"/>
                 </xs:sequence>
               </xs:complexType>
               <xs:complexType name="Item">
                 <xs:sequence><xs:element name="sku" type="xs:string"/></xs:sequence>
               </xs:complexType>"#,
        )])
        .unwrap();

        let special = catalog.id_of("SpecialItems").unwrap();
        assert!(matches!(catalog.get(special), Type::Array(_)));
        assert!(catalog.capabilities(special).is_none());

        let root = catalog.id_of("ArrayOfItem").unwrap();
        assert!(catalog.capabilities(root).is_some());
    }

    #[test]
    fn first_definition_of_a_name_wins() {
        let catalog = build_catalog(&[
            (
                "root.xsd",
                r#"<xs:include schemaLocation="other.xsd"/>
                   <xs:complexType name="Quote">
                     <xs:sequence><xs:element name="first" type="xs:string"/></xs:sequence>
                   </xs:complexType>"#,
            ),
            (
                "other.xsd",
                r#"<xs:complexType name="Quote">
                     <xs:sequence><xs:element name="second" type="xs:string"/></xs:sequence>
                   </xs:complexType>"#,
            ),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 1);
        let quote = catalog.lookup("Quote").unwrap();
        assert_eq!(quote.members()[0].name(), "first");
    }
}
