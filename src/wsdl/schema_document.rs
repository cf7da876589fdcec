use std::collections::{HashMap, HashSet, VecDeque};

use roxmltree::{Document, ParsingOptions};

use super::builtins::{WSDL_NAMESPACE, XS_NAMESPACE};
use super::error::GeneratorError;
use super::fetch::{resolve_location, DocumentFetcher};
use super::service::Service;
use super::type_def::RawTypeDefinition;

/// Handle of one loaded document inside a [`SchemaGraph`]. Documents are
/// addressed by index instead of by reference so cyclic imports never form an
/// object-graph cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocumentId(pub(crate) usize);

/// One loaded WSDL/XSD document: its normalized location, the raw type
/// definitions extracted from it, and the documents it references via
/// imports and includes. Immutable once loading completes.
#[derive(Debug)]
pub struct SchemaDocument {
    location: String,
    types: Vec<RawTypeDefinition>,
    element_types: Vec<RawTypeDefinition>,
    reference_locations: Vec<String>,
    references: Vec<DocumentId>,
    service: Option<Service>,
}

impl SchemaDocument {
    /// Extracts everything the graph keeps from a parsed document: named
    /// simple and complex type definitions, named elements wrapping an
    /// anonymous complex type, the reference locations (in document order:
    /// `wsdl:import/@location`, `xs:import/@schemaLocation`,
    /// `xs:include/@schemaLocation`), and service information when the root
    /// is a `wsdl:definitions`.
    fn map_from_xml(location: &str, document: &Document) -> Self {
        let mut types = Vec::new();
        let mut element_types = Vec::new();
        let mut reference_locations = Vec::new();

        for node in document.root().descendants().filter(|n| n.is_element()) {
            let tag = node.tag_name();
            if tag.namespace() == Some(XS_NAMESPACE) {
                match tag.name() {
                    "simpleType" => {
                        if let Some(def) = RawTypeDefinition::map_simple_type(node) {
                            types.push(def);
                        }
                    }
                    "complexType" => {
                        if let Some(def) = RawTypeDefinition::map_complex_type(node) {
                            types.push(def);
                        }
                    }
                    "element" => {
                        if let Some(def) = RawTypeDefinition::map_element(node) {
                            element_types.push(def);
                        }
                    }
                    "import" | "include" => {
                        if let Some(reference) = node.attribute("schemaLocation") {
                            reference_locations.push(reference.to_string());
                        }
                    }
                    _ => {}
                }
            } else if tag.namespace() == Some(WSDL_NAMESPACE) && tag.name() == "import" {
                if let Some(reference) = node.attribute("location") {
                    reference_locations.push(reference.to_string());
                }
            }
        }

        let root = document.root_element();
        let service = (root.tag_name().namespace() == Some(WSDL_NAMESPACE)
            && root.tag_name().name() == "definitions")
            .then(|| Service::map_from_xml(root));

        Self {
            location: location.to_string(),
            types,
            element_types,
            reference_locations,
            references: Vec::new(),
            service,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn references(&self) -> &[DocumentId] {
        &self.references
    }

    pub fn service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    pub(crate) fn types(&self) -> &[RawTypeDefinition] {
        &self.types
    }

    pub(crate) fn element_types(&self) -> &[RawTypeDefinition] {
        &self.element_types
    }

    /// A named simple or complex type definition takes precedence over an
    /// element wrapping an anonymous complex type of the same name.
    fn local_type(&self, name: &str) -> Option<&RawTypeDefinition> {
        self.types
            .iter()
            .find(|def| def.name == name)
            .or_else(|| self.element_types.iter().find(|def| def.name == name))
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct LoadOptions {
    pub allow_dtd: bool,
}

/// The document graph of one resolution run. Holds every loaded document in
/// an arena keyed by normalized location; the registry is what terminates
/// cyclic imports. Not shared across runs.
pub struct SchemaGraph {
    documents: Vec<SchemaDocument>,
    by_location: HashMap<String, DocumentId>,
    options: LoadOptions,
}

impl SchemaGraph {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            documents: Vec::new(),
            by_location: HashMap::new(),
            options,
        }
    }

    /// Fetches and parses the document at `location`, then recurses into its
    /// references. The document is registered under its normalized location
    /// before the recursion, so a reference back to this or an ancestor
    /// location reuses the node under construction instead of re-parsing
    /// forever.
    pub fn load(
        &mut self,
        location: &str,
        fetcher: &dyn DocumentFetcher,
    ) -> Result<DocumentId, GeneratorError> {
        if let Some(&id) = self.by_location.get(location) {
            return Ok(id);
        }

        let text = fetcher.fetch(location)?;
        let parsing = ParsingOptions {
            allow_dtd: self.options.allow_dtd,
            ..ParsingOptions::default()
        };
        let document =
            Document::parse_with_options(&text, parsing).map_err(|source| GeneratorError::Parse {
                location: location.to_string(),
                source,
            })?;

        let id = DocumentId(self.documents.len());
        self.by_location.insert(location.to_string(), id);
        self.documents.push(SchemaDocument::map_from_xml(location, &document));

        let reference_locations = self.documents[id.0].reference_locations.clone();
        let mut references = Vec::with_capacity(reference_locations.len());
        for reference in &reference_locations {
            let resolved = resolve_location(location, reference);
            references.push(self.load(&resolved, fetcher)?);
        }
        self.documents[id.0].references = references;

        Ok(id)
    }

    pub fn document(&self, id: DocumentId) -> &SchemaDocument {
        &self.documents[id.0]
    }

    pub fn documents(&self) -> impl Iterator<Item = &SchemaDocument> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Searches for a type definition by name: the starting document first,
    /// then breadth-first over referenced documents. The visited set is local
    /// to this query, so a reference cycle reached mid-search does not loop.
    pub fn find_type(&self, from: DocumentId, name: &str) -> Option<&RawTypeDefinition> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(from);
        queue.push_back(from);

        while let Some(id) = queue.pop_front() {
            let document = &self.documents[id.0];
            if let Some(def) = document.local_type(name) {
                return Some(def);
            }
            for &reference in &document.references {
                if visited.insert(reference) {
                    queue.push_back(reference);
                }
            }
        }
        None
    }
}
