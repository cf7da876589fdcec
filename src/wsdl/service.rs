use roxmltree::Node;

use super::builtins::WSDL_NAMESPACE;
use super::type_def::local_name;

fn is_wsdl(node: &Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(WSDL_NAMESPACE)
        && node.tag_name().name() == name
}

fn documentation_text(node: Node) -> String {
    node.children()
        .find(|c| is_wsdl(c, "documentation"))
        .and_then(|c| c.text())
        .unwrap_or("")
        .trim()
        .to_string()
}

/// One operation provided by the service, as declared on its port type.
#[derive(Clone, Debug)]
pub struct Operation {
    pub name: String,
    pub description: String,
    pub input_message: Option<String>,
    pub output_message: Option<String>,
}

/// The service described by the root WSDL document: its identifier,
/// documentation, and the operations it provides. Operations are keyed by
/// name; registering a name again replaces the earlier entry.
#[derive(Clone, Debug)]
pub struct Service {
    identifier: String,
    description: String,
    operations: Vec<Operation>,
}

impl Service {
    pub fn new(identifier: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            description: description.into(),
            operations: Vec::new(),
        }
    }

    /// Maps a `wsdl:definitions` root. The identifier comes from the
    /// `wsdl:service` element, falling back to the definitions name.
    pub fn map_from_xml(definitions: Node) -> Self {
        let identifier = definitions
            .descendants()
            .find(|n| is_wsdl(n, "service"))
            .and_then(|service| service.attribute("name"))
            .or_else(|| definitions.attribute("name"))
            .unwrap_or("")
            .to_string();

        let mut service = Self::new(identifier, documentation_text(definitions));

        for port_type in definitions.children().filter(|n| is_wsdl(n, "portType")) {
            for operation in port_type.children().filter(|n| is_wsdl(n, "operation")) {
                let Some(name) = operation.attribute("name") else {
                    continue;
                };
                let message = |direction: &str| {
                    operation
                        .children()
                        .find(|n| is_wsdl(n, direction))
                        .and_then(|n| n.attribute("message"))
                        .map(|m| local_name(m).to_string())
                };
                service.add_operation(Operation {
                    name: name.to_string(),
                    description: documentation_text(operation),
                    input_message: message("input"),
                    output_message: message("output"),
                });
            }
        }

        service
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Adds an operation, replacing any operation with the same name.
    pub fn add_operation(&mut self, operation: Operation) {
        self.operations.retain(|o| o.name != operation.name);
        self.operations.push(operation);
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|o| o.name == name)
    }
}
