use roxmltree::Node;

use super::builtins::{WSDL_NAMESPACE, XS_NAMESPACE};

/// Strips a namespace prefix from a qualified name, `tns:Item` -> `Item`.
pub fn local_name(qname: &str) -> &str {
    qname.rsplit_once(':').map_or(qname, |(_, local)| local)
}

fn is_xs(node: &Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(XS_NAMESPACE)
        && node.tag_name().name() == name
}

/// A named schema construct discovered while scanning a document: a simple
/// type, a complex type, or an element wrapping an anonymous complex type.
/// Raw definitions are owned data extracted at load time and are not
/// retained beyond catalog construction.
#[derive(Clone, Debug)]
pub struct RawTypeDefinition {
    pub name: String,
    pub content: RawTypeContent,
}

#[derive(Clone, Debug)]
pub enum RawTypeContent {
    Simple(RawSimpleType),
    Complex(RawComplexType),
}

#[derive(Clone, Debug)]
pub struct RawSimpleType {
    /// Base of the restriction, prefix stripped.
    pub restriction: Option<String>,
    /// `value` attributes of the enumeration facets, in document order. An
    /// enumeration facet without a value attribute yields `None`.
    pub values: Vec<Option<String>>,
}

#[derive(Clone, Debug)]
pub struct RawComplexType {
    /// Base named by a complexContent extension or (non-array) restriction.
    pub base_type: Option<String>,
    /// Set when the shape is structurally a repeating wrapper: a SOAP
    /// encoding array restriction, or a content model whose only particle is
    /// a single unbounded element.
    pub repeating_wrapper: bool,
    pub members: Vec<RawMember>,
}

#[derive(Clone, Debug)]
pub struct RawMember {
    /// Declared type, prefix stripped, with `[]` appended for unbounded
    /// elements.
    pub type_name: String,
    pub name: String,
    pub nullable: bool,
}

impl RawTypeDefinition {
    /// Maps a named `xs:simpleType` element.
    pub fn map_simple_type(node: Node) -> Option<Self> {
        let name = node.attribute("name")?;
        let restriction_node = node.children().find(|c| is_xs(c, "restriction"));
        let restriction = restriction_node
            .and_then(|r| r.attribute("base"))
            .map(|base| local_name(base).to_string());
        let values = restriction_node
            .map(|r| {
                r.children()
                    .filter(|c| is_xs(c, "enumeration"))
                    .map(|facet| facet.attribute("value").map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            name: name.to_string(),
            content: RawTypeContent::Simple(RawSimpleType {
                restriction,
                values,
            }),
        })
    }

    /// Maps a named `xs:complexType` element.
    pub fn map_complex_type(node: Node) -> Option<Self> {
        let name = node.attribute("name")?;
        Some(Self {
            name: name.to_string(),
            content: RawTypeContent::Complex(RawComplexType::map_from_xml(node)),
        })
    }

    /// Maps a named `xs:element` whose single child is an anonymous complex
    /// type. Named simple elements are not types and yield `None`.
    pub fn map_element(node: Node) -> Option<Self> {
        let name = node.attribute("name")?;
        // Only the last element child is considered.
        let child = node.children().filter(|c| c.is_element()).last()?;
        if !is_xs(&child, "complexType") {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            content: RawTypeContent::Complex(RawComplexType::map_from_xml(child)),
        })
    }
}

impl RawComplexType {
    pub fn map_from_xml(node: Node) -> Self {
        let mut base_type = None;
        let mut members = Vec::new();
        let mut stats = MemberStats::default();
        let mut soap_array = false;

        if let Some(content) = node.children().find(|c| is_xs(c, "complexContent")) {
            if let Some(extension) = content.children().find(|c| is_xs(c, "extension")) {
                base_type = extension
                    .attribute("base")
                    .map(|base| local_name(base).to_string());
                collect_members(extension, &mut members, &mut stats);
            } else if let Some(restriction) = content.children().find(|c| is_xs(c, "restriction")) {
                let base = restriction.attribute("base").map(local_name);
                if base == Some("Array") {
                    soap_array = true;
                    if let Some(item_type) = soap_array_item_type(restriction) {
                        let element = item_type.strip_suffix("[]").unwrap_or(&item_type);
                        members.push(RawMember {
                            name: backing_field_name(element),
                            type_name: item_type.clone(),
                            nullable: false,
                        });
                    }
                } else {
                    base_type = base.map(str::to_string);
                    collect_members(restriction, &mut members, &mut stats);
                }
            }
        } else {
            collect_members(node, &mut members, &mut stats);
        }

        let repeating_wrapper = soap_array
            || (members.len() == 1 && stats.elements == 1 && stats.unbounded == 1);

        Self {
            base_type,
            repeating_wrapper,
            members,
        }
    }
}

#[derive(Default)]
struct MemberStats {
    elements: usize,
    unbounded: usize,
}

/// Collects element and attribute members below `container`, recursing into
/// nested model groups (`sequence`, `all`, `choice`).
fn collect_members(container: Node, members: &mut Vec<RawMember>, stats: &mut MemberStats) {
    for child in container.children() {
        if is_xs(&child, "sequence") || is_xs(&child, "all") || is_xs(&child, "choice") {
            collect_members(child, members, stats);
        } else if is_xs(&child, "element") {
            let Some(name) = child.attribute("name") else {
                continue;
            };
            let mut type_name = child
                .attribute("type")
                .map_or("anyType", local_name)
                .to_string();
            if child.attribute("maxOccurs") == Some("unbounded") {
                type_name.push_str("[]");
                stats.unbounded += 1;
            }
            let nullable = child.attribute("minOccurs") == Some("0")
                || child.attribute("nillable") == Some("true");
            members.push(RawMember {
                name: name.to_string(),
                type_name,
                nullable,
            });
            stats.elements += 1;
        } else if is_xs(&child, "attribute") {
            let Some(name) = child.attribute("name") else {
                continue;
            };
            let type_name = child
                .attribute("type")
                .map_or("anyType", local_name)
                .to_string();
            let nullable = child.attribute("use") != Some("required");
            members.push(RawMember {
                name: name.to_string(),
                type_name,
                nullable,
            });
        }
    }
}

/// The `wsdl:arrayType` value of a SOAP encoding array restriction, e.g.
/// `tns:Item[]` -> `Item[]`.
fn soap_array_item_type(restriction: Node) -> Option<String> {
    restriction
        .descendants()
        .find_map(|n| n.attribute((WSDL_NAMESPACE, "arrayType")))
        .map(|value| local_name(value).to_string())
}

fn backing_field_name(element: &str) -> String {
    let mut chars = element.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => "item".to_string(),
    }
}
