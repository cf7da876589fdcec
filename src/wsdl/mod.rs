pub mod array_type;
pub mod builtins;
pub mod catalog;
pub mod complex_type;
pub mod enumeration;
pub mod error;
pub mod fetch;
pub mod member;
pub mod schema_document;
pub mod service;
pub mod type_def;

pub use array_type::{ArrayType, CapabilityDescriptor, CapabilitySet};
pub use catalog::{Type, TypeCatalog, TypeId};
pub use complex_type::ComplexType;
pub use enumeration::{EnumType, EnumValue};
pub use error::GeneratorError;
pub use fetch::{DocumentFetcher, FetchConfig, StreamFetcher};
pub use member::Member;
pub use schema_document::{DocumentId, LoadOptions, SchemaDocument, SchemaGraph};
pub use service::{Operation, Service};

/// Everything one generation run produces: the service description of the
/// root document, if it was a WSDL, and the finished type catalog.
pub struct Generation {
    pub service: Option<Service>,
    pub catalog: TypeCatalog,
}

/// Resolves the document graph rooted at `location` and builds the type
/// catalog from it. The graph, its location registry and the catalog are all
/// scoped to this call; nothing is shared across runs.
pub fn load_service(
    location: &str,
    fetcher: &dyn DocumentFetcher,
    options: LoadOptions,
) -> Result<Generation, GeneratorError> {
    let mut graph = SchemaGraph::new(options);
    let root = graph.load(location, fetcher)?;
    let service = graph.document(root).service().cloned();
    let catalog = TypeCatalog::build(&graph)?;
    Ok(Generation { service, catalog })
}

#[cfg(test)]
mod tests {
    use super::fetch::MapFetcher;
    use super::*;

    #[test]
    fn a_wsdl_root_yields_service_and_types() {
        let fetcher = MapFetcher::new([(
            "quotes.wsdl",
            r#"<wsdl:definitions name="Quotes"
                                xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
                                xmlns:xs="http://www.w3.org/2001/XMLSchema"
                                xmlns:tns="urn:quotes">
                 <wsdl:types>
                   <xs:schema>
                     <xs:complexType name="Quote">
                       <xs:sequence>
                         <xs:element name="symbol" type="xs:string"/>
                         <xs:element name="price" type="xs:decimal"/>
                       </xs:sequence>
                     </xs:complexType>
                   </xs:schema>
                 </wsdl:types>
                 <wsdl:portType name="QuotePort">
                   <wsdl:operation name="GetQuote">
                     <wsdl:input message="tns:GetQuoteRequest"/>
                   </wsdl:operation>
                 </wsdl:portType>
                 <wsdl:service name="QuoteService"/>
               </wsdl:definitions>"#,
        )]);

        let generation =
            load_service("quotes.wsdl", &fetcher, LoadOptions::default()).unwrap();

        let service = generation.service.unwrap();
        assert_eq!(service.identifier(), "QuoteService");
        assert!(service.operation("GetQuote").is_some());

        let quote = generation.catalog.lookup("Quote").unwrap();
        assert_eq!(quote.members().len(), 2);
    }

    #[test]
    fn a_plain_xsd_root_yields_no_service() {
        let fetcher = MapFetcher::new([(
            "types.xsd",
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
                 <xs:simpleType name="Color">
                   <xs:restriction base="xs:string">
                     <xs:enumeration value="red"/>
                   </xs:restriction>
                 </xs:simpleType>
               </xs:schema>"#,
        )]);

        let generation = load_service("types.xsd", &fetcher, LoadOptions::default()).unwrap();
        assert!(generation.service.is_none());
        assert_eq!(generation.catalog.len(), 1);
    }
}
