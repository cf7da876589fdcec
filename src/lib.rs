pub mod codegen;
pub mod wsdl;
