use crate::wsdl::GeneratorError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Constant {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug)]
pub struct Field {
    pub visibility: Visibility,
    pub name: String,
    pub type_name: Option<String>,
    pub nullable: bool,
}

#[derive(Clone, Debug)]
pub struct MethodParameter {
    pub name: String,
    pub type_name: Option<String>,
    pub nullable: bool,
}

#[derive(Clone, Debug)]
pub struct MethodReturn {
    pub type_name: String,
    pub nullable: bool,
}

/// A method descriptor. The body is opaque text as far as this model is
/// concerned; the renderer emits it verbatim and performs no semantic
/// validation.
#[derive(Clone, Debug)]
pub struct Method {
    pub visibility: Visibility,
    pub name: String,
    pub parameters: Vec<MethodParameter>,
    pub returns: Option<MethodReturn>,
    pub body: String,
}

/// The class handed to an external renderer: a name, an optional base class,
/// implemented capability-set names, and ordered constant/field/method
/// descriptors. Unlike member overwrite on a complex type, re-adding a name
/// here is a naming bug and fails with
/// [`DuplicateDefinition`](GeneratorError::DuplicateDefinition).
#[derive(Clone, Debug)]
pub struct ClassModel {
    name: String,
    extends: Option<String>,
    implements: Vec<String>,
    constants: Vec<Constant>,
    fields: Vec<Field>,
    methods: Vec<Method>,
}

impl ClassModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: None,
            implements: Vec::new(),
            constants: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_extends(&mut self, base: impl Into<String>) {
        self.extends = Some(base.into());
    }

    pub fn extends(&self) -> Option<&str> {
        self.extends.as_deref()
    }

    pub fn add_implementation(&mut self, interface: impl Into<String>) {
        self.implements.push(interface.into());
    }

    pub fn implements(&self) -> &[String] {
        &self.implements
    }

    pub fn add_constant(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), GeneratorError> {
        let name = name.into();
        if self.constant_exists(&name) {
            return Err(self.duplicate("constant", name));
        }
        self.constants.push(Constant {
            name,
            value: value.into(),
        });
        Ok(())
    }

    pub fn add_field(&mut self, field: Field) -> Result<(), GeneratorError> {
        if self.field_exists(&field.name) {
            return Err(self.duplicate("field", field.name));
        }
        self.fields.push(field);
        Ok(())
    }

    pub fn add_method(&mut self, method: Method) -> Result<(), GeneratorError> {
        if self.method_exists(&method.name) {
            return Err(self.duplicate("function", method.name));
        }
        self.methods.push(method);
        Ok(())
    }

    pub fn constant_exists(&self, name: &str) -> bool {
        self.constants.iter().any(|c| c.name == name)
    }

    pub fn field_exists(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn method_exists(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name)
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    fn duplicate(&self, kind: &'static str, name: String) -> GeneratorError {
        GeneratorError::DuplicateDefinition {
            class: self.name.clone(),
            kind,
            name,
        }
    }
}
