//! Declaration-level syntax tree for a Go source file.

/// The parts of a Go file the registry cares about: package clause, imports
/// and top-level type declarations. Functions and value declarations are
/// skipped by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub package: String,
    pub imports: Vec<ImportSpec>,
    pub types: Vec<TypeDecl>,
}

/// One import spec, e.g. `other "example.com/app/other"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Explicit local name: an identifier, `_` or `.`.
    pub name: Option<String>,
    pub path: String,
}

impl ImportSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            name: None,
            path: path.into(),
        }
    }

    pub fn named(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    /// `type Set[T comparable] struct { ... }`
    pub has_type_params: bool,
    /// `type Alias = other.Type`
    pub is_alias: bool,
    pub ty: TypeExpr,
}

impl TypeDecl {
    /// A named struct type that can be instantiated with `new(pkg.Name)`.
    pub fn is_struct(&self) -> bool {
        !self.is_alias && matches!(self.ty, TypeExpr::Struct(_))
    }

    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }

    pub fn fields(&self) -> &[Field] {
        match &self.ty {
            TypeExpr::Struct(fields) => fields,
            _ => &[],
        }
    }
}

/// A struct field declaration. Embedded fields have no names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    pub tag: Option<String>,
}

impl Field {
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

/// A type expression, reduced to the shapes that matter for reference
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `User`, `string`
    Ident(String),
    /// `other.Address`
    Qualified { package: String, name: String },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`, `[N]T` and `[...]T`
    Slice(Box<TypeExpr>),
    /// `map[K]V`
    Map(Box<TypeExpr>, Box<TypeExpr>),
    /// `interface{ ... }`
    Interface,
    /// `func(...) ...`, `chan T`, `<-chan T`, `chan<- T`
    FuncOrChan,
    /// `struct{ ... }`
    Struct(Vec<Field>),
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident(name.into())
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(inner))
    }

    pub fn slice(inner: TypeExpr) -> Self {
        TypeExpr::Slice(Box::new(inner))
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map(Box::new(key), Box::new(value))
    }

    /// Collect every package-qualified name reachable through pointer,
    /// slice/array and map wrappers, as `(package alias, type name)` pairs.
    ///
    /// Map keys come before values. Interface, function, channel and
    /// anonymous struct types are opaque; unqualified names are local to the
    /// package and are not reported.
    pub fn qualified_refs(&self) -> Vec<(&str, &str)> {
        let mut refs = Vec::new();
        let mut stack = vec![self];

        while let Some(ty) = stack.pop() {
            match ty {
                TypeExpr::Qualified { package, name } => refs.push((package.as_str(), name.as_str())),
                TypeExpr::Pointer(inner) | TypeExpr::Slice(inner) => stack.push(inner),
                TypeExpr::Map(key, value) => {
                    stack.push(value);
                    stack.push(key);
                }
                TypeExpr::Ident(_)
                | TypeExpr::Interface
                | TypeExpr::FuncOrChan
                | TypeExpr::Struct(_) => {}
            }
        }

        refs
    }
}

/// Go exports identifiers that start with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
