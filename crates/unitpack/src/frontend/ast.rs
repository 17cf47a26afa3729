//! Declaration tree produced by the frontend
//!
//! The packer never needs to understand executable code, so type bodies are
//! kept as raw source slices; only the declaration skeleton (namespaces,
//! directives, type headers, nesting) is modeled. Namespace identity is the
//! *resolved* fully-qualified path computed from syntactic nesting, not the
//! raw spelling, so `namespace A.B { }` and `namespace A { namespace B { } }`
//! later merge into the same group.

use std::{ops::Range, path::PathBuf};

/// One parsed source file: global-scope directives plus top-level namespaces.
#[derive(Debug, Clone)]
pub struct Module {
    /// Path the module was parsed from.
    pub path: PathBuf,
    /// Extern-alias directives at global scope.
    pub extern_aliases: Vec<ExternAlias>,
    /// Import directives at global scope.
    pub imports: Vec<ImportDirective>,
    /// Top-level namespace declarations in source order.
    pub namespaces: Vec<NamespaceDecl>,
}

impl Module {
    /// A module with no namespace declarations contributes nothing to the
    /// merged unit and is skipped by the unit merger.
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

/// One `namespace` block, possibly nested.
#[derive(Debug, Clone)]
pub struct NamespaceDecl {
    /// Name exactly as written after the `namespace` keyword, dot-normalized.
    pub spelled_name: String,
    /// Extern-alias directives declared inside this block.
    pub extern_aliases: Vec<ExternAlias>,
    /// Import directives declared inside this block.
    pub imports: Vec<ImportDirective>,
    /// Member type declarations in source order.
    pub types: Vec<TypeDecl>,
    /// Nested namespace blocks in source order.
    pub children: Vec<NamespaceDecl>,
}

impl NamespaceDecl {
    pub fn new(spelled_name: String) -> Self {
        Self {
            spelled_name,
            extern_aliases: Vec::new(),
            imports: Vec::new(),
            types: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// An `extern alias X;` directive. Dedup key is the alias name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternAlias {
    pub alias: String,
}

/// A `using` directive. Dedup key is the referenced path, not the full
/// spelling, so `using X = A.B;` and `using A.B;` collide and the first
/// occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDirective {
    /// Local alias, for `using X = A.B;` forms.
    pub alias: Option<String>,
    /// Whether this is a `using static` directive.
    pub is_static: bool,
    /// The referenced path — the equality key.
    pub target: String,
}

impl ImportDirective {
    /// Canonical rendering of the directive.
    pub fn render(&self) -> String {
        let mut text = String::from("using ");
        if self.is_static {
            text.push_str("static ");
        }
        if let Some(alias) = &self.alias {
            text.push_str(alias);
            text.push_str(" = ");
        }
        text.push_str(&self.target);
        text.push(';');
        text
    }
}

/// Kind of a member type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
}

impl TypeKind {
    /// Keyword spelling, also used to recognize declaration starts.
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Struct => "struct",
            TypeKind::Enum => "enum",
            TypeKind::Delegate => "delegate",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "class" => Some(TypeKind::Class),
            "interface" => Some(TypeKind::Interface),
            "struct" => Some(TypeKind::Struct),
            "enum" => Some(TypeKind::Enum),
            "delegate" => Some(TypeKind::Delegate),
            _ => None,
        }
    }
}

/// A member type declaration, carried as its raw source text plus enough
/// structure to locate its body and any nested type declarations.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub kind: TypeKind,
    /// Simple identifier, without generic arity.
    pub name: String,
    /// Full declaration source, attributes and modifiers included.
    pub text: String,
    /// Byte range of the body content within `text`, brace-exclusive.
    /// `None` for delegates, which have no body.
    pub body: Option<Range<usize>>,
    /// Nested type declarations, with their spans within `text`.
    pub nested: Vec<NestedType>,
}

impl TypeDecl {
    /// Body content of this declaration, empty for bodiless kinds.
    pub fn body_text(&self) -> &str {
        match &self.body {
            Some(range) => &self.text[range.clone()],
            None => "",
        }
    }
}

/// A type declaration nested inside another type's body.
#[derive(Debug, Clone)]
pub struct NestedType {
    pub decl: TypeDecl,
    /// Byte range of the whole nested declaration within the enclosing
    /// declaration's `text`; splicing it out removes the nested type.
    pub span: Range<usize>,
}
