//! Built-in types, properties, commands and parameters.
//!
//! These are the terms the runtime relies on regardless of which
//! dictionaries a script imports.

use super::type_tree::TypeTree;
use super::uri::SemanticUri;
use crate::base::FourCharCode;

/// Built-in types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Types {
    /// The root of the type hierarchy.
    Item,
    List,
    Record,
    String,
    Character,
    Number,
    Integer,
    Real,
    Boolean,
    Type,
    Constant,
    Specifier,
    InsertionPoint,
    Application,
    Null,
    Missing,
    Unspecified,
}

impl Types {
    pub const ALL: [Types; 17] = [
        Types::Item,
        Types::List,
        Types::Record,
        Types::String,
        Types::Character,
        Types::Number,
        Types::Integer,
        Types::Real,
        Types::Boolean,
        Types::Type,
        Types::Constant,
        Types::Specifier,
        Types::InsertionPoint,
        Types::Application,
        Types::Null,
        Types::Missing,
        Types::Unspecified,
    ];

    pub fn uri(self) -> SemanticUri {
        match self {
            Types::Item => code4(*b"cobj"),
            Types::List => code4(*b"list"),
            Types::Record => code4(*b"reco"),
            Types::String => code4(*b"ctxt"),
            Types::Character => code4(*b"cha "),
            Types::Number => code4(*b"nmbr"),
            Types::Integer => code4(*b"long"),
            Types::Real => code4(*b"doub"),
            Types::Boolean => code4(*b"bool"),
            Types::Type => code4(*b"type"),
            Types::Constant => code4(*b"enum"),
            Types::Specifier => code4(*b"obj "),
            Types::InsertionPoint => code4(*b"insl"),
            Types::Application => code4(*b"capp"),
            Types::Null => code4(*b"null"),
            Types::Missing => code4(*b"msng"),
            Types::Unspecified => SemanticUri::path("unspecified"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Types::Item => "item",
            Types::List => "list",
            Types::Record => "record",
            Types::String => "string",
            Types::Character => "character",
            Types::Number => "number",
            Types::Integer => "integer",
            Types::Real => "real",
            Types::Boolean => "boolean",
            Types::Type => "type",
            Types::Constant => "constant",
            Types::Specifier => "specifier",
            Types::InsertionPoint => "insertion point",
            Types::Application => "application",
            Types::Null => "null",
            Types::Missing => "missing value",
            Types::Unspecified => "unspecified",
        }
    }

    /// The explicit supertype of a built-in type, when it is not the root.
    fn supertype(self) -> Option<Types> {
        match self {
            Types::Integer | Types::Real => Some(Types::Number),
            _ => None,
        }
    }
}

/// Built-in properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Properties {
    Name,
    Id,
    Class,
    Length,
}

impl Properties {
    pub const ALL: [Properties; 4] = [
        Properties::Name,
        Properties::Id,
        Properties::Class,
        Properties::Length,
    ];

    pub fn uri(self) -> SemanticUri {
        match self {
            Properties::Name => code4(*b"pnam"),
            Properties::Id => code4(*b"ID  "),
            Properties::Class => code4(*b"pcls"),
            Properties::Length => SemanticUri::path("list/length"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Properties::Name => "name",
            Properties::Id => "id",
            Properties::Class => "class",
            Properties::Length => "length",
        }
    }
}

/// Built-in commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Commands {
    Get,
    Set,
    Count,
}

impl Commands {
    pub const ALL: [Commands; 3] = [Commands::Get, Commands::Set, Commands::Count];

    pub fn uri(self) -> SemanticUri {
        let core = FourCharCode::from_bytes(*b"core");
        match self {
            Commands::Get => SemanticUri::ae8(core, FourCharCode::from_bytes(*b"getd")),
            Commands::Set => SemanticUri::ae8(core, FourCharCode::from_bytes(*b"setd")),
            Commands::Count => SemanticUri::ae8(core, FourCharCode::from_bytes(*b"cnte")),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Commands::Get => "get",
            Commands::Set => "set",
            Commands::Count => "count",
        }
    }
}

/// Built-in parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parameters {
    Direct,
    Target,
    /// The value argument of `set`.
    SetTo,
    /// The element class argument of `count`.
    CountEach,
}

impl Parameters {
    pub fn uri(self) -> SemanticUri {
        match self {
            Parameters::Direct => SemanticUri::direct_parameter(),
            Parameters::Target => SemanticUri::target_parameter(),
            Parameters::SetTo => code12(*b"core", *b"setd", *b"data"),
            Parameters::CountEach => code12(*b"core", *b"cnte", *b"kocl"),
        }
    }
}

fn code4(bytes: [u8; 4]) -> SemanticUri {
    SemanticUri::ae4(FourCharCode::from_bytes(bytes))
}

fn code12(class: [u8; 4], id: [u8; 4], key: [u8; 4]) -> SemanticUri {
    SemanticUri::ae12(
        FourCharCode::from_bytes(class),
        FourCharCode::from_bytes(id),
        FourCharCode::from_bytes(key),
    )
}

/// A type tree rooted at `item` with the built-in edges.
pub fn builtin_type_tree() -> TypeTree {
    let mut tree = TypeTree::new(Types::Item.uri());
    for ty in Types::ALL {
        if ty == Types::Item {
            continue;
        }
        let supertype = ty.supertype().unwrap_or(Types::Item);
        tree.add(ty.uri(), supertype.uri());
    }
    tree
}
