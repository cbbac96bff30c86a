//! Scripting definition (SDEF) import.
//!
//! An SDEF is the XML terminology an application publishes. The mapping to
//! terms is:
//!
//! | element                                | role      | URI                          |
//! |----------------------------------------|-----------|------------------------------|
//! | `class`, `value-type`, `record-type`   | type      | `ae4:` code                  |
//! | `property`                             | property  | `ae4:` code                  |
//! | `enumerator`                           | constant  | `ae4:` code                  |
//! | `command`, `event`                     | command   | `ae8:` code                  |
//! | `parameter`, `direct-parameter`        | parameter | `ae12:` command code + key   |
//!
//! Parameters go into their command's nested dictionary. A class's
//! `inherits` attribute becomes a type edge when the named class is defined
//! in the same SDEF, and an orphan edge otherwise. Commands named `get` or
//! `set` are skipped so an application cannot shadow the built-ins.

use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use rustc_hash::FxHashMap;

use super::error::LoadError;
use super::source::{DictionarySource, ImportedDictionary};
use crate::base::FourCharCode;
use crate::base::constants::{RESERVED_COMMAND_NAMES, SCHEME_AE4, SCHEME_AE8};
use crate::terms::{OrphanEdge, ParseUriError, Role, SemanticUri, Term, TermName, TermRef};

// ============================================================================
// SOURCES
// ============================================================================

/// An SDEF file on disk.
#[derive(Clone, Debug)]
pub struct SdefFile {
    path: PathBuf,
}

impl SdefFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DictionarySource for SdefFile {
    fn key(&self) -> String {
        format!("sdef:{}", self.path.display())
    }

    fn load(&self) -> Result<ImportedDictionary, LoadError> {
        let bytes = std::fs::read(&self.path)?;
        parse(&bytes)
    }
}

/// SDEF text already in memory, under a caller-chosen key.
#[derive(Clone, Debug)]
pub struct SdefBytes {
    key: String,
    bytes: Vec<u8>,
}

impl SdefBytes {
    pub fn new(key: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            bytes: bytes.into(),
        }
    }
}

impl DictionarySource for SdefBytes {
    fn key(&self) -> String {
        self.key.clone()
    }

    fn load(&self) -> Result<ImportedDictionary, LoadError> {
        parse(&self.bytes)
    }
}

// ============================================================================
// PARSER
// ============================================================================

/// Parse SDEF XML into terms and type edges.
pub fn parse(input: &[u8]) -> Result<ImportedDictionary, LoadError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut builder = SdefBuilder::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                builder.handle_start_element(e)?;
            }
            Ok(Event::Empty(ref e)) => {
                builder.handle_start_element(e)?;
                builder.handle_end_element();
            }
            Ok(Event::End(_)) => {
                builder.handle_end_element();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(LoadError::xml(format!(
                    "XML parse error at position {}: {e}",
                    reader.error_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(builder.finish())
}

/// What an open element contributes once it closes.
enum Open {
    /// A term to add to the top-level dictionary.
    Term(TermRef),
    /// A command whose parameters are still being read.
    Command {
        term: TermRef,
        class: FourCharCode,
        id: FourCharCode,
    },
    /// A command that must not be imported; its children are dropped too.
    Skipped,
    Other,
}

#[derive(Default)]
struct SdefBuilder {
    imported: ImportedDictionary,
    open: Vec<Open>,
    class_names: FxHashMap<TermName, SemanticUri>,
    inherits: Vec<(SemanticUri, TermName)>,
}

impl SdefBuilder {
    fn handle_start_element(&mut self, e: &BytesStart<'_>) -> Result<(), LoadError> {
        let name_bytes = e.name();
        let tag = std::str::from_utf8(name_bytes.as_ref())
            .map_err(|e| LoadError::xml(format!("Invalid tag name: {e}")))?;
        let attributes = Attributes::read(e)?;

        if matches!(self.open.last(), Some(Open::Skipped)) {
            self.open.push(Open::Skipped);
            return Ok(());
        }

        let open = match tag {
            "class" | "value-type" | "record-type" => {
                let name = attributes.required(tag, "name")?;
                let uri = ae4(attributes.required(tag, "code")?)?;
                let name = TermName::new(name);
                if let Some(supertype) = attributes.get("inherits") {
                    self.inherits.push((uri.clone(), TermName::new(supertype)));
                }
                self.class_names.insert(name.clone(), uri.clone());
                Open::Term(Term::new(Role::Type, uri).with_name(name).into_ref())
            }
            "property" => Open::Term(Self::coded_term(Role::Property, tag, &attributes)?),
            "enumerator" => Open::Term(Self::coded_term(Role::Constant, tag, &attributes)?),
            "command" | "event" => {
                let name = attributes.required(tag, "name")?;
                if RESERVED_COMMAND_NAMES.contains(&name) {
                    tracing::debug!(command = name, "skipping reserved command");
                    Open::Skipped
                } else {
                    let code = attributes.required(tag, "code")?;
                    let [class, id] = FourCharCode::parse_many::<2>(code)
                        .map_err(|e| ParseUriError::code(SCHEME_AE8, e))?;
                    let term = Term::new(Role::Command, SemanticUri::ae8(class, id))
                        .with_name(TermName::new(name))
                        .into_ref();
                    Open::Command { term, class, id }
                }
            }
            "parameter" | "direct-parameter" => {
                self.add_parameter(tag, &attributes)?;
                Open::Other
            }
            _ => Open::Other,
        };
        self.open.push(open);
        Ok(())
    }

    fn handle_end_element(&mut self) {
        match self.open.pop() {
            Some(Open::Term(term)) | Some(Open::Command { term, .. }) => {
                self.imported.terms.add(term);
            }
            _ => {}
        }
    }

    fn coded_term(role: Role, tag: &str, attributes: &Attributes) -> Result<TermRef, LoadError> {
        let name = attributes.required(tag, "name")?;
        let uri = ae4(attributes.required(tag, "code")?)?;
        Ok(Term::new(role, uri).with_name(TermName::new(name)).into_ref())
    }

    fn add_parameter(&self, tag: &str, attributes: &Attributes) -> Result<(), LoadError> {
        let Some(Open::Command { term, class, id }) = self.open.last() else {
            return Ok(());
        };
        let parameter = if tag == "direct-parameter" {
            Term::new(
                Role::Parameter,
                SemanticUri::ae12(*class, *id, FourCharCode::DIRECT_OBJECT),
            )
        } else {
            let name = attributes.required(tag, "name")?;
            let key = attributes.required(tag, "code")?;
            let key = key.parse().map_err(|e| ParseUriError::code(SCHEME_AE4, e))?;
            Term::new(Role::Parameter, SemanticUri::ae12(*class, *id, key))
                .with_name(TermName::new(name))
        };
        term.dictionary_mut().add(parameter.into_ref());
        Ok(())
    }

    fn finish(mut self) -> ImportedDictionary {
        for (subtype, supertype_name) in self.inherits {
            match self.class_names.get(&supertype_name) {
                Some(supertype) => self.imported.edges.push((subtype, supertype.clone())),
                None => {
                    tracing::debug!(%subtype, supertype = %supertype_name, "supertype not in this dictionary");
                    self.imported.orphans.push(OrphanEdge {
                        subtype,
                        supertype_name,
                    });
                }
            }
        }
        self.imported
    }
}

fn ae4(code: &str) -> Result<SemanticUri, LoadError> {
    Ok(SemanticUri::from_scheme(SCHEME_AE4, code)?)
}

/// The unescaped attributes of one element.
struct Attributes {
    values: Vec<(String, String)>,
}

impl Attributes {
    fn read(e: &BytesStart<'_>) -> Result<Self, LoadError> {
        let mut values = Vec::new();
        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|e| LoadError::xml(format!("Attribute error: {e}")))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| LoadError::xml(format!("Attribute key error: {e}")))?
                .to_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| LoadError::xml(format!("Attribute value error: {e}")))?
                .to_string();
            values.push((key, value));
        }
        Ok(Self { values })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn required(&self, element: &str, key: &str) -> Result<&str, LoadError> {
        self.get(key)
            .ok_or_else(|| LoadError::missing_attribute(element, key))
    }
}
