//! A small in-memory file system exposed as host objects.

use bushel::runtime::{Object, PropertyInfo, Value};
use bushel::terms::SemanticUri;

use super::terms::uri;

#[derive(Debug)]
pub struct Folder {
    pub name: String,
    pub id: i64,
    pub children: Vec<Value>,
}

impl Object for Folder {
    fn type_uri(&self) -> SemanticUri {
        uri("ae4:cfol")
    }

    fn type_name(&self) -> String {
        "folder".to_owned()
    }

    fn name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn unique_id(&self) -> Option<Value> {
        Some(Value::Integer(self.id))
    }

    fn elements(&self) -> Option<Vec<Value>> {
        Some(self.children.clone())
    }
}

#[derive(Debug)]
pub struct File {
    pub name: String,
    pub id: i64,
    pub size: i64,
}

impl Object for File {
    fn type_uri(&self) -> SemanticUri {
        uri("ae4:file")
    }

    fn type_name(&self) -> String {
        "file".to_owned()
    }

    fn name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn unique_id(&self) -> Option<Value> {
        Some(Value::Integer(self.id))
    }

    fn property(&self, property: &PropertyInfo) -> Option<Value> {
        (*property.uri() == uri("ae4:ptsz")).then_some(Value::Integer(self.size))
    }
}

pub fn file(name: &str, id: i64, size: i64) -> Value {
    Value::object(File {
        name: name.to_owned(),
        id,
        size,
    })
}

pub fn folder(name: &str, id: i64, children: Vec<Value>) -> Value {
    Value::object(Folder {
        name: name.to_owned(),
        id,
        children,
    })
}

/// `Documents` holding four files and one subfolder:
///
/// ```text
/// Documents (1)
/// ├── notes.txt   (10, size 120)
/// ├── Projects    (20)
/// │   └── plan.md (21, size 5)
/// ├── photo.jpg   (30, size 4000)
/// ├── todo.txt    (40, size 64)
/// └── report.pdf  (50, size 900)
/// ```
pub fn documents() -> Value {
    folder(
        "Documents",
        1,
        vec![
            file("notes.txt", 10, 120),
            folder("Projects", 20, vec![file("plan.md", 21, 5)]),
            file("photo.jpg", 30, 4000),
            file("todo.txt", 40, 64),
            file("report.pdf", 50, 900),
        ],
    )
}
