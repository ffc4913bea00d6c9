//! Static item catalog served by `GET /api/items`.
//!
//! DESIGN
//! ======
//! The catalog is a compile-time constant. Records are cloned into an
//! `Arc<[Item]>` once at startup so handlers share one immutable copy.

use serde::{Deserialize, Serialize};

/// A catalog record as returned on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub description: String,
}

const CATALOG: [(u32, &str, &str); 10] = [
    (1, "Angular Material", "UI component library for Angular applications"),
    (2, "RxJS", "Reactive programming library for JavaScript"),
    (3, "TypeScript", "Typed superset of JavaScript"),
    (4, "Node.js", "JavaScript runtime built on Chrome V8 engine"),
    (5, "Express.js", "Fast, unopinionated web framework for Node.js"),
    (6, "MongoDB", "NoSQL database program"),
    (7, "Docker", "Containerization platform"),
    (8, "Kubernetes", "Container orchestration system"),
    (9, "AWS", "Cloud computing platform"),
    (10, "Git", "Distributed version control system"),
];

/// Build the default catalog, ordered by id.
#[must_use]
pub fn default_catalog() -> Vec<Item> {
    CATALOG
        .iter()
        .map(|(id, name, description)| Item { id: *id, name: (*name).to_owned(), description: (*description).to_owned() })
        .collect()
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
