//! # Repository Module
//!
//! Database repository implementations for the warehouse API.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Route handler                                                         │
//! │       │                                                                 │
//! │       │  db.products().get_by_id(id)                                   │
//! │       ▼                                                                 │
//! │  ProductRepository                     TableRepository                 │
//! │  ├── list()                            └── list(&TableListing)         │
//! │  ├── get_by_id(id)                                                     │
//! │  ├── insert(&NewProduct)                                               │
//! │  ├── update(id, &PartialUpdate)                                        │
//! │  └── delete(id)                                                        │
//! │       │                                                                 │
//! │       │  Parameterized SQL, one statement per call                     │
//! │       ▼                                                                 │
//! │  MySQL                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD
//! - [`TableRepository`](table::TableRepository) - Capped auxiliary listings

pub mod product;
pub mod table;
