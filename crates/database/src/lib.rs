//! # Epirecords Database Crate
//!
//! This crate acts as the application-specific interface to the PostgreSQL
//! database that stores the epidemiological records.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The web server and the CLI only see
//!   typed records and `DbError`.
//! - **Table metadata over hand-written statements:** Each entity record
//!   implements [`Table`], and the repository derives its CRUD statements from
//!   that metadata.
//! - **Asynchronous & Pooled:** All operations are asynchronous and run against a
//!   connection pool (`PgPool`). The reporting script instead borrows a single
//!   connection so it runs as one session.
//!
//! ## Public API
//!
//! - `connect`: establishes the database connection pool.
//! - `create_schema`: creates any missing table.
//! - `DbRepository`: generic list/find/create/replace/delete over any [`Table`].
//! - `reports`: the thirteen-step analytical script.
//! - `DbError`: the error type returned from this crate.

pub mod connection;
pub mod error;
pub mod reports;
pub mod repository;
pub mod schema;
pub mod table;

pub use connection::{connect, create_schema};
pub use error::DbError;
pub use reports::{ReportOutcome, ReportParams, run_report};
pub use repository::DbRepository;
pub use table::{BindKey, Table};
pub use sqlx::PgPool;
