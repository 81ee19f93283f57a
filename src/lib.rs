// Module layout (Clean Architecture style)
// - bootstrap: configuration and wiring
// - infrastructure: Postgres/in-memory stores, password hashing, JWT
// - presentation: HTTP handlers, access guard extractor, routing
// - application: ports, use cases, access policy, validation
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
