pub mod in_memory_principal_store;
pub mod postgres_principal_store;

pub use in_memory_principal_store::InMemoryPrincipalStore;
pub use postgres_principal_store::PostgresPrincipalStore;
