//! List-query building blocks: parameter translation, paged execution and
//! pagination links.

pub mod executor;
pub mod links;
pub mod translator;

pub use executor::{PagedQuery, PagedQueryExecutor};
pub use links::PageLinkBuilder;
pub use translator::QueryTranslator;
