//! Concrete provider adapters, one per wire shape.

mod classification;
mod generative_bearer;
mod generative_query_keyed;

pub use classification::ClassificationInferenceAdapter;
pub use generative_bearer::GenerativeBearerAdapter;
pub use generative_query_keyed::GenerativeQueryKeyedAdapter;
