pub mod definition;
pub mod lineage;
pub mod path;
pub mod schema;

pub use definition::*;
pub use lineage::*;
pub use path::*;
pub use schema::*;
