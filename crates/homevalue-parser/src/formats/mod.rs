mod common;
mod county;
pub(crate) mod schema;

pub use county::CountyExportParser;
pub use schema::{ColumnLayout, ColumnRole, IdentifierColumn};

pub(crate) use common::{
    optional_text, parse_fips_code, parse_optional_f64, parse_required_i64, required_text,
};
pub(crate) use schema::classify_columns;
