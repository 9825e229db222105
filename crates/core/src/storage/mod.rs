mod config;
mod cql;
mod error;
mod http_mapping;
mod traits;
mod types;

pub use config::{Credentials, Keyspace, Replication, StoreConfig};
pub use cql::{
    create_keyspace_statement, create_products_table_statement, insert_product_statement,
    select_products_statement, PRODUCTS_TABLE,
};
pub use error::{ConfigError, RepositoryError, Result, StoreError};
pub use http_mapping::repository_error_to_status_code;
pub use traits::{CqlSession, ProductRepository, SessionConnector};
pub use types::{ColumnValue, ConnectionState, Row};
