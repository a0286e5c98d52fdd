pub mod models;
pub mod repositories;
pub mod services;

pub use models::CustomerRecord;
pub use repositories::{CustomerRepository, InMemoryCustomerRepository, MySqlCustomerRepository};
pub use services::CustomerService;
