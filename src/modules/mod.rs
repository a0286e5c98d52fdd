pub mod customers;
pub mod gateways;
pub mod health;
pub mod installments;
pub mod pages;
pub mod webhooks;
