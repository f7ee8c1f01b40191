pub mod cart;
pub mod requests;
pub mod response;
