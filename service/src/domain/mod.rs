//! Domain definitions.

pub mod contract;
pub mod document;
pub mod employee;
pub mod position;
pub mod session;

pub use self::{
    contract::Contract, document::Document, position::Position,
    session::Session,
};
