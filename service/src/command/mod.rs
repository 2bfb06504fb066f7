//! [`Command`] definition.

pub mod create_contract;
pub mod delete_contract;
pub mod generate_document;
pub mod load_contracts;
pub mod save_contract;

/// [`Command`] of the [`Controller`].
///
/// [`Controller`]: crate::Controller
pub use common::Handler as Command;

pub use self::{
    create_contract::CreateContract, delete_contract::DeleteContract,
    generate_document::GenerateDocument, load_contracts::LoadContracts,
    save_contract::SaveContract,
};
