//! [`Document`] definitions.

use derive_more::Debug;

/// Binary document generated for a [`Contract`].
///
/// [`Contract`]: crate::domain::Contract
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Document {
    /// File name suggested by the backend, if any.
    pub file_name: Option<String>,

    /// Raw content of this [`Document`].
    #[debug(skip)]
    pub content: Vec<u8>,
}
