//! Minimal in-process cart store that receives the view's add-to-cart actions.

mod actions;
pub mod reducer;

pub use actions::*;
pub use reducer::*;

use crate::store_framework::{StoreActor, StoreClient};

pub type CartStore = StoreActor<CartReducer>;

/// Handle the view dispatches cart actions through.
pub type CartDispatcher = StoreClient<CartReducer>;
