mod catalog;
mod detail;
mod state;

pub use catalog::CatalogView;
pub use detail::DetailView;
pub use state::{view_state_from_resource, ViewError, ViewState};
