pub mod traits;

pub use traits::{AuthorizationService, CatalogProvider, PlayerControl};
