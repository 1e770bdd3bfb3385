pub mod carts;
pub mod products;

pub use carts::CartService;
pub use products::ProductCatalogService;
