pub mod cart_item;
pub mod product;

pub use cart_item::Entity as CartItem;
pub use cart_item::Model as CartItemModel;
pub use product::Entity as Product;
pub use product::Model as ProductModel;
