//! proto 与领域/命令之间的转换

use crate::application::NewProductCommand;
use crate::domain::Product;
use crate::proto::{GetProductResponse, NewProductRequest};

impl From<NewProductRequest> for NewProductCommand {
    fn from(req: NewProductRequest) -> Self {
        Self {
            image_url: req.image_url,
            title: req.title,
            description: req.description,
            price: req.price,
            currency: req.currency,
        }
    }
}

impl From<Product> for GetProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.0,
            image_url: product.image_url,
            title: product.title,
            description: product.description,
            price: product.price,
            currency: product.currency,
            discount: u32::from(product.discount),
            product_url: product.product_url,
        }
    }
}
