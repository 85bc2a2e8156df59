//! 命令定义

use crate::domain::{DEFAULT_DISCOUNT, DEFAULT_PRODUCT_URL, NewProduct};

/// 创建商品命令
///
/// 外部契约只携带五个字段；折扣与商品链接使用
/// [`DEFAULT_DISCOUNT`] 与 [`DEFAULT_PRODUCT_URL`]。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductCommand {
    pub image_url: String,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub currency: i32,
}

impl NewProductCommand {
    /// 校验命令
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.price < 0 {
            return Err("price must not be negative");
        }
        if self.currency < 0 {
            return Err("currency code must not be negative");
        }
        Ok(())
    }

    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            image_url: self.image_url,
            title: self.title,
            description: self.description,
            discount: DEFAULT_DISCOUNT,
            price: self.price,
            currency: self.currency,
            product_url: DEFAULT_PRODUCT_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(price: i64, currency: i32) -> NewProductCommand {
        NewProductCommand {
            image_url: "http://x/a.png".to_string(),
            title: "Mug".to_string(),
            description: "ceramic mug".to_string(),
            price,
            currency,
        }
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let product = command(999, 840).into_new_product();
        assert_eq!(product.discount, 0);
        assert_eq!(product.product_url, "");
        assert_eq!(product.price, 999);
        assert_eq!(product.currency, 840);
        assert_eq!(product.title, "Mug");
    }

    #[test]
    fn test_validate() {
        assert!(command(0, 0).validate().is_ok());
        assert!(command(999, 840).validate().is_ok());
        assert!(command(-1, 840).validate().is_err());
        assert!(command(999, -840).validate().is_err());
    }
}
