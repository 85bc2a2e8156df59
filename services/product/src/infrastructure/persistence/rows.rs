//! 数据库行映射结构

use sqlx::postgres::PgRow;
use sqlx::{Column, FromRow, Row};

use crate::domain::{MAX_DISCOUNT, Product, ProductId};

/// `products` 表的列，按解码顺序排列
///
/// 读取语句必须按此顺序选择全部列，行解码按位置读取。
pub const PRODUCT_COLUMNS: [&str; 8] = [
    "id",
    "image_url",
    "title",
    "description",
    "price",
    "currency",
    "discount",
    "product_url",
];

/// 商品数据库行
#[derive(Debug)]
pub struct ProductRow {
    pub id: i64,
    pub image_url: String,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub currency: i32,
    pub discount: i16,
    pub product_url: String,
}

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        if row.len() != PRODUCT_COLUMNS.len() {
            return Err(sqlx::Error::Decode(
                format!(
                    "products row has {} columns, expected {}",
                    row.len(),
                    PRODUCT_COLUMNS.len()
                )
                .into(),
            ));
        }

        for (column, expected) in row.columns().iter().zip(PRODUCT_COLUMNS) {
            if column.name() != expected {
                return Err(sqlx::Error::ColumnDecode {
                    index: column.ordinal().to_string(),
                    source: format!("expected column `{}`, found `{}`", expected, column.name())
                        .into(),
                });
            }
        }

        Ok(Self {
            id: row.try_get(0)?,
            image_url: row.try_get(1)?,
            title: row.try_get(2)?,
            description: row.try_get(3)?,
            price: row.try_get(4)?,
            currency: row.try_get(5)?,
            discount: row.try_get(6)?,
            product_url: row.try_get(7)?,
        })
    }
}

impl TryFrom<ProductRow> for Product {
    type Error = sqlx::Error;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let discount = u8::try_from(row.discount).map_err(|e| sqlx::Error::ColumnDecode {
            index: "discount".to_string(),
            source: Box::new(e),
        })?;
        if discount > MAX_DISCOUNT {
            return Err(sqlx::Error::ColumnDecode {
                index: "discount".to_string(),
                source: format!("discount {} exceeds {}", discount, MAX_DISCOUNT).into(),
            });
        }

        Ok(Product {
            id: ProductId(row.id),
            image_url: row.image_url,
            title: row.title,
            description: row.description,
            price: row.price,
            currency: row.currency,
            discount,
            product_url: row.product_url,
        })
    }
}
