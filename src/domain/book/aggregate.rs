//! Book Context - Validated book contents

use super::{require_text, BookError, Price, Stock, MAX_COUNT};

/// 图书可变字段（创建 / 整体替换时使用）
///
/// 不变量:
/// - title、author 非空
/// - price 有限且非负
/// - stock、items_sold 在 [0, MAX_COUNT] 内
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetails {
    title: String,
    author: String,
    description: String,
    price: Price,
    stock: Stock,
    items_sold: i64,
}

impl BookDetails {
    pub fn new(
        title: &str,
        author: &str,
        description: &str,
        price: f64,
        stock: i64,
        items_sold: i64,
    ) -> Result<Self, BookError> {
        if items_sold < 0 {
            return Err(BookError::InvalidItemsSold(format!(
                "{} is negative",
                items_sold
            )));
        }
        if items_sold > MAX_COUNT {
            return Err(BookError::InvalidItemsSold(format!(
                "{} exceeds the maximum of {}",
                items_sold, MAX_COUNT
            )));
        }

        Ok(Self {
            title: require_text("title", title)?,
            author: require_text("author", author)?,
            description: description.to_string(),
            price: Price::new(price)?,
            stock: Stock::new(stock)?,
            items_sold,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn stock(&self) -> Stock {
        self.stock
    }

    pub fn items_sold(&self) -> i64 {
        self.items_sold
    }
}
