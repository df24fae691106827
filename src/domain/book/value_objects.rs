//! Book Context - Value Objects

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::BookError;

/// 图书唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for BookId {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| BookError::InvalidId(s.to_string()))
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 图书价格
///
/// 不变量: 有限且非负
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, BookError> {
        if !value.is_finite() {
            return Err(BookError::InvalidPrice(format!("{} is not a finite number", value)));
        }
        if value < 0.0 {
            return Err(BookError::InvalidPrice(format!("{} is negative", value)));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// 库存与销量的上限，售出时 `items_sold + 1` 不会溢出 i64
pub const MAX_COUNT: i64 = 1_000_000_000_000;

/// 库存数量
///
/// 不变量: 0 <= stock <= MAX_COUNT
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Stock(i64);

impl Stock {
    pub fn new(value: i64) -> Result<Self, BookError> {
        if value < 0 {
            return Err(BookError::InvalidStock(format!("{} is negative", value)));
        }
        if value > MAX_COUNT {
            return Err(BookError::InvalidStock(format!(
                "{} exceeds the maximum of {}",
                value, MAX_COUNT
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 非空文本字段（标题、作者）
pub fn require_text(field: &'static str, value: &str) -> Result<String, BookError> {
    if value.trim().is_empty() {
        return Err(BookError::EmptyField(field));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_id_roundtrips_through_string() {
        let id = BookId::new();
        let parsed: BookId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_book_id_rejects_garbage() {
        let err = "64b7f0c2e1".parse::<BookId>().unwrap_err();
        assert_eq!(err, BookError::InvalidId("64b7f0c2e1".to_string()));
    }

    #[test]
    fn test_price_must_be_non_negative() {
        assert!(Price::new(0.0).is_ok());
        assert!(Price::new(19.99).is_ok());
        assert!(Price::new(-0.01).is_err());
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_stock_must_be_non_negative() {
        assert_eq!(Stock::new(0).unwrap().value(), 0);
        assert_eq!(Stock::new(7).unwrap().value(), 7);
        assert!(Stock::new(-1).is_err());
    }

    #[test]
    fn test_stock_is_bounded() {
        assert_eq!(Stock::new(MAX_COUNT).unwrap().value(), MAX_COUNT);
        assert!(matches!(
            Stock::new(MAX_COUNT + 1),
            Err(BookError::InvalidStock(_))
        ));
        assert!(Stock::new(i64::MAX).is_err());
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("title", "Dune").unwrap(), "Dune");
        assert_eq!(
            require_text("title", "   "),
            Err(BookError::EmptyField("title"))
        );
        assert_eq!(
            require_text("author", ""),
            Err(BookError::EmptyField("author"))
        );
    }
}
