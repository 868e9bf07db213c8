//! 單位換算與取整
//!
//! 內部一律傳遞 `{value, unit}`，只在最終渲染時才轉成字串。

use prep_core::{BaseUnit, Quantity};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// 顯示單位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DisplayUnit {
    Grams,
    Kilograms,
    Milliliters,
    Liters,
    Pieces,
}

impl DisplayUnit {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayUnit::Grams => "g",
            DisplayUnit::Kilograms => "kg",
            DisplayUnit::Milliliters => "ml",
            DisplayUnit::Liters => "L",
            DisplayUnit::Pieces => "pcs",
        }
    }

    /// 換回基礎單位的倍數
    fn base_factor(&self) -> Decimal {
        match self {
            DisplayUnit::Kilograms | DisplayUnit::Liters => THOUSAND,
            _ => Decimal::ONE,
        }
    }
}

/// 格式化後的數量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormattedQuantity {
    /// 零值（未訂購）
    Empty,
    Amount { value: Decimal, unit: DisplayUnit },
}

impl FormattedQuantity {
    /// 顯示數值（零值為 0）
    pub fn value(&self) -> Decimal {
        match self {
            FormattedQuantity::Empty => Decimal::ZERO,
            FormattedQuantity::Amount { value, .. } => *value,
        }
    }

    pub fn unit(&self) -> Option<DisplayUnit> {
        match self {
            FormattedQuantity::Empty => None,
            FormattedQuantity::Amount { unit, .. } => Some(*unit),
        }
    }

    /// 取整後的值換回基礎單位（1.2kg → 1200）
    pub fn base_value(&self) -> Decimal {
        match self {
            FormattedQuantity::Empty => Decimal::ZERO,
            FormattedQuantity::Amount { value, unit } => *value * unit.base_factor(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FormattedQuantity::Empty)
    }

    /// 渲染成顯示字串
    pub fn render(&self, empty_sentinel: &str) -> String {
        match self {
            FormattedQuantity::Empty => empty_sentinel.to_string(),
            FormattedQuantity::Amount {
                value,
                unit: DisplayUnit::Pieces,
            } => format!("{} {}", value, DisplayUnit::Pieces.label()),
            FormattedQuantity::Amount { value, unit } => format!("{}{}", value, unit.label()),
        }
    }
}

impl std::fmt::Display for FormattedQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(EMPTY_SENTINEL))
    }
}

/// 預設零值符號
pub const EMPTY_SENTINEL: &str = "-";

const THOUSAND: Decimal = Decimal::ONE_THOUSAND;

/// 單位格式化器
pub struct UnitFormatter;

impl UnitFormatter {
    /// 基礎數量 → 顯示數量
    ///
    /// - pcs：不取整
    /// - g / ml 未滿 1000：取整到個位；取整後達 1000 則改用 kg / L
    /// - g / ml 1000 以上：換算 kg / L，取到小數一位
    pub fn format(quantity: Quantity) -> FormattedQuantity {
        if quantity.value.is_zero() {
            return FormattedQuantity::Empty;
        }

        match quantity.unit {
            BaseUnit::Pieces => FormattedQuantity::Amount {
                value: quantity.value.normalize(),
                unit: DisplayUnit::Pieces,
            },
            BaseUnit::Grams => {
                Self::scale(quantity.value, DisplayUnit::Grams, DisplayUnit::Kilograms)
            }
            BaseUnit::Milliliters => {
                Self::scale(quantity.value, DisplayUnit::Milliliters, DisplayUnit::Liters)
            }
        }
    }

    fn scale(value: Decimal, small: DisplayUnit, large: DisplayUnit) -> FormattedQuantity {
        let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        if value >= THOUSAND || rounded >= THOUSAND {
            let converted = (value / THOUSAND)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            FormattedQuantity::Amount {
                value: converted.normalize(),
                unit: large,
            }
        } else {
            FormattedQuantity::Amount {
                value: rounded.normalize(),
                unit: small,
            }
        }
    }
}
