//! 菜品模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 菜品分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DishCategory {
    /// 湯品
    Soup,
    /// 熱主菜
    HotMain,
    /// 配件（澱粉、蔬菜、沙拉、醬料、配料）
    Component,
}

/// 配件子分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DishSubcategory {
    Carb,
    WarmVeggie,
    Salad,
    Condiment,
    Topping,
}

/// 份量單位（菜品宣告用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortionUnit {
    Pieces,
    Grams,
    Kilograms,
    Milliliters,
    Liters,
}

impl PortionUnit {
    /// 對應的基礎單位
    pub fn base_unit(&self) -> BaseUnit {
        match self {
            PortionUnit::Pieces => BaseUnit::Pieces,
            PortionUnit::Grams | PortionUnit::Kilograms => BaseUnit::Grams,
            PortionUnit::Milliliters | PortionUnit::Liters => BaseUnit::Milliliters,
        }
    }

    /// 換算到基礎單位的倍數
    fn base_factor(&self) -> Decimal {
        match self {
            PortionUnit::Kilograms | PortionUnit::Liters => Decimal::from(1000),
            _ => Decimal::ONE,
        }
    }
}

/// 基礎單位：所有內部計算只使用 g / ml / pcs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BaseUnit {
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "ml")]
    Milliliters,
    #[serde(rename = "pieces")]
    Pieces,
}

impl BaseUnit {
    pub fn label(&self) -> &'static str {
        match self {
            BaseUnit::Grams => "g",
            BaseUnit::Milliliters => "ml",
            BaseUnit::Pieces => "pcs",
        }
    }
}

/// 帶單位的數量（基礎單位）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: Decimal,
    pub unit: BaseUnit,
}

impl Quantity {
    pub fn new(value: Decimal, unit: BaseUnit) -> Self {
        Self { value, unit }
    }

    pub fn grams(value: Decimal) -> Self {
        Self::new(value, BaseUnit::Grams)
    }

    pub fn zero(unit: BaseUnit) -> Self {
        Self::new(Decimal::ZERO, unit)
    }

    /// 乘以份數
    pub fn times(&self, portions: u32) -> Self {
        Self::new(self.value * Decimal::from(portions), self.unit)
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

/// 菜品主資料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishMeta {
    /// 菜品ID
    pub id: String,

    /// 名稱
    pub name: String,

    /// 分類
    pub category: DishCategory,

    /// 子分類（僅配件使用）
    pub subcategory: Option<DishSubcategory>,

    /// 每份份量
    pub portion_size: Decimal,

    /// 份量單位
    pub portion_unit: PortionUnit,

    /// 預設每份毫升數（覆蓋 ml/L 菜品的份量）
    pub default_portion_ml: Option<Decimal>,

    /// 預設每份克數（覆蓋 g/kg 菜品的份量）
    pub default_portion_g: Option<Decimal>,
}

impl DishMeta {
    /// 創建新的菜品
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: DishCategory,
        portion_size: Decimal,
        portion_unit: PortionUnit,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            subcategory: None,
            portion_size,
            portion_unit,
            default_portion_ml: None,
            default_portion_g: None,
        }
    }

    /// 建構器模式：設置子分類
    pub fn with_subcategory(mut self, subcategory: DishSubcategory) -> Self {
        self.subcategory = Some(subcategory);
        self
    }

    /// 建構器模式：設置預設毫升數
    pub fn with_default_portion_ml(mut self, ml: Decimal) -> Self {
        self.default_portion_ml = Some(ml);
        self
    }

    /// 建構器模式：設置預設克數
    pub fn with_default_portion_g(mut self, g: Decimal) -> Self {
        self.default_portion_g = Some(g);
        self
    }

    /// 每份的基礎單位數量
    ///
    /// 件數菜品永遠以件計，不看 ml/g 覆蓋值。
    pub fn base_portion(&self) -> Quantity {
        let unit = self.portion_unit.base_unit();
        let override_value = match unit {
            BaseUnit::Grams => self.default_portion_g,
            BaseUnit::Milliliters => self.default_portion_ml,
            BaseUnit::Pieces => None,
        };

        let value = override_value
            .unwrap_or_else(|| self.portion_size * self.portion_unit.base_factor());
        Quantity::new(value, unit)
    }

    pub fn is_soup(&self) -> bool {
        self.category == DishCategory::Soup
    }
}
