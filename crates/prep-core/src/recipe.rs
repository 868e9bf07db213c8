//! 配方連結模型（兩層 BOM：固定配件 / 百分比配件）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 配件類型
///
/// 宣告順序即生產表中配件區段的順序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    /// 澱粉
    Carb,
    /// 熱蔬菜（百分比）
    WarmVeggie,
    /// 沙拉（百分比）
    Salad,
    /// 醬料
    Condiment,
    /// 配料
    Topping,
}

impl ComponentType {
    /// 所有類型（依輸出順序）
    pub const ALL: [ComponentType; 5] = [
        ComponentType::Carb,
        ComponentType::WarmVeggie,
        ComponentType::Salad,
        ComponentType::Condiment,
        ComponentType::Topping,
    ];

    /// 是否為百分比配件（需要群組總份量）
    pub fn is_percentage_based(&self) -> bool {
        matches!(self, ComponentType::Salad | ComponentType::WarmVeggie)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Carb => "carb",
            ComponentType::WarmVeggie => "warm_veggie",
            ComponentType::Salad => "salad",
            ComponentType::Condiment => "condiment",
            ComponentType::Topping => "topping",
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 主菜與配件的連結
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentLink {
    /// 主菜ID
    pub main_dish_id: String,

    /// 配件菜品ID
    pub component_dish_id: String,

    /// 配件類型
    pub component_type: ComponentType,

    /// 百分比（0-100，僅 salad / warm_veggie）
    pub percentage: Option<Decimal>,
}

impl ComponentLink {
    /// 創建固定配件連結（carb / condiment / topping）
    pub fn fixed(
        main_dish_id: impl Into<String>,
        component_dish_id: impl Into<String>,
        component_type: ComponentType,
    ) -> Self {
        Self {
            main_dish_id: main_dish_id.into(),
            component_dish_id: component_dish_id.into(),
            component_type,
            percentage: None,
        }
    }

    /// 創建百分比配件連結（salad / warm_veggie）
    pub fn percentage(
        main_dish_id: impl Into<String>,
        component_dish_id: impl Into<String>,
        component_type: ComponentType,
        percentage: Decimal,
    ) -> Self {
        Self {
            main_dish_id: main_dish_id.into(),
            component_dish_id: component_dish_id.into(),
            component_type,
            percentage: Some(percentage),
        }
    }
}

/// 主菜宣告的群組總份量（克）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupPortions {
    /// 主菜ID
    pub main_dish_id: String,

    /// 沙拉群組每份總克數
    pub salad_total_portion_g: Option<Decimal>,

    /// 熱蔬菜群組每份總克數
    pub warm_veggie_total_portion_g: Option<Decimal>,
}

impl GroupPortions {
    pub fn new(main_dish_id: impl Into<String>) -> Self {
        Self {
            main_dish_id: main_dish_id.into(),
            ..Self::default()
        }
    }

    /// 建構器模式：設置沙拉總份量
    pub fn with_salad_total(mut self, grams: Decimal) -> Self {
        self.salad_total_portion_g = Some(grams);
        self
    }

    /// 建構器模式：設置熱蔬菜總份量
    pub fn with_warm_veggie_total(mut self, grams: Decimal) -> Self {
        self.warm_veggie_total_portion_g = Some(grams);
        self
    }

    /// 取得某類型的群組總份量
    pub fn total_for(&self, component_type: ComponentType) -> Option<Decimal> {
        match component_type {
            ComponentType::Salad => self.salad_total_portion_g,
            ComponentType::WarmVeggie => self.warm_veggie_total_portion_g,
            _ => None,
        }
    }
}
