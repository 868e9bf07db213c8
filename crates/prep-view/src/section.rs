//! 生產表區段

use prep_core::{ComponentType, DishCategory, PrepConfig, ProductionRow};
use serde::Serialize;

/// 區段（宣告順序即輸出順序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Section {
    Soup,
    HotDishes,
    Carbs,
    WarmVegetables,
    Salads,
    AddOns,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Soup,
        Section::HotDishes,
        Section::Carbs,
        Section::WarmVegetables,
        Section::Salads,
        Section::AddOns,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Soup => "Soup",
            Section::HotDishes => "Hot dishes",
            Section::Carbs => "Carbs",
            Section::WarmVegetables => "Warm vegetables",
            Section::Salads => "Salads",
            Section::AddOns => "Add-ons",
        }
    }

    pub fn for_component_type(component_type: ComponentType) -> Self {
        match component_type {
            ComponentType::Carb => Section::Carbs,
            ComponentType::WarmVeggie => Section::WarmVegetables,
            ComponentType::Salad => Section::Salads,
            ComponentType::Condiment | ComponentType::Topping => Section::AddOns,
        }
    }

    /// 生產行所屬區段
    pub fn of_row(row: &ProductionRow, config: &PrepConfig) -> Self {
        match row {
            ProductionRow::MainDish(main) => {
                if main.category == DishCategory::Soup
                    || config.is_soup_meal_type(&main.meal_type)
                {
                    Section::Soup
                } else {
                    Section::HotDishes
                }
            }
            ProductionRow::Component(component) => {
                Self::for_component_type(component.component_type)
            }
            ProductionRow::GroupTotal(group) => Self::for_component_type(group.component_type),
        }
    }
}
