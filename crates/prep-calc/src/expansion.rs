//! 配方展開（兩層 BOM）
//!
//! 固定配件（carb / condiment / topping）：每份主菜貢獻一份配件，使用配件自己的份量。
//! 百分比配件（salad / warm_veggie）：每份重量 = 主菜群組總份量 × 百分比 / 100。

use prep_core::{
    BaseUnit, ComponentLink, ComponentType, DishMeta, GroupPortions, LocationMap, MainDishRow,
    Quantity, ScheduledDish,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::PlanWarning;

/// 每份配件重量
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PortionWeight {
    /// 固定份量（配件自身單位）
    Fixed(Quantity),

    /// 百分比份量；群組總份量或百分比缺漏時不貢獻重量
    Percentage {
        percentage: Option<Decimal>,
        group_total_g: Option<Decimal>,
    },
}

impl PortionWeight {
    /// 每份重量（基礎單位），無法計算時為 None
    pub fn per_portion(&self) -> Option<Quantity> {
        match self {
            PortionWeight::Fixed(quantity) => Some(*quantity),
            PortionWeight::Percentage {
                percentage: Some(percentage),
                group_total_g: Some(group_total),
            } => Some(Quantity::grams(*group_total * *percentage / Decimal::ONE_HUNDRED)),
            PortionWeight::Percentage { .. } => None,
        }
    }

    pub fn unit(&self) -> BaseUnit {
        match self {
            PortionWeight::Fixed(quantity) => quantity.unit,
            PortionWeight::Percentage { .. } => BaseUnit::Grams,
        }
    }
}

/// 單一配件貢獻
#[derive(Debug, Clone)]
pub struct Contribution {
    pub main_dish_id: String,
    pub component_dish_id: String,
    pub component_name: String,
    pub component_type: ComponentType,

    /// 直接複製主菜的分店份數
    pub location_portions: LocationMap<u32>,

    pub weight: PortionWeight,
}

impl Contribution {
    /// 聚合鍵
    pub fn key(&self) -> (String, ComponentType) {
        (self.component_dish_id.clone(), self.component_type)
    }

    pub fn total_portions(&self) -> u32 {
        self.location_portions.values().sum()
    }

    /// 各分店數量（基礎單位）；無重量時全為零
    pub fn location_quantities(&self) -> LocationMap<Decimal> {
        let per_portion = self
            .weight
            .per_portion()
            .map(|q| q.value)
            .unwrap_or(Decimal::ZERO);

        self.location_portions
            .iter()
            .map(|(location_id, portions)| {
                (location_id.clone(), per_portion * Decimal::from(*portions))
            })
            .collect()
    }
}

/// 向群組追蹤器登記的一筆群組份量
#[derive(Debug, Clone)]
pub struct GroupRegistration {
    pub component_type: ComponentType,
    pub group_total_g: Option<Decimal>,
    pub location_portions: LocationMap<u32>,
}

/// 單一排程菜品的展開結果
#[derive(Debug, Clone)]
pub struct DishExpansion {
    pub main: MainDishRow,
    pub contributions: Vec<Contribution>,
    pub group_registrations: Vec<GroupRegistration>,
}

impl DishExpansion {
    /// 某百分比群組每份主菜的配件總重（克）
    pub fn group_weight_per_portion(&self, component_type: ComponentType) -> Decimal {
        self.contributions
            .iter()
            .filter(|c| c.component_type == component_type)
            .filter_map(|c| c.weight.per_portion())
            .map(|q| q.value)
            .sum()
    }

    /// 群組配件總重是否等於宣告的群組總份量（容差內）
    ///
    /// 未宣告群組總份量時回傳 None。
    pub fn closes_group(
        &self,
        component_type: ComponentType,
        tolerance_g: Decimal,
    ) -> Option<bool> {
        let declared = self
            .group_registrations
            .iter()
            .find(|r| r.component_type == component_type)
            .and_then(|r| r.group_total_g)?;

        let gap = (self.group_weight_per_portion(component_type) - declared).abs();
        Some(gap <= tolerance_g)
    }
}

/// 配方展開器
pub struct RecipeExpander;

impl RecipeExpander {
    /// 展開單一排程菜品
    ///
    /// 百分比不做正規化：每條連結獨立對照宣告的群組總份量展開。
    pub fn expand(
        scheduled: &ScheduledDish,
        dish: &DishMeta,
        location_portions: &LocationMap<u32>,
        links: &[&ComponentLink],
        groups: Option<&GroupPortions>,
        dishes: &HashMap<String, DishMeta>,
        warnings: &mut Vec<PlanWarning>,
    ) -> DishExpansion {
        let main = Self::main_row(scheduled, dish, location_portions);
        let mut contributions = Vec::with_capacity(links.len());
        let mut group_registrations: Vec<GroupRegistration> = Vec::new();

        for link in links {
            let Some(component) = dishes.get(&link.component_dish_id) else {
                tracing::warn!(
                    "主菜 {} 的配件 {} 找不到主資料，略過",
                    dish.id,
                    link.component_dish_id
                );
                warnings.push(PlanWarning::warning(
                    link.component_dish_id.clone(),
                    format!("{} 的配件找不到主資料，已略過", dish.name),
                ));
                continue;
            };

            let weight = if link.component_type.is_percentage_based() {
                let group_total_g = groups.and_then(|g| g.total_for(link.component_type));
                if !group_registrations
                    .iter()
                    .any(|r| r.component_type == link.component_type)
                {
                    if group_total_g.is_none() {
                        Self::warn_missing_group_total(dish, link.component_type, warnings);
                    }
                    group_registrations.push(GroupRegistration {
                        component_type: link.component_type,
                        group_total_g,
                        location_portions: location_portions.clone(),
                    });
                }
                Self::percentage_weight(dish, component, link, group_total_g, warnings)
            } else {
                if link.percentage.is_some() {
                    tracing::debug!(
                        "{} 類型不使用百分比，忽略 {} → {} 的百分比",
                        link.component_type,
                        dish.id,
                        component.id
                    );
                }
                PortionWeight::Fixed(component.base_portion())
            };

            tracing::debug!(
                "配方展開: {} → {} ({}, 每份 {:?})",
                dish.id,
                component.id,
                link.component_type,
                weight.per_portion()
            );

            contributions.push(Contribution {
                main_dish_id: dish.id.clone(),
                component_dish_id: component.id.clone(),
                component_name: component.name.clone(),
                component_type: link.component_type,
                location_portions: location_portions.clone(),
                weight,
            });
        }

        DishExpansion {
            main,
            contributions,
            group_registrations,
        }
    }

    fn main_row(
        scheduled: &ScheduledDish,
        dish: &DishMeta,
        location_portions: &LocationMap<u32>,
    ) -> MainDishRow {
        let per_portion = dish.base_portion();
        let location_quantities = location_portions
            .iter()
            .map(|(location_id, portions)| {
                (location_id.clone(), per_portion.times(*portions).value)
            })
            .collect();

        MainDishRow {
            dish_id: dish.id.clone(),
            name: dish.name.clone(),
            meal_type: scheduled.meal_type.clone(),
            category: dish.category,
            unit: per_portion.unit,
            location_portions: location_portions.clone(),
            total_portions: location_portions.values().sum(),
            location_quantities,
        }
    }

    /// 每道主菜每個群組只警告一次
    fn warn_missing_group_total(
        dish: &DishMeta,
        component_type: ComponentType,
        warnings: &mut Vec<PlanWarning>,
    ) {
        tracing::warn!(
            "主菜 {} 未宣告 {} 群組總份量，群組配件不計重量",
            dish.id,
            component_type
        );
        warnings.push(PlanWarning::warning(
            dish.id.clone(),
            format!("{} 未宣告 {} 群組總份量，群組配件不計重量", dish.name, component_type),
        ));
    }

    fn percentage_weight(
        dish: &DishMeta,
        component: &DishMeta,
        link: &ComponentLink,
        group_total_g: Option<Decimal>,
        warnings: &mut Vec<PlanWarning>,
    ) -> PortionWeight {
        if link.percentage.is_none() {
            tracing::warn!("連結 {} → {} 缺少百分比，不計重量", dish.id, component.id);
            warnings.push(PlanWarning::warning(
                component.id.clone(),
                format!("{} 的 {} 連結缺少百分比，不計重量", dish.name, component.name),
            ));
        }

        PortionWeight::Percentage {
            percentage: link.percentage,
            group_total_g,
        }
    }
}
