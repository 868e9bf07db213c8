//! 測試用資料

use chrono::NaiveDate;
use prep_calc::{PlanningSources, ProductionPlan, ProductionPlanner};
use prep_core::{
    ComponentLink, ComponentType, DishCategory, DishMeta, DishSubcategory, GroupPortions,
    InMemorySource, LocationSettings, MenuEntry, OrderLine, PortionUnit, PrepConfig, SaladBarSlot,
};
use rust_decimal::Decimal;
use std::sync::Arc;

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
}

fn component(id: &str, name: &str, size: i64, subcategory: DishSubcategory) -> DishMeta {
    DishMeta::new(
        id,
        name,
        DishCategory::Component,
        Decimal::from(size),
        PortionUnit::Grams,
    )
    .with_subcategory(subcategory)
}

fn salad_link(component_dish_id: &str, percentage: i64) -> ComponentLink {
    ComponentLink::percentage(
        "stew",
        component_dish_id,
        ComponentType::Salad,
        Decimal::from(percentage),
    )
}

/// 燉雞（沙拉 200g：生菜 60% / 番茄 40%）配白飯，湯品一道，兩間分店
pub fn stew_source() -> InMemorySource {
    InMemorySource::new()
        .with_dish(DishMeta::new(
            "stew",
            "Chicken Stew",
            DishCategory::HotMain,
            Decimal::from(250),
            PortionUnit::Grams,
        ))
        .with_dish(DishMeta::new(
            "soup",
            "Minestrone",
            DishCategory::Soup,
            Decimal::new(3, 1),
            PortionUnit::Liters,
        ))
        .with_dish(component("lettuce", "Lettuce", 0, DishSubcategory::Salad))
        .with_dish(component("tomato", "Tomato", 0, DishSubcategory::Salad))
        .with_dish(component("rice", "Rice", 150, DishSubcategory::Carb))
        .with_menu_entry(MenuEntry::new(day(), "soup", Some("soup")).with_position(1))
        .with_menu_entry(MenuEntry::new(day(), "stew", Some("hot_meat")).with_position(2))
        .with_link(salad_link("lettuce", 60))
        .with_link(salad_link("tomato", 40))
        .with_link(ComponentLink::fixed("stew", "rice", ComponentType::Carb))
        .with_group_portions(GroupPortions::new("stew").with_salad_total(Decimal::from(200)))
        .with_order(OrderLine::new(day(), "LOC-A", "hot_meat", 6))
        .with_order(OrderLine::new(day(), "LOC-B", "hot_meat", 4))
        .with_order(OrderLine::new(day(), "LOC-A", "soup", 5))
        .with_order(OrderLine::new(day(), "LOC-A", "salad_bar", 10))
        .with_order(OrderLine::new(day(), "LOC-B", "salad_bar", 4))
        .with_location(
            LocationSettings::new("LOC-A", Decimal::from(300))
                .with_percentage(SaladBarSlot::LeafyGreens, Decimal::new(5, 1))
                .with_percentage(SaladBarSlot::Tomato, Decimal::new(5, 1)),
        )
        .with_location(
            LocationSettings::new("LOC-B", Decimal::from(250))
                .with_percentage(SaladBarSlot::LeafyGreens, Decimal::ONE),
        )
        .with_location(LocationSettings::new("LOC-C", Decimal::from(250)))
}

pub fn stew_plan() -> ProductionPlan {
    let planner = ProductionPlanner::new(
        PlanningSources::from_single(Arc::new(stew_source())),
        PrepConfig::default(),
    )
    .unwrap();
    planner.plan(day()).unwrap()
}
