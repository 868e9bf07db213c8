//! 單日備餐表示例

use chrono::NaiveDate;
use prep::model::*;
use prep::view::{ProductionGrid, Section};
use prep::{daily_sheet, PlanningSources, ProductionPlanner};
use rust_decimal::Decimal;
use std::sync::Arc;

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

fn main() -> Result<()> {
    prep::logging::init();

    let date = NaiveDate::from_ymd_opt(2025, 11, 3)
        .ok_or_else(|| PrepError::Other("無效的日期".to_string()))?;

    let source = InMemorySource::new()
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
        .with_dish(component("rice", "Rice", 150, DishSubcategory::Carb))
        .with_dish(component("lettuce", "Lettuce", 0, DishSubcategory::Salad))
        .with_dish(component("tomato", "Tomato", 0, DishSubcategory::Salad))
        .with_menu_entry(MenuEntry::new(date, "soup", None).with_position(1))
        .with_menu_entry(MenuEntry::new(date, "stew", Some("hot_meat")).with_position(2))
        .with_link(ComponentLink::fixed("stew", "rice", ComponentType::Carb))
        .with_link(salad_link("lettuce", 60))
        .with_link(salad_link("tomato", 40))
        .with_group_portions(GroupPortions::new("stew").with_salad_total(Decimal::from(200)))
        .with_order(OrderLine::new(date, "NORTH", "hot_meat", 42))
        .with_order(OrderLine::new(date, "SOUTH", "hot_meat", 18))
        .with_order(OrderLine::new(date, "NORTH", "soup", 30))
        .with_order(OrderLine::new(date, "NORTH", "salad_bar", 25))
        .with_location(
            LocationSettings::new("NORTH", Decimal::from(280))
                .with_percentage(SaladBarSlot::LeafyGreens, Decimal::new(4, 1))
                .with_percentage(SaladBarSlot::Cucumber, Decimal::new(3, 1))
                .with_percentage(SaladBarSlot::Legumes, Decimal::new(3, 1)),
        );

    let planner = ProductionPlanner::new(
        PlanningSources::from_single(Arc::new(source)),
        PrepConfig::default(),
    )?;
    let (plan, views) = daily_sheet(&planner, date)?;
    let config = planner.config();

    println!("=== 生產總表 {} ===\n", plan.date);
    println!("{:<24} {}  Total", "", views.grid.locations.join("  "));
    for section in &views.grid.sections {
        println!("[{}]", section.section.label());
        for row in &section.rows {
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|c| ProductionGrid::render_cell(c, config))
                .collect();
            println!(
                "  {:<22} {}  {}",
                row.name,
                cells.join("  "),
                ProductionGrid::render_cell(&row.total, config)
            );
        }
    }

    println!("\n=== 備料清單 ===");
    let mut current: Option<Section> = None;
    for item in &views.checklist {
        if current != Some(item.section) {
            println!("[{}]", item.section.label());
            current = Some(item.section);
        }
        println!("  [ ] {} {}{}", item.name, item.quantity, item.unit);
    }

    println!("\n=== 沙拉吧 ===");
    for row in views.salad_bar.rows.iter().filter(|r| !r.total_weight.is_zero()) {
        println!("  {:<16} {}", row.ingredient_label, row.formatted_total());
    }

    for warning in &plan.warnings {
        println!(
            "警告 [{:?}] {}: {}",
            warning.severity, warning.subject, warning.message
        );
    }

    Ok(())
}
