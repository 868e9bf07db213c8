//! 集成測試

use chrono::NaiveDate;
use prep::model::*;
use prep::view::{GridRowKind, ProductionGrid, UnitFormatter};
use prep::{daily_sheet, PlanningSources, ProductionPlanner, WarningSeverity};
use rstest::rstest;
use rust_decimal::Decimal;
use std::sync::Arc;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
}

fn main_dish(id: &str, name: &str) -> DishMeta {
    DishMeta::new(
        id,
        name,
        DishCategory::HotMain,
        Decimal::from(250),
        PortionUnit::Grams,
    )
}

fn component(id: &str, name: &str, size: u32, subcategory: DishSubcategory) -> DishMeta {
    DishMeta::new(
        id,
        name,
        DishCategory::Component,
        Decimal::from(size),
        PortionUnit::Grams,
    )
    .with_subcategory(subcategory)
}

fn percentage_link(
    main_dish_id: &str,
    component_dish_id: impl Into<String>,
    component_type: ComponentType,
    percentage: u32,
) -> ComponentLink {
    ComponentLink::percentage(
        main_dish_id,
        component_dish_id,
        component_type,
        Decimal::from(percentage),
    )
}

fn planner(source: InMemorySource) -> ProductionPlanner {
    prep::logging::init_test();
    let sources = PlanningSources::from_single(Arc::new(source));
    ProductionPlanner::new(sources, PrepConfig::default()).unwrap()
}

fn component_row<'a>(
    rows: &'a [ProductionRow],
    id: &str,
    component_type: ComponentType,
) -> &'a ComponentRow {
    rows.iter()
        .filter_map(ProductionRow::as_component)
        .find(|r| r.component_dish_id == id && r.component_type == component_type)
        .unwrap()
}

fn group_row(rows: &[ProductionRow], component_type: ComponentType) -> &GroupTotalRow {
    rows.iter()
        .filter_map(ProductionRow::as_group_total)
        .find(|r| r.component_type == component_type)
        .unwrap()
}

#[test]
fn test_scenario_a_salad_group() {
    // Chicken Stew：沙拉群組 200g，生菜 60%、番茄 40%，三間分店共 10 份
    let source = InMemorySource::new()
        .with_dish(main_dish("stew", "Chicken Stew"))
        .with_dish(component("lettuce", "Lettuce", 0, DishSubcategory::Salad))
        .with_dish(component("tomato", "Tomato", 0, DishSubcategory::Salad))
        .with_menu_entry(MenuEntry::new(day(), "stew", Some("hot_meat")))
        .with_link(percentage_link("stew", "lettuce", ComponentType::Salad, 60))
        .with_link(percentage_link("stew", "tomato", ComponentType::Salad, 40))
        .with_group_portions(GroupPortions::new("stew").with_salad_total(Decimal::from(200)))
        .with_order(OrderLine::new(day(), "LOC-A", "hot_meat", 5))
        .with_order(OrderLine::new(day(), "LOC-B", "hot_meat", 3))
        .with_order(OrderLine::new(day(), "LOC-C", "hot_meat", 2));

    let planner = planner(source);
    let (plan, views) = daily_sheet(&planner, day()).unwrap();

    let lettuce = component_row(&plan.rows, "lettuce", ComponentType::Salad);
    assert_eq!(lettuce.total_quantity().value, Decimal::from(1200));
    assert_eq!(UnitFormatter::format(lettuce.total_quantity()).to_string(), "1.2kg");

    let tomato = component_row(&plan.rows, "tomato", ComponentType::Salad);
    assert_eq!(UnitFormatter::format(tomato.total_quantity()).to_string(), "800g");

    assert_eq!(plan.group_weight(ComponentType::Salad).value, Decimal::from(2000));
    let total = views.grid.find_row("Total Salad").unwrap();
    assert_eq!(total.kind, GridRowKind::GroupTotal);
    assert_eq!(total.total.to_string(), "2kg");

    assert!(plan.warnings.is_empty());
}

#[test]
fn test_scenario_b_group_portion_conflict() {
    // 兩道主菜都用生菜，沙拉群組分別宣告 200g 與 220g
    let source = InMemorySource::new()
        .with_dish(main_dish("stew", "Chicken Stew"))
        .with_dish(main_dish("curry", "Veg Curry"))
        .with_dish(component("lettuce", "Lettuce", 0, DishSubcategory::Salad))
        .with_menu_entry(MenuEntry::new(day(), "stew", Some("hot_meat")).with_position(1))
        .with_menu_entry(MenuEntry::new(day(), "curry", Some("hot_veg")).with_position(2))
        .with_link(percentage_link("stew", "lettuce", ComponentType::Salad, 50))
        .with_link(percentage_link("curry", "lettuce", ComponentType::Salad, 50))
        .with_group_portions(GroupPortions::new("stew").with_salad_total(Decimal::from(200)))
        .with_group_portions(GroupPortions::new("curry").with_salad_total(Decimal::from(220)))
        .with_order(OrderLine::new(day(), "LOC-A", "hot_meat", 10))
        .with_order(OrderLine::new(day(), "LOC-A", "hot_veg", 10));

    let plan = planner(source).plan(day()).unwrap();

    // 各自使用自己的群組總份量：10 × 100 + 10 × 110
    let lettuce = component_row(&plan.rows, "lettuce", ComponentType::Salad);
    assert_eq!(lettuce.total_quantity().value, Decimal::from(2100));
    assert_eq!(lettuce.total_portions, 20);

    let group = group_row(&plan.rows, ComponentType::Salad);
    assert!(group.has_conflict());
    assert_eq!(group.reference_portion_g(), Some(Decimal::from(200)));

    // 每道主菜只連了 50%，另有兩筆 Info
    assert_eq!(plan.warning_count(WarningSeverity::Warning), 1);
    assert_eq!(plan.warning_count(WarningSeverity::Info), 2);
    let conflict = plan
        .warnings
        .iter()
        .find(|w| w.severity == WarningSeverity::Warning)
        .unwrap();
    assert_eq!(conflict.subject, "salad");
}

#[test]
fn test_scenario_c_shared_carb() {
    // 白飯同時連到兩道主菜，分別訂 5 份與 7 份，每份 150g
    let source = InMemorySource::new()
        .with_dish(main_dish("stew", "Chicken Stew"))
        .with_dish(main_dish("curry", "Veg Curry"))
        .with_dish(component("rice", "Rice", 150, DishSubcategory::Carb))
        .with_menu_entry(MenuEntry::new(day(), "stew", Some("hot_meat")))
        .with_menu_entry(MenuEntry::new(day(), "curry", Some("hot_veg")))
        .with_link(ComponentLink::fixed("stew", "rice", ComponentType::Carb))
        .with_link(ComponentLink::fixed("curry", "rice", ComponentType::Carb))
        .with_order(OrderLine::new(day(), "LOC-A", "hot_meat", 5))
        .with_order(OrderLine::new(day(), "LOC-B", "hot_veg", 7));

    let plan = planner(source).plan(day()).unwrap();

    let rice = component_row(&plan.rows, "rice", ComponentType::Carb);
    assert_eq!(rice.total_portions, 12);
    assert_eq!(rice.location_portions["LOC-A"], 5);
    assert_eq!(rice.location_portions["LOC-B"], 7);
    assert_eq!(rice.total_quantity().value, Decimal::from(1800));
    assert_eq!(UnitFormatter::format(rice.total_quantity()).to_string(), "1.8kg");
}

#[rstest]
#[case(vec![60, 40])]
#[case(vec![33, 33, 34])]
#[case(vec![100])]
#[case(vec![15, 15, 15, 15, 15, 25])]
fn test_bom_closure(#[case] percentages: Vec<u32>) {
    let mut source = InMemorySource::new()
        .with_dish(main_dish("stew", "Chicken Stew"))
        .with_menu_entry(MenuEntry::new(day(), "stew", Some("hot_meat")))
        .with_group_portions(GroupPortions::new("stew").with_warm_veggie_total(Decimal::from(180)))
        .with_order(OrderLine::new(day(), "LOC-A", "hot_meat", 1));

    for (i, pct) in percentages.iter().enumerate() {
        let id = format!("veg-{}", i);
        source = source
            .with_dish(component(&id, &id, 0, DishSubcategory::WarmVeggie))
            .with_link(percentage_link("stew", id, ComponentType::WarmVeggie, *pct));
    }

    let plan = planner(source).plan(day()).unwrap();

    assert_eq!(plan.group_weight(ComponentType::WarmVeggie).value, Decimal::from(180));
    assert_eq!(plan.warning_count(WarningSeverity::Info), 0);
}

#[test]
fn test_percentages_over_hundred_accepted_with_info() {
    let source = InMemorySource::new()
        .with_dish(main_dish("stew", "Chicken Stew"))
        .with_dish(component("lettuce", "Lettuce", 0, DishSubcategory::Salad))
        .with_dish(component("tomato", "Tomato", 0, DishSubcategory::Salad))
        .with_menu_entry(MenuEntry::new(day(), "stew", Some("hot_meat")))
        .with_link(percentage_link("stew", "lettuce", ComponentType::Salad, 80))
        .with_link(percentage_link("stew", "tomato", ComponentType::Salad, 40))
        .with_group_portions(GroupPortions::new("stew").with_salad_total(Decimal::from(200)))
        .with_order(OrderLine::new(day(), "LOC-A", "hot_meat", 10));

    let plan = planner(source).plan(day()).unwrap();

    assert_eq!(plan.group_weight(ComponentType::Salad).value, Decimal::from(2400));
    assert_eq!(plan.warning_count(WarningSeverity::Info), 1);
}

#[test]
fn test_missing_group_total_renders_sentinel() {
    let source = InMemorySource::new()
        .with_dish(main_dish("stew", "Chicken Stew"))
        .with_dish(component("lettuce", "Lettuce", 0, DishSubcategory::Salad))
        .with_dish(component("rice", "Rice", 150, DishSubcategory::Carb))
        .with_menu_entry(MenuEntry::new(day(), "stew", Some("hot_meat")))
        .with_link(percentage_link("stew", "lettuce", ComponentType::Salad, 100))
        .with_link(ComponentLink::fixed("stew", "rice", ComponentType::Carb))
        .with_order(OrderLine::new(day(), "LOC-A", "hot_meat", 4));

    let planner = planner(source);
    let (plan, views) = daily_sheet(&planner, day()).unwrap();

    let lettuce = views.grid.find_row("Lettuce").unwrap();
    assert_eq!(lettuce.total.to_string(), "-");
    assert_eq!(lettuce.total_portions, 4);
    assert_eq!(views.grid.find_row("Total Salad").unwrap().total.to_string(), "-");
    assert_eq!(views.grid.find_row("Rice").unwrap().total.to_string(), "600g");
    assert_eq!(plan.warning_count(WarningSeverity::Warning), 1);
}

#[test]
fn test_unresolved_meal_type_excluded() {
    let source = InMemorySource::new()
        .with_dish(main_dish("stew", "Chicken Stew"))
        .with_dish(main_dish("curry", "Veg Curry"))
        .with_dish(component("rice", "Rice", 150, DishSubcategory::Carb))
        .with_menu_entry(MenuEntry::new(day(), "stew", None))
        .with_menu_entry(MenuEntry::new(day(), "curry", Some("hot_veg")))
        .with_link(ComponentLink::fixed("stew", "rice", ComponentType::Carb))
        .with_order(OrderLine::new(day(), "LOC-A", "hot_meat", 5))
        .with_order(OrderLine::new(day(), "LOC-A", "hot_veg", 3));

    let plan = planner(source).plan(day()).unwrap();

    assert_eq!(plan.rows.len(), 1);
    assert_eq!(plan.rows[0].as_main_dish().unwrap().dish_id, "curry");
    assert_eq!(plan.warning_count(WarningSeverity::Warning), 1);
}

#[test]
fn test_pieces_dish_renders_count() {
    let source = InMemorySource::new()
        .with_dish(main_dish("stew", "Chicken Stew"))
        .with_dish(
            DishMeta::new(
                "roll",
                "Bread Roll",
                DishCategory::Component,
                Decimal::ONE,
                PortionUnit::Pieces,
            )
            .with_subcategory(DishSubcategory::Topping)
            .with_default_portion_g(Decimal::from(60)),
        )
        .with_menu_entry(MenuEntry::new(day(), "stew", Some("hot_meat")))
        .with_link(ComponentLink::fixed("stew", "roll", ComponentType::Topping))
        .with_order(OrderLine::new(day(), "LOC-A", "hot_meat", 1200));

    let planner = planner(source);
    let (_, views) = daily_sheet(&planner, day()).unwrap();

    let roll = views.grid.find_row("Bread Roll").unwrap();
    assert_eq!(roll.total.to_string(), "1200 pcs");
    assert_eq!(ProductionGrid::render_cell(&roll.cells[0], planner.config()), "1200 pcs");
}
