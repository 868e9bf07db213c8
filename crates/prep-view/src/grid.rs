//! 生產總表（各分店 × 各菜品）

use prep_calc::ProductionPlan;
use prep_core::{ComponentType, PrepConfig, ProductionRow, Quantity};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::section::Section;
use crate::units::{FormattedQuantity, UnitFormatter};

/// 總表行類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GridRowKind {
    MainDish,
    GroupTotal,
    Component,
}

/// 總表行
#[derive(Debug, Clone, Serialize)]
pub struct GridRow {
    pub kind: GridRowKind,
    pub name: String,

    /// 與 `ProductionGrid::locations` 對齊
    pub cells: Vec<FormattedQuantity>,
    pub total: FormattedQuantity,
    pub total_portions: u32,

    /// 群組代表份量（僅群組總計行）
    pub reference_portion_g: Option<Decimal>,

    /// 群組總份量衝突（僅群組總計行）
    pub has_conflict: bool,
}

/// 區段
#[derive(Debug, Clone, Serialize)]
pub struct GridSection {
    pub section: Section,
    pub rows: Vec<GridRow>,
}

/// 生產總表
#[derive(Debug, Clone, Serialize)]
pub struct ProductionGrid {
    pub locations: Vec<String>,
    pub sections: Vec<GridSection>,
}

impl ProductionGrid {
    /// 建立總表
    ///
    /// 群組總計行的重量一律由子配件行重新加總（取整後的克數），不讀任何快取值。
    pub fn build(plan: &ProductionPlan, config: &PrepConfig) -> Self {
        let locations: Vec<String> = plan
            .order_book
            .locations()
            .into_iter()
            .chain(plan.location_settings.iter().map(|s| s.location_id.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut sections: Vec<GridSection> = Section::ALL
            .iter()
            .map(|section| GridSection {
                section: *section,
                rows: Vec::new(),
            })
            .collect();

        for row in &plan.rows {
            let section = Section::of_row(row, config);
            let grid_row = Self::grid_row(row, plan, &locations);
            if let Some(block) = sections.iter_mut().find(|s| s.section == section) {
                block.rows.push(grid_row);
            }
        }

        sections.retain(|s| !s.rows.is_empty());

        Self { locations, sections }
    }

    fn grid_row(row: &ProductionRow, plan: &ProductionPlan, locations: &[String]) -> GridRow {
        match row {
            ProductionRow::MainDish(main) => {
                let cells = locations
                    .iter()
                    .map(|loc| {
                        let value = main
                            .location_quantities
                            .get(loc)
                            .copied()
                            .unwrap_or(Decimal::ZERO);
                        UnitFormatter::format(Quantity::new(value, main.unit))
                    })
                    .collect();
                GridRow {
                    kind: GridRowKind::MainDish,
                    name: main.name.clone(),
                    cells,
                    total: UnitFormatter::format(main.total_quantity()),
                    total_portions: main.total_portions,
                    reference_portion_g: None,
                    has_conflict: false,
                }
            }
            ProductionRow::Component(component) => GridRow {
                kind: GridRowKind::Component,
                name: component.name.clone(),
                cells: locations
                    .iter()
                    .map(|loc| UnitFormatter::format(component.quantity_at(loc)))
                    .collect(),
                total: UnitFormatter::format(component.total_quantity()),
                total_portions: component.total_portions,
                reference_portion_g: None,
                has_conflict: false,
            },
            ProductionRow::GroupTotal(group) => {
                let cells = locations
                    .iter()
                    .map(|loc| Self::group_cell(plan, group.component_type, Some(loc)))
                    .collect();
                GridRow {
                    kind: GridRowKind::GroupTotal,
                    name: Self::group_label(group.component_type).to_string(),
                    cells,
                    total: Self::group_cell(plan, group.component_type, None),
                    total_portions: group.total_portions,
                    reference_portion_g: group.reference_portion_g(),
                    has_conflict: group.has_conflict(),
                }
            }
        }
    }

    fn group_label(component_type: ComponentType) -> &'static str {
        match component_type {
            ComponentType::Salad => "Total Salad",
            ComponentType::WarmVeggie => "Total Warm Vegetables",
            _ => "Total",
        }
    }

    /// 群組格：子配件取整後的克數相加
    fn group_cell(
        plan: &ProductionPlan,
        component_type: ComponentType,
        location_id: Option<&String>,
    ) -> FormattedQuantity {
        let grams: Decimal = plan
            .component_rows(component_type)
            .map(|child| {
                let quantity = match location_id {
                    Some(loc) => child.quantity_at(loc),
                    None => child.total_quantity(),
                };
                UnitFormatter::format(quantity).base_value()
            })
            .sum();
        UnitFormatter::format(Quantity::grams(grams))
    }

    /// 找出某名稱的行
    pub fn find_row(&self, name: &str) -> Option<&GridRow> {
        self.sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .find(|r| r.name == name)
    }

    /// 渲染單格（渲染邊界）
    pub fn render_cell(cell: &FormattedQuantity, config: &PrepConfig) -> String {
        cell.render(&config.empty_sentinel)
    }
}
