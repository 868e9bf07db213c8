//! 備料清單（Mise en place）

use prep_calc::ProductionPlan;
use prep_core::{PrepConfig, ProductionRow};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::section::Section;
use crate::units::{FormattedQuantity, UnitFormatter};

/// 備料清單行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MepRow {
    pub section: Section,
    pub name: String,
    pub quantity: Decimal,
    pub unit: String,
}

impl MepRow {
    fn from_formatted(
        section: Section,
        name: &str,
        formatted: FormattedQuantity,
        config: &PrepConfig,
    ) -> Self {
        let unit = match formatted.unit() {
            Some(unit) => unit.label().to_string(),
            None => config.empty_sentinel.clone(),
        };
        Self {
            section,
            name: name.to_string(),
            quantity: formatted.value(),
            unit,
        }
    }

    /// 是否為零值行
    pub fn is_empty(&self) -> bool {
        self.quantity.is_zero()
    }
}

/// 建立備料清單：捨棄分店明細，群組總計行不列入
pub fn build_checklist(plan: &ProductionPlan, config: &PrepConfig) -> Vec<MepRow> {
    let mut rows: Vec<MepRow> = plan
        .rows
        .iter()
        .filter_map(|row| {
            let section = Section::of_row(row, config);
            match row {
                ProductionRow::MainDish(main) => Some(MepRow::from_formatted(
                    section,
                    &main.name,
                    UnitFormatter::format(main.total_quantity()),
                    config,
                )),
                ProductionRow::Component(component) => Some(MepRow::from_formatted(
                    section,
                    &component.name,
                    UnitFormatter::format(component.total_quantity()),
                    config,
                )),
                ProductionRow::GroupTotal(_) => None,
            }
        })
        .collect();

    // 穩定排序：區段內保持生產行順序
    rows.sort_by_key(|row| row.section);
    rows
}
