//! 跨菜品彙總
//!
//! 同一 (配件, 類型) 來自多道主菜時逐分店相加，不覆蓋；
//! 百分比群組另建總計行並偵測群組總份量衝突。

use prep_core::row::merge_location_map;
use prep_core::{ComponentRow, ComponentType, GroupTotalRow, MainDishRow, ProductionRow};
use std::collections::{BTreeMap, HashMap};

use crate::expansion::{Contribution, DishExpansion, GroupRegistration, PortionWeight};
use crate::PlanWarning;

/// 跨菜品彙總器（單日）
#[derive(Debug, Default)]
pub struct CrossDishAggregator {
    main_rows: Vec<MainDishRow>,
    component_rows: Vec<ComponentRow>,
    component_index: HashMap<(String, ComponentType), usize>,
    groups: BTreeMap<ComponentType, GroupTotalRow>,
}

impl CrossDishAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入一道菜的展開結果（按排程順序呼叫）
    pub fn add(&mut self, expansion: DishExpansion) {
        self.main_rows.push(expansion.main);

        for contribution in &expansion.contributions {
            self.add_contribution(contribution);
        }

        for registration in &expansion.group_registrations {
            self.register_group(registration);
        }
    }

    fn add_contribution(&mut self, contribution: &Contribution) {
        let key = contribution.key();
        let quantities = contribution.location_quantities();
        let (percentage, group_total_g) = match contribution.weight {
            PortionWeight::Percentage {
                percentage,
                group_total_g,
            } => (percentage, group_total_g),
            PortionWeight::Fixed(_) => (None, None),
        };

        let index = match self.component_index.get(&key) {
            Some(&index) => index,
            None => {
                self.component_index.insert(key, self.component_rows.len());
                self.component_rows.push(ComponentRow {
                    component_dish_id: contribution.component_dish_id.clone(),
                    name: contribution.component_name.clone(),
                    component_type: contribution.component_type,
                    percentage,
                    group_total_portion_g: group_total_g,
                    unit: contribution.weight.unit(),
                    location_portions: contribution.location_portions.clone(),
                    total_portions: contribution.total_portions(),
                    location_quantities: quantities,
                });
                return;
            }
        };

        // 同一鍵的單位由配件主資料與類型決定，不會不同
        let row = &mut self.component_rows[index];
        merge_location_map(&mut row.location_portions, &contribution.location_portions);
        row.total_portions += contribution.total_portions();
        merge_location_map(&mut row.location_quantities, &quantities);

        if row.percentage.is_some() && row.percentage != percentage {
            tracing::debug!(
                "配件 {} 在 {} 的百分比與先前主菜不同",
                row.component_dish_id,
                contribution.main_dish_id
            );
            row.percentage = None;
        }

        row.group_total_portion_g = match (row.group_total_portion_g, group_total_g) {
            (Some(current), Some(other)) => Some(current.min(other)),
            (current, other) => current.or(other),
        };
    }

    fn register_group(&mut self, registration: &GroupRegistration) {
        let group = self
            .groups
            .entry(registration.component_type)
            .or_insert_with(|| GroupTotalRow::new(registration.component_type));

        merge_location_map(&mut group.location_portions, &registration.location_portions);
        group.total_portions += registration.location_portions.values().sum::<u32>();

        if let Some(total) = registration.group_total_g {
            group.observed_portion_sizes.insert(total);
        }
    }

    /// 輸出生產行：主菜（排程順序），再依配件類型輸出群組總計與配件。
    pub fn finish(self, warnings: &mut Vec<PlanWarning>) -> Vec<ProductionRow> {
        let Self {
            main_rows,
            component_rows,
            mut groups,
            ..
        } = self;

        let mut rows: Vec<ProductionRow> =
            main_rows.into_iter().map(ProductionRow::MainDish).collect();

        for component_type in ComponentType::ALL {
            let children: Vec<&ComponentRow> = component_rows
                .iter()
                .filter(|row| row.component_type == component_type)
                .collect();

            if children.is_empty() {
                continue;
            }

            if let Some(group) = groups.remove(&component_type) {
                if group.has_conflict() {
                    let observed: Vec<String> =
                        group.observed_portion_sizes.iter().map(|v| v.to_string()).collect();
                    tracing::warn!(
                        "{} 群組總份量衝突: [{}]，代表值取最小 {:?}",
                        component_type,
                        observed.join(", "),
                        group.reference_portion_g()
                    );
                    warnings.push(PlanWarning::warning(
                        component_type.to_string(),
                        format!(
                            "同日出現不同的群組總份量 [{}] g，代表值使用 {} g",
                            observed.join(", "),
                            group.reference_portion_g().unwrap_or_default()
                        ),
                    ));
                }
                rows.push(ProductionRow::GroupTotal(group));
            }

            rows.extend(children.into_iter().cloned().map(ProductionRow::Component));
        }

        rows
    }
}
