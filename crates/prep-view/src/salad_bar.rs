//! 沙拉吧食材分配
//!
//! 不經過配方展開：重量 = 分店沙拉吧份數 × 每份克數 × 欄位比例。

use prep_calc::OrderBook;
use prep_core::{LocationMap, LocationSettings, PrepConfig, Quantity, SaladBarSlot};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::units::{FormattedQuantity, UnitFormatter};

/// 沙拉吧食材行
#[derive(Debug, Clone, Serialize)]
pub struct SaladBarRow {
    pub slot: SaladBarSlot,
    pub ingredient_label: String,

    /// 各分店克數
    pub location_weights: LocationMap<Decimal>,
    pub total_weight: Decimal,
}

impl SaladBarRow {
    pub fn formatted_total(&self) -> FormattedQuantity {
        UnitFormatter::format(Quantity::grams(self.total_weight))
    }
}

/// 沙拉吧分配結果
#[derive(Debug, Clone, Serialize)]
pub struct SaladBarBreakdown {
    pub rows: Vec<SaladBarRow>,

    /// 各分店所有欄位合計克數
    pub location_totals: LocationMap<Decimal>,
}

impl SaladBarBreakdown {
    pub fn row(&self, slot: SaladBarSlot) -> Option<&SaladBarRow> {
        self.rows.iter().find(|r| r.slot == slot)
    }

    /// 全部合計克數
    pub fn grand_total(&self) -> Decimal {
        self.location_totals.values().copied().sum()
    }
}

/// 建立沙拉吧分配
pub fn build_salad_bar(
    order_book: &OrderBook,
    settings: &[LocationSettings],
    config: &PrepConfig,
) -> SaladBarBreakdown {
    let mut location_totals: LocationMap<Decimal> = LocationMap::new();

    let rows = SaladBarSlot::ALL
        .iter()
        .map(|slot| {
            let location_weights: LocationMap<Decimal> = settings
                .iter()
                .map(|location| {
                    let portions =
                        order_book.portions(&config.salad_bar_meal_type, &location.location_id);
                    let weight = Decimal::from(portions)
                        * location.salad_bar_portion_size_g
                        * location.percentage(*slot);
                    (location.location_id.clone(), weight)
                })
                .collect();

            for (location_id, weight) in &location_weights {
                *location_totals.entry(location_id.clone()).or_default() += *weight;
            }

            SaladBarRow {
                slot: *slot,
                ingredient_label: slot.label().to_string(),
                total_weight: location_weights.values().copied().sum(),
                location_weights,
            }
        })
        .collect();

    tracing::debug!("沙拉吧分配完成: {} 間分店", settings.len());

    SaladBarBreakdown {
        rows,
        location_totals,
    }
}
