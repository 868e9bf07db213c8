//! # Prep Views
//!
//! 單位格式化與三種輸出視圖：生產總表、備料清單、沙拉吧分配

pub mod checklist;
pub mod grid;
pub mod salad_bar;
pub mod section;
pub mod units;

#[cfg(test)]
mod test_support;

// Re-export 主要類型
pub use checklist::{build_checklist, MepRow};
pub use grid::{GridRow, GridRowKind, GridSection, ProductionGrid};
pub use salad_bar::{build_salad_bar, SaladBarBreakdown, SaladBarRow};
pub use section::Section;
pub use units::{DisplayUnit, FormattedQuantity, UnitFormatter, EMPTY_SENTINEL};

use prep_calc::ProductionPlan;
use prep_core::PrepConfig;

/// 視圖建構器
pub struct ViewBuilder<'a> {
    config: &'a PrepConfig,
}

impl<'a> ViewBuilder<'a> {
    pub fn new(config: &'a PrepConfig) -> Self {
        Self { config }
    }

    pub fn grid(&self, plan: &ProductionPlan) -> ProductionGrid {
        ProductionGrid::build(plan, self.config)
    }

    pub fn checklist(&self, plan: &ProductionPlan) -> Vec<MepRow> {
        build_checklist(plan, self.config)
    }

    pub fn salad_bar(&self, plan: &ProductionPlan) -> SaladBarBreakdown {
        build_salad_bar(&plan.order_book, &plan.location_settings, self.config)
    }

    /// 一次建立三種視圖
    pub fn build(&self, plan: &ProductionPlan) -> DailyViews {
        DailyViews {
            grid: self.grid(plan),
            checklist: self.checklist(plan),
            salad_bar: self.salad_bar(plan),
        }
    }
}

/// 單日三種視圖
#[derive(Debug, Clone)]
pub struct DailyViews {
    pub grid: ProductionGrid,
    pub checklist: Vec<MepRow>,
    pub salad_bar: SaladBarBreakdown,
}
