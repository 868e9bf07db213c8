//! # Prep
//!
//! 備餐生產引擎：把「今日菜單 + 各分店訂購份數」轉成各配件的備料數量。

pub mod logging;

pub use prep_calc as calc;
pub use prep_core as model;
pub use prep_view as view;

pub use prep_calc::{
    PlanWarning, PlanningSources, ProductionPlan, ProductionPlanner, WarningSeverity,
};
pub use prep_core::{PrepConfig, PrepError, ProductionRow, Result};
pub use prep_view::{DailyViews, ViewBuilder};

use chrono::NaiveDate;

/// 計算單日生產計劃並建立三種視圖
pub fn daily_sheet(
    planner: &ProductionPlanner,
    date: NaiveDate,
) -> Result<(ProductionPlan, DailyViews)> {
    let plan = planner.plan(date)?;
    let views = ViewBuilder::new(planner.config()).build(&plan);
    Ok((plan, views))
}
