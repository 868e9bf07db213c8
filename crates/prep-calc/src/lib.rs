//! # Prep Calculation Engine
//!
//! 核心備餐計算引擎：菜單解析 → 訂單彙總 → 配方展開 → 跨菜品彙總

pub mod aggregation;
pub mod expansion;
pub mod menu;
pub mod orders;
pub mod planner;

// Re-export 主要類型
pub use aggregation::CrossDishAggregator;
pub use expansion::{Contribution, DishExpansion, PortionWeight, RecipeExpander};
pub use menu::{MenuResolver, ResolvedMenu};
pub use orders::{OrderAggregator, OrderBook};
pub use planner::{PlanningSources, ProductionPlanner};

use chrono::NaiveDate;
use prep_core::{BaseUnit, ComponentRow, ComponentType, LocationSettings, ProductionRow, Quantity};
use uuid::Uuid;

/// 單日生產計算結果
#[derive(Debug, Clone)]
pub struct ProductionPlan {
    /// 計算日期
    pub date: NaiveDate,

    /// 本次計算ID（追蹤日誌用）
    pub run_id: Uuid,

    /// 生產行（主菜 → 各配件類型的群組總計與配件）
    pub rows: Vec<ProductionRow>,

    /// 當日訂單彙總
    pub order_book: OrderBook,

    /// 分店設定
    pub location_settings: Vec<LocationSettings>,

    /// 警告信息
    pub warnings: Vec<PlanWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl ProductionPlan {
    /// 創建空的計算結果
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            run_id: Uuid::new_v4(),
            rows: Vec::new(),
            order_book: OrderBook::default(),
            location_settings: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 某類型的所有配件行
    pub fn component_rows(
        &self,
        component_type: ComponentType,
    ) -> impl Iterator<Item = &ComponentRow> + '_ {
        self.rows
            .iter()
            .filter_map(ProductionRow::as_component)
            .filter(move |row| row.component_type == component_type)
    }

    /// 群組總重量：由當前子配件行即時加總
    pub fn group_weight(&self, component_type: ComponentType) -> Quantity {
        let value = self
            .component_rows(component_type)
            .filter(|row| row.unit == BaseUnit::Grams)
            .map(|row| row.total_quantity().value)
            .sum();
        Quantity::grams(value)
    }

    /// 某嚴重程度的警告數量
    pub fn warning_count(&self, severity: WarningSeverity) -> usize {
        self.warnings.iter().filter(|w| w.severity == severity).count()
    }
}

/// 計算警告
#[derive(Debug, Clone)]
pub struct PlanWarning {
    /// 相關對象（菜品ID、配件類型等）
    pub subject: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanWarning {
    pub fn new(subject: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            subject,
            message,
            severity,
        }
    }

    pub fn info(subject: String, message: String) -> Self {
        Self::new(subject, message, WarningSeverity::Info)
    }

    pub fn warning(subject: String, message: String) -> Self {
        Self::new(subject, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
}
