//! # Prep Core
//!
//! 核心資料模型與類型定義（菜品、配方連結、菜單、訂單、分店設定、生產行）

pub mod config;
pub mod dish;
pub mod location;
pub mod menu;
pub mod order;
pub mod recipe;
pub mod row;
pub mod source;

// Re-export 主要類型
pub use config::PrepConfig;
pub use dish::{BaseUnit, DishCategory, DishMeta, DishSubcategory, PortionUnit, Quantity};
pub use location::{LocationSettings, SaladBarSlot};
pub use menu::{MenuEntry, ScheduledDish};
pub use order::{OrderFact, OrderLine};
pub use recipe::{ComponentLink, ComponentType, GroupPortions};
pub use row::{ComponentRow, GroupTotalRow, LocationMap, MainDishRow, ProductionRow};
pub use source::{
    DishSource, InMemorySource, LocationSource, MenuSource, OrderSource, RecipeSource,
};

/// 備餐引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    #[error("資料來源錯誤: {0}")]
    Source(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("序列化錯誤: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PrepError>;
