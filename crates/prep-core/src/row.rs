//! 生產行模型（生產表的核心輸出）

use crate::dish::{BaseUnit, DishCategory, Quantity};
use crate::recipe::ComponentType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 分店 → 數值 映射（依分店ID排序）
pub type LocationMap<T> = BTreeMap<String, T>;

/// 逐分店相加
pub fn merge_location_map<T>(target: &mut LocationMap<T>, source: &LocationMap<T>)
where
    T: Copy + Default + std::ops::AddAssign,
{
    for (location_id, value) in source {
        *target.entry(location_id.clone()).or_default() += *value;
    }
}

/// 主菜行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainDishRow {
    pub dish_id: String,
    pub name: String,
    pub meal_type: String,
    pub category: DishCategory,

    /// 基礎單位
    pub unit: BaseUnit,

    pub location_portions: LocationMap<u32>,
    pub total_portions: u32,

    /// 各分店數量（基礎單位）
    pub location_quantities: LocationMap<Decimal>,
}

impl MainDishRow {
    /// 總數量（基礎單位）
    pub fn total_quantity(&self) -> Quantity {
        Quantity::new(self.location_quantities.values().copied().sum(), self.unit)
    }
}

/// 配件行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRow {
    pub component_dish_id: String,
    pub name: String,
    pub component_type: ComponentType,

    /// 所有貢獻一致時才有值
    pub percentage: Option<Decimal>,

    /// 貢獻中觀察到的最小群組總份量
    pub group_total_portion_g: Option<Decimal>,

    /// 基礎單位
    pub unit: BaseUnit,

    pub location_portions: LocationMap<u32>,
    pub total_portions: u32,

    /// 各分店數量（基礎單位），同一配件可能來自每份重量不同的主菜
    pub location_quantities: LocationMap<Decimal>,
}

impl ComponentRow {
    /// 總數量（基礎單位）
    pub fn total_quantity(&self) -> Quantity {
        Quantity::new(self.location_quantities.values().copied().sum(), self.unit)
    }

    /// 某分店數量
    pub fn quantity_at(&self, location_id: &str) -> Quantity {
        let value = self
            .location_quantities
            .get(location_id)
            .copied()
            .unwrap_or(Decimal::ZERO);
        Quantity::new(value, self.unit)
    }
}

/// 群組總計行（「沙拉總計」、「熱蔬菜總計」）
///
/// 不儲存重量；重量一律由當前的子配件行即時加總。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupTotalRow {
    pub component_type: ComponentType,

    /// 每道貢獻主菜只計一次
    pub location_portions: LocationMap<u32>,
    pub total_portions: u32,

    /// 當日觀察到的所有群組總份量
    pub observed_portion_sizes: BTreeSet<Decimal>,
}

impl GroupTotalRow {
    pub fn new(component_type: ComponentType) -> Self {
        Self {
            component_type,
            location_portions: LocationMap::new(),
            total_portions: 0,
            observed_portion_sizes: BTreeSet::new(),
        }
    }

    /// 代表份量：觀察值中的最小值
    pub fn reference_portion_g(&self) -> Option<Decimal> {
        self.observed_portion_sizes.iter().next().copied()
    }

    /// 是否出現多個不同的群組總份量
    pub fn has_conflict(&self) -> bool {
        self.observed_portion_sizes.len() > 1
    }
}

/// 生產行
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductionRow {
    MainDish(MainDishRow),
    Component(ComponentRow),
    GroupTotal(GroupTotalRow),
}

impl ProductionRow {
    pub fn location_portions(&self) -> &LocationMap<u32> {
        match self {
            ProductionRow::MainDish(row) => &row.location_portions,
            ProductionRow::Component(row) => &row.location_portions,
            ProductionRow::GroupTotal(row) => &row.location_portions,
        }
    }

    pub fn total_portions(&self) -> u32 {
        match self {
            ProductionRow::MainDish(row) => row.total_portions,
            ProductionRow::Component(row) => row.total_portions,
            ProductionRow::GroupTotal(row) => row.total_portions,
        }
    }

    pub fn as_component(&self) -> Option<&ComponentRow> {
        match self {
            ProductionRow::Component(row) => Some(row),
            _ => None,
        }
    }

    pub fn as_group_total(&self) -> Option<&GroupTotalRow> {
        match self {
            ProductionRow::GroupTotal(row) => Some(row),
            _ => None,
        }
    }

    pub fn as_main_dish(&self) -> Option<&MainDishRow> {
        match self {
            ProductionRow::MainDish(row) => Some(row),
            _ => None,
        }
    }
}
