//! 分店設定模型（沙拉吧比例）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 沙拉吧固定食材欄位（共 14 格）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaladBarSlot {
    LeafyGreens,
    Cucumber,
    Tomato,
    Carrot,
    BellPepper,
    RedCabbage,
    Corn,
    Radish,
    Beetroot,
    Legumes,
    GrainSalad,
    PastaSalad,
    Cheese,
    Seeds,
}

impl SaladBarSlot {
    pub const COUNT: usize = 14;

    /// 所有欄位（依輸出順序）
    pub const ALL: [SaladBarSlot; Self::COUNT] = [
        SaladBarSlot::LeafyGreens,
        SaladBarSlot::Cucumber,
        SaladBarSlot::Tomato,
        SaladBarSlot::Carrot,
        SaladBarSlot::BellPepper,
        SaladBarSlot::RedCabbage,
        SaladBarSlot::Corn,
        SaladBarSlot::Radish,
        SaladBarSlot::Beetroot,
        SaladBarSlot::Legumes,
        SaladBarSlot::GrainSalad,
        SaladBarSlot::PastaSalad,
        SaladBarSlot::Cheese,
        SaladBarSlot::Seeds,
    ];

    /// 顯示名稱
    pub fn label(&self) -> &'static str {
        match self {
            SaladBarSlot::LeafyGreens => "Leafy greens",
            SaladBarSlot::Cucumber => "Cucumber",
            SaladBarSlot::Tomato => "Tomato",
            SaladBarSlot::Carrot => "Carrot",
            SaladBarSlot::BellPepper => "Bell pepper",
            SaladBarSlot::RedCabbage => "Red cabbage",
            SaladBarSlot::Corn => "Corn",
            SaladBarSlot::Radish => "Radish",
            SaladBarSlot::Beetroot => "Beetroot",
            SaladBarSlot::Legumes => "Legumes",
            SaladBarSlot::GrainSalad => "Grain salad",
            SaladBarSlot::PastaSalad => "Pasta salad",
            SaladBarSlot::Cheese => "Cheese",
            SaladBarSlot::Seeds => "Seeds & nuts",
        }
    }
}

/// 分店沙拉吧設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSettings {
    /// 分店ID
    pub location_id: String,

    /// 沙拉吧每份總克數
    pub salad_bar_portion_size_g: Decimal,

    /// 各欄位比例（0-1，理論上總和為 1.0；缺漏視為 0）
    pub percentages: BTreeMap<SaladBarSlot, Decimal>,
}

impl LocationSettings {
    /// 創建新的分店設定
    pub fn new(location_id: impl Into<String>, salad_bar_portion_size_g: Decimal) -> Self {
        Self {
            location_id: location_id.into(),
            salad_bar_portion_size_g,
            percentages: BTreeMap::new(),
        }
    }

    /// 建構器模式：設置欄位比例
    pub fn with_percentage(mut self, slot: SaladBarSlot, fraction: Decimal) -> Self {
        self.percentages.insert(slot, fraction);
        self
    }

    /// 取得欄位比例
    pub fn percentage(&self, slot: SaladBarSlot) -> Decimal {
        self.percentages.get(&slot).copied().unwrap_or(Decimal::ZERO)
    }

    /// 比例總和
    pub fn percentage_sum(&self) -> Decimal {
        self.percentages.values().copied().sum()
    }

    /// 比例總和是否為 1.0（軟性約束，僅供檢查）
    pub fn is_balanced(&self) -> bool {
        self.percentage_sum() == Decimal::ONE
    }
}
