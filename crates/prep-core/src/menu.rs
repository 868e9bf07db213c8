//! 菜單模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 菜單儲存中的一筆排程紀錄（原始資料）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuEntry {
    /// 日期
    pub date: NaiveDate,

    /// 菜品ID
    pub dish_id: String,

    /// 餐別（可能缺漏）
    pub meal_type: Option<String>,

    /// 排序位置
    pub position: u32,
}

impl MenuEntry {
    /// 創建新的菜單紀錄
    pub fn new(date: NaiveDate, dish_id: impl Into<String>, meal_type: Option<&str>) -> Self {
        Self {
            date,
            dish_id: dish_id.into(),
            meal_type: meal_type.map(str::to_string),
            position: 0,
        }
    }

    /// 建構器模式：設置排序位置
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }
}

/// 已解析的當日排程菜品
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledDish {
    pub dish_id: String,
    pub meal_type: String,
}

impl ScheduledDish {
    pub fn new(dish_id: impl Into<String>, meal_type: impl Into<String>) -> Self {
        Self {
            dish_id: dish_id.into(),
            meal_type: meal_type.into(),
        }
    }
}
