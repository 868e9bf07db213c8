//! 訂單模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 訂單儲存中的一筆訂購紀錄（原始資料）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// 日期
    pub date: NaiveDate,

    /// 分店ID
    pub location_id: String,

    /// 餐別
    pub meal_type: String,

    /// 訂購份數
    pub portions: u32,
}

impl OrderLine {
    pub fn new(
        date: NaiveDate,
        location_id: impl Into<String>,
        meal_type: impl Into<String>,
        portions: u32,
    ) -> Self {
        Self {
            date,
            location_id: location_id.into(),
            meal_type: meal_type.into(),
            portions,
        }
    }
}

/// 彙總後的訂單事實：某日 (餐別, 分店) 的總份數
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFact {
    pub meal_type: String,
    pub location_id: String,
    pub portions: u32,
}
