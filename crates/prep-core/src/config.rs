//! 備餐引擎配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PrepError, Result};

/// 備餐引擎配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    /// 沙拉吧份數所屬的餐別
    pub salad_bar_meal_type: String,

    /// 視為湯品的餐別；菜單紀錄缺少餐別時，湯品歸入第一個
    pub soup_meal_types: Vec<String>,

    /// 數量為零時的顯示符號
    pub empty_sentinel: String,

    /// BOM 閉合檢查容差（克）
    pub group_weight_tolerance_g: Decimal,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            salad_bar_meal_type: "salad_bar".to_string(),
            soup_meal_types: vec!["soup".to_string()],
            empty_sentinel: "-".to_string(),
            group_weight_tolerance_g: Decimal::ONE,
        }
    }
}

impl PrepConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置沙拉吧餐別
    pub fn with_salad_bar_meal_type(mut self, meal_type: impl Into<String>) -> Self {
        self.salad_bar_meal_type = meal_type.into();
        self
    }

    /// 建構器模式：設置湯品餐別
    pub fn with_soup_meal_types(mut self, meal_types: Vec<String>) -> Self {
        self.soup_meal_types = meal_types;
        self
    }

    /// 建構器模式：設置零值顯示符號
    pub fn with_empty_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.empty_sentinel = sentinel.into();
        self
    }

    /// 建構器模式：設置 BOM 閉合容差
    pub fn with_group_weight_tolerance(mut self, grams: Decimal) -> Self {
        self.group_weight_tolerance_g = grams;
        self
    }

    /// 從 JSON 載入
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PrepConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 輸出為 JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.salad_bar_meal_type.trim().is_empty() {
            return Err(PrepError::InvalidConfig("沙拉吧餐別不可為空".to_string()));
        }
        if self.empty_sentinel.is_empty() {
            return Err(PrepError::InvalidConfig("零值顯示符號不可為空".to_string()));
        }
        if self.group_weight_tolerance_g < Decimal::ZERO {
            return Err(PrepError::InvalidConfig(format!(
                "容差不可為負數: {}",
                self.group_weight_tolerance_g
            )));
        }
        Ok(())
    }

    /// 預設湯品餐別
    pub fn default_soup_meal_type(&self) -> Option<&str> {
        self.soup_meal_types.first().map(String::as_str)
    }

    /// 檢查是否為湯品餐別
    pub fn is_soup_meal_type(&self, meal_type: &str) -> bool {
        self.soup_meal_types.iter().any(|m| m == meal_type)
    }
}
