//! 訂單彙總

use chrono::NaiveDate;
use prep_core::{LocationMap, OrderFact, OrderLine};
use std::collections::{BTreeMap, BTreeSet};

/// 單日訂單彙總：餐別 → 分店 → 份數
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    by_meal: BTreeMap<String, LocationMap<u32>>,
}

impl OrderBook {
    /// 某餐別在某分店的份數
    pub fn portions(&self, meal_type: &str, location_id: &str) -> u32 {
        self.by_meal
            .get(meal_type)
            .and_then(|locations| locations.get(location_id))
            .copied()
            .unwrap_or(0)
    }

    /// 某餐別的分店份數分佈（無訂單時為空）
    pub fn location_portions(&self, meal_type: &str) -> LocationMap<u32> {
        self.by_meal.get(meal_type).cloned().unwrap_or_default()
    }

    /// 某餐別的總份數
    pub fn total(&self, meal_type: &str) -> u32 {
        self.by_meal
            .get(meal_type)
            .map(|locations| locations.values().sum())
            .unwrap_or(0)
    }

    /// 所有有訂單的分店（排序）
    pub fn locations(&self) -> BTreeSet<String> {
        self.by_meal
            .values()
            .flat_map(|locations| locations.keys().cloned())
            .collect()
    }

    /// 攤平成訂單事實
    pub fn facts(&self) -> Vec<OrderFact> {
        self.by_meal
            .iter()
            .flat_map(|(meal_type, locations)| {
                locations.iter().map(move |(location_id, portions)| OrderFact {
                    meal_type: meal_type.clone(),
                    location_id: location_id.clone(),
                    portions: *portions,
                })
            })
            .collect()
    }

    fn add(&mut self, meal_type: &str, location_id: &str, portions: u32) {
        *self
            .by_meal
            .entry(meal_type.to_string())
            .or_default()
            .entry(location_id.to_string())
            .or_insert(0) += portions;
    }
}

/// 訂單彙總器
pub struct OrderAggregator;

impl OrderAggregator {
    /// 按 (餐別, 分店) 加總某日的訂購份數
    pub fn aggregate(date: NaiveDate, lines: &[OrderLine]) -> OrderBook {
        let mut book = OrderBook::default();
        let mut skipped = 0usize;

        for line in lines {
            if line.date != date {
                skipped += 1;
                continue;
            }
            book.add(&line.meal_type, &line.location_id, line.portions);
        }

        if skipped > 0 {
            tracing::debug!("略過 {} 筆非 {} 的訂單", skipped, date);
        }

        book
    }
}
