//! 菜單解析

use chrono::NaiveDate;
use prep_core::{DishMeta, MenuEntry, PrepConfig, ScheduledDish};
use std::collections::{HashMap, HashSet};

use crate::PlanWarning;

/// 菜單解析結果
#[derive(Debug, Clone, Default)]
pub struct ResolvedMenu {
    /// 已排程菜品（依排序位置）
    pub scheduled: Vec<ScheduledDish>,

    /// 無法解析餐別或找不到菜品的菜品ID
    pub unresolved: Vec<String>,
}

impl ResolvedMenu {
    /// 不重複的主菜ID（保持排程順序）
    pub fn dish_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.scheduled
            .iter()
            .filter(|s| seen.insert(s.dish_id.as_str()))
            .map(|s| s.dish_id.clone())
            .collect()
    }
}

/// 菜單解析器
pub struct MenuResolver;

impl MenuResolver {
    /// 解析某日的排程菜品
    ///
    /// 缺少餐別的湯品歸入預設湯品餐別；其他無法解析的紀錄排除並記錄警告。
    pub fn resolve(
        date: NaiveDate,
        entries: &[MenuEntry],
        dishes: &HashMap<String, DishMeta>,
        config: &PrepConfig,
        warnings: &mut Vec<PlanWarning>,
    ) -> ResolvedMenu {
        let mut day_entries: Vec<&MenuEntry> = entries.iter().filter(|e| e.date == date).collect();
        // 穩定排序：同位置保持原順序
        day_entries.sort_by_key(|e| e.position);

        let mut resolved = ResolvedMenu::default();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for entry in day_entries {
            let Some(dish) = dishes.get(&entry.dish_id) else {
                tracing::warn!("菜單菜品 {} 找不到主資料，排除", entry.dish_id);
                warnings.push(PlanWarning::warning(
                    entry.dish_id.clone(),
                    "找不到菜品主資料，已排除".to_string(),
                ));
                resolved.unresolved.push(entry.dish_id.clone());
                continue;
            };

            let meal_type = match entry.meal_type.as_deref() {
                Some(meal_type) if !meal_type.trim().is_empty() => Some(meal_type.to_string()),
                _ if dish.is_soup() => config.default_soup_meal_type().map(str::to_string),
                _ => None,
            };

            let Some(meal_type) = meal_type else {
                tracing::warn!("菜品 {} ({}) 無法解析餐別，排除", dish.name, dish.id);
                warnings.push(PlanWarning::warning(
                    dish.id.clone(),
                    format!("{} 沒有可解析的餐別，未納入展開", dish.name),
                ));
                resolved.unresolved.push(dish.id.clone());
                continue;
            };

            if !seen.insert((dish.id.clone(), meal_type.clone())) {
                tracing::debug!("重複的排程紀錄: {} / {}", dish.id, meal_type);
                continue;
            }

            resolved.scheduled.push(ScheduledDish::new(dish.id.clone(), meal_type));
        }

        tracing::debug!(
            "菜單解析完成: {} 筆排程, {} 筆未解析",
            resolved.scheduled.len(),
            resolved.unresolved.len()
        );

        resolved
    }
}
