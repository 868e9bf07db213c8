//! 外部資料來源介面（菜單、訂單、配方、菜品、分店設定）
//!
//! 引擎只負責計算；擷取失敗由來源端回報，引擎不重試。

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::{
    ComponentLink, DishMeta, GroupPortions, LocationSettings, MenuEntry, OrderLine, Result,
};

/// 菜單儲存
pub trait MenuSource: Send + Sync {
    fn menu_entries(&self, date: NaiveDate) -> Result<Vec<MenuEntry>>;
}

/// 訂單儲存
pub trait OrderSource: Send + Sync {
    fn order_lines(&self, date: NaiveDate) -> Result<Vec<OrderLine>>;
}

/// 配方連結儲存
pub trait RecipeSource: Send + Sync {
    fn component_links(&self, main_dish_ids: &[String]) -> Result<Vec<ComponentLink>>;

    fn group_portions(&self, main_dish_ids: &[String]) -> Result<Vec<GroupPortions>>;
}

/// 菜品主資料儲存
pub trait DishSource: Send + Sync {
    fn dishes(&self, dish_ids: &[String]) -> Result<Vec<DishMeta>>;
}

/// 分店設定儲存
pub trait LocationSource: Send + Sync {
    fn location_settings(&self) -> Result<Vec<LocationSettings>>;
}

/// 記憶體資料來源（測試與示例用）
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    menu: Vec<MenuEntry>,
    orders: Vec<OrderLine>,
    links: Vec<ComponentLink>,
    groups: HashMap<String, GroupPortions>,
    dishes: HashMap<String, DishMeta>,
    locations: Vec<LocationSettings>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：添加菜品
    pub fn with_dish(mut self, dish: DishMeta) -> Self {
        self.dishes.insert(dish.id.clone(), dish);
        self
    }

    /// 建構器模式：添加菜單紀錄
    pub fn with_menu_entry(mut self, entry: MenuEntry) -> Self {
        self.menu.push(entry);
        self
    }

    /// 建構器模式：添加訂單
    pub fn with_order(mut self, line: OrderLine) -> Self {
        self.orders.push(line);
        self
    }

    /// 建構器模式：添加配件連結
    pub fn with_link(mut self, link: ComponentLink) -> Self {
        self.links.push(link);
        self
    }

    /// 建構器模式：設置主菜群組總份量
    pub fn with_group_portions(mut self, groups: GroupPortions) -> Self {
        self.groups.insert(groups.main_dish_id.clone(), groups);
        self
    }

    /// 建構器模式：添加分店設定
    pub fn with_location(mut self, settings: LocationSettings) -> Self {
        self.locations.push(settings);
        self
    }
}

impl MenuSource for InMemorySource {
    fn menu_entries(&self, date: NaiveDate) -> Result<Vec<MenuEntry>> {
        Ok(self.menu.iter().filter(|e| e.date == date).cloned().collect())
    }
}

impl OrderSource for InMemorySource {
    fn order_lines(&self, date: NaiveDate) -> Result<Vec<OrderLine>> {
        Ok(self.orders.iter().filter(|o| o.date == date).cloned().collect())
    }
}

impl RecipeSource for InMemorySource {
    fn component_links(&self, main_dish_ids: &[String]) -> Result<Vec<ComponentLink>> {
        Ok(self
            .links
            .iter()
            .filter(|l| main_dish_ids.contains(&l.main_dish_id))
            .cloned()
            .collect())
    }

    fn group_portions(&self, main_dish_ids: &[String]) -> Result<Vec<GroupPortions>> {
        Ok(main_dish_ids
            .iter()
            .filter_map(|id| self.groups.get(id).cloned())
            .collect())
    }
}

impl DishSource for InMemorySource {
    fn dishes(&self, dish_ids: &[String]) -> Result<Vec<DishMeta>> {
        Ok(dish_ids
            .iter()
            .filter_map(|id| self.dishes.get(id).cloned())
            .collect())
    }
}

impl LocationSource for InMemorySource {
    fn location_settings(&self) -> Result<Vec<LocationSettings>> {
        Ok(self.locations.clone())
    }
}
