//! 生產計劃主流程

use chrono::NaiveDate;
use prep_core::{
    ComponentLink, ComponentType, DishMeta, DishSource, GroupPortions, LocationSource, MenuSource,
    OrderSource, PrepConfig, RecipeSource,
};
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::aggregation::CrossDishAggregator;
use crate::expansion::RecipeExpander;
use crate::menu::MenuResolver;
use crate::orders::OrderAggregator;
use crate::{PlanWarning, ProductionPlan};

/// 計算所需的全部資料來源
#[derive(Clone)]
pub struct PlanningSources {
    pub menu: Arc<dyn MenuSource>,
    pub orders: Arc<dyn OrderSource>,
    pub recipes: Arc<dyn RecipeSource>,
    pub dishes: Arc<dyn DishSource>,
    pub locations: Arc<dyn LocationSource>,
}

impl PlanningSources {
    pub fn new(
        menu: Arc<dyn MenuSource>,
        orders: Arc<dyn OrderSource>,
        recipes: Arc<dyn RecipeSource>,
        dishes: Arc<dyn DishSource>,
        locations: Arc<dyn LocationSource>,
    ) -> Self {
        Self {
            menu,
            orders,
            recipes,
            dishes,
            locations,
        }
    }

    /// 由單一實作全部介面的來源建立
    pub fn from_single<S>(source: Arc<S>) -> Self
    where
        S: MenuSource + OrderSource + RecipeSource + DishSource + LocationSource + 'static,
    {
        Self {
            menu: source.clone(),
            orders: source.clone(),
            recipes: source.clone(),
            dishes: source.clone(),
            locations: source,
        }
    }
}

/// 生產計劃計算器
pub struct ProductionPlanner {
    sources: PlanningSources,
    config: PrepConfig,
}

impl ProductionPlanner {
    /// 創建新的計算器；配置不合法時回傳 `InvalidConfig`
    pub fn new(sources: PlanningSources, config: PrepConfig) -> prep_core::Result<Self> {
        config.validate()?;
        Ok(Self { sources, config })
    }

    /// 主計算入口：單日全量重算
    pub fn plan(&self, date: NaiveDate) -> prep_core::Result<ProductionPlan> {
        let mut plan = ProductionPlan::empty(date);
        tracing::info!("開始備餐計算：日期 {}，run {}", date, plan.run_id);
        let start_time = std::time::Instant::now();
        let mut warnings: Vec<PlanWarning> = Vec::new();

        // Step 1: 菜單解析
        tracing::debug!("Step 1: 菜單解析");
        let entries = self.sources.menu.menu_entries(date)?;
        let entry_ids: Vec<String> = entries.iter().map(|e| e.dish_id.clone()).collect();
        let mut dishes = Self::dish_map(self.sources.dishes.dishes(&entry_ids)?);
        let menu = MenuResolver::resolve(date, &entries, &dishes, &self.config, &mut warnings);

        // Step 2: 訂單彙總
        tracing::debug!("Step 2: 訂單彙總");
        let order_lines = self.sources.orders.order_lines(date)?;
        let order_book = OrderAggregator::aggregate(date, &order_lines);
        tracing::debug!("有訂單的分店數量: {}", order_book.locations().len());

        // Step 3: 載入配方連結與配件主資料
        tracing::debug!("Step 3: 載入配方");
        let main_ids = menu.dish_ids();
        let links = self.sources.recipes.component_links(&main_ids)?;
        let groups: HashMap<String, GroupPortions> = self
            .sources
            .recipes
            .group_portions(&main_ids)?
            .into_iter()
            .map(|g| (g.main_dish_id.clone(), g))
            .collect();

        let missing_components: Vec<String> = links
            .iter()
            .map(|l| l.component_dish_id.clone())
            .filter(|id| !dishes.contains_key(id))
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        if !missing_components.is_empty() {
            dishes.extend(Self::dish_map(self.sources.dishes.dishes(&missing_components)?));
        }

        let mut links_by_main: HashMap<&str, Vec<&ComponentLink>> = HashMap::new();
        for link in &links {
            links_by_main
                .entry(link.main_dish_id.as_str())
                .or_default()
                .push(link);
        }

        // Step 4: 逐菜品展開並彙總（按排程順序）
        tracing::debug!("Step 4: 配方展開與跨菜品彙總");
        let mut aggregator = CrossDishAggregator::new();
        for scheduled in &menu.scheduled {
            let Some(dish) = dishes.get(&scheduled.dish_id) else {
                continue;
            };
            let location_portions = order_book.location_portions(&scheduled.meal_type);
            let dish_links = links_by_main
                .get(scheduled.dish_id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();

            let expansion = RecipeExpander::expand(
                scheduled,
                dish,
                &location_portions,
                dish_links,
                groups.get(&scheduled.dish_id),
                &dishes,
                &mut warnings,
            );

            let percentage_types = ComponentType::ALL
                .into_iter()
                .filter(|t| t.is_percentage_based());
            for component_type in percentage_types {
                if expansion.closes_group(component_type, self.config.group_weight_tolerance_g)
                    == Some(false)
                {
                    tracing::info!(
                        "{} 的 {} 百分比總和不等於群組總份量，照宣告展開",
                        dish.id,
                        component_type
                    );
                    warnings.push(PlanWarning::info(
                        dish.id.clone(),
                        format!(
                            "{} 配件每份合計 {} g，與宣告的群組總份量不同",
                            component_type,
                            expansion.group_weight_per_portion(component_type).normalize()
                        ),
                    ));
                }
            }

            aggregator.add(expansion);
        }
        let rows = aggregator.finish(&mut warnings);

        // Step 5: 分店設定
        tracing::debug!("Step 5: 分店設定");
        let location_settings = self.sources.locations.location_settings()?;
        for settings in &location_settings {
            if !settings.is_balanced() {
                tracing::debug!(
                    "分店 {} 沙拉吧比例總和為 {}",
                    settings.location_id,
                    settings.percentage_sum()
                );
            }
        }

        plan.rows = rows;
        plan.order_book = order_book;
        plan.location_settings = location_settings;
        plan.warnings = warnings;
        plan.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("備餐計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "生產行數量: {}，警告: {}",
            plan.rows.len(),
            plan.warnings.len()
        );

        Ok(plan)
    }

    /// 多日計算：各日互相獨立，並行執行；結果依輸入順序
    pub fn plan_many(&self, dates: &[NaiveDate]) -> Vec<prep_core::Result<ProductionPlan>> {
        dates.par_iter().map(|date| self.plan(*date)).collect()
    }

    /// 獲取配置引用
    pub fn config(&self) -> &PrepConfig {
        &self.config
    }

    fn dish_map(dishes: Vec<DishMeta>) -> HashMap<String, DishMeta> {
        dishes.into_iter().map(|d| (d.id.clone(), d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::{
        DishCategory, DishSubcategory, InMemorySource, MenuEntry, OrderLine, PortionUnit,
        PrepError, ProductionRow,
    };
    use rust_decimal::Decimal;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    fn source() -> InMemorySource {
        InMemorySource::new()
            .with_dish(DishMeta::new(
                "stew",
                "Chicken Stew",
                DishCategory::HotMain,
                Decimal::from(250),
                PortionUnit::Grams,
            ))
            .with_dish(
                DishMeta::new(
                    "rice",
                    "Rice",
                    DishCategory::Component,
                    Decimal::from(150),
                    PortionUnit::Grams,
                )
                .with_subcategory(DishSubcategory::Carb),
            )
            .with_menu_entry(MenuEntry::new(day(), "stew", Some("hot_meat")))
            .with_link(ComponentLink::fixed("stew", "rice", ComponentType::Carb))
            .with_order(OrderLine::new(day(), "LOC-A", "hot_meat", 4))
    }

    fn planner() -> ProductionPlanner {
        let sources = PlanningSources::from_single(Arc::new(source()));
        ProductionPlanner::new(sources, PrepConfig::default()).unwrap()
    }

    struct FailingMenu;

    impl MenuSource for FailingMenu {
        fn menu_entries(&self, _date: NaiveDate) -> prep_core::Result<Vec<MenuEntry>> {
            Err(PrepError::Source("menu store offline".to_string()))
        }
    }

    #[test]
    fn test_plan_single_day() {
        let plan = planner().plan(day()).unwrap();

        assert_eq!(plan.rows.len(), 2);
        assert!(matches!(plan.rows[0], ProductionRow::MainDish(_)));
        let rice = plan.rows[1].as_component().unwrap();
        assert_eq!(rice.total_portions, 4);
        assert_eq!(rice.total_quantity().value, Decimal::from(600));
        assert!(plan.warnings.is_empty());
        assert!(plan.calculation_time_ms.is_some());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let sources = PlanningSources::from_single(Arc::new(source()));
        let config = PrepConfig::default().with_empty_sentinel("");

        let result = ProductionPlanner::new(sources, config);

        assert!(matches!(result, Err(PrepError::InvalidConfig(_))));
    }

    #[test]
    fn test_source_failure_propagates() {
        let mut sources = PlanningSources::from_single(Arc::new(source()));
        sources.menu = Arc::new(FailingMenu);
        let planner = ProductionPlanner::new(sources, PrepConfig::default()).unwrap();

        let result = planner.plan(day());

        assert!(matches!(result, Err(PrepError::Source(_))));
    }

    #[test]
    fn test_plan_many_keeps_input_order() {
        let dates = vec![day(), day().succ_opt().unwrap(), day()];

        let plans = planner().plan_many(&dates);

        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0].as_ref().unwrap().rows.len(), 2);
        assert_eq!(plans[1].as_ref().unwrap().date, dates[1]);
        assert!(plans[1].as_ref().unwrap().rows.is_empty());
        assert_ne!(
            plans[0].as_ref().unwrap().run_id,
            plans[2].as_ref().unwrap().run_id
        );
    }
}
