use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use strum::IntoEnumIterator;

use super::{
    asset::{Asset, AssetCondition},
    dates::{parse_entry_date, spanish_day_label},
};

const RECENT_WINDOW_DAYS: i64 = 15;
const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_assets: usize,
    pub new_assets: usize,
    pub used_assets: usize,
    pub damaged_assets: usize,
    pub total_value: f64,
    pub recent: Vec<Asset>,
    pub per_day: Vec<DayCount>,
}

impl DashboardStats {
    pub fn compute(assets: &[Asset], today: NaiveDate) -> Self {
        let count = |condition: AssetCondition| {
            assets
                .iter()
                .filter(|asset| asset.condition == condition)
                .count()
        };

        let window_start = today - Duration::days(RECENT_WINDOW_DAYS);
        let mut recent = assets
            .iter()
            .filter_map(|asset| parse_entry_date(&asset.entry_date).map(|date| (date, asset)))
            .filter(|(date, _)| *date >= window_start)
            .collect::<Vec<_>>();
        // Stable sort keeps sheet order among same-day entries.
        recent.sort_by(|(a, _), (b, _)| b.cmp(a));

        let per_day = (0..RECENT_WINDOW_DAYS)
            .rev()
            .map(|days_ago| {
                let date = today - Duration::days(days_ago);
                DayCount {
                    date,
                    label: spanish_day_label(date),
                    count: assets
                        .iter()
                        .filter(|asset| parse_entry_date(&asset.entry_date) == Some(date))
                        .count(),
                }
            })
            .collect();

        DashboardStats {
            total_assets: assets.len(),
            new_assets: count(AssetCondition::Nuevo),
            used_assets: count(AssetCondition::Usado),
            damaged_assets: count(AssetCondition::Danado),
            total_value: assets.iter().map(Asset::total_value).sum(),
            recent: recent
                .into_iter()
                .take(RECENT_LIMIT)
                .map(|(_, asset)| asset.clone())
                .collect(),
            per_day,
        }
    }
}

/// Values offered by the inventory filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub groups: Vec<String>,
    pub zones: Vec<String>,
    pub conditions: Vec<String>,
}

impl FilterOptions {
    pub fn from_assets(assets: &[Asset]) -> Self {
        let distinct = |field: fn(&Asset) -> &str| {
            assets
                .iter()
                .map(field)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect::<Vec<_>>()
        };

        FilterOptions {
            groups: distinct(group_of),
            zones: distinct(zone_of),
            conditions: AssetCondition::iter().map(|c| c.to_string()).collect(),
        }
    }
}

fn group_of(asset: &Asset) -> &str {
    &asset.group
}

fn zone_of(asset: &Asset) -> &str {
    &asset.zone
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::NewAsset;

    fn asset(numero: u32, condition: AssetCondition, entry_date: &str) -> Asset {
        NewAsset {
            code: format!("A-{numero}"),
            name: format!("Activo {numero}"),
            quantity: 2,
            value: 10.0,
            condition,
            entry_date: entry_date.into(),
            ..Default::default()
        }
        .with_numero(numero)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    #[test]
    fn test_counts_and_value() {
        let assets = vec![
            asset(1, AssetCondition::Nuevo, "2024-05-20"),
            asset(2, AssetCondition::Usado, "2024-01-01"),
            asset(3, AssetCondition::Danado, ""),
            asset(4, AssetCondition::Nuevo, "2024-05-19"),
        ];
        let stats = DashboardStats::compute(&assets, today());
        assert_eq!(stats.total_assets, 4);
        assert_eq!(stats.new_assets, 2);
        assert_eq!(stats.used_assets, 1);
        assert_eq!(stats.damaged_assets, 1);
        assert_eq!(stats.total_value, 80.0);
    }

    #[test]
    fn test_recent_window_and_order() {
        let assets = vec![
            asset(1, AssetCondition::Nuevo, "2024-05-05"),
            asset(2, AssetCondition::Nuevo, "2024-05-04"),
            asset(3, AssetCondition::Nuevo, "2024-05-18"),
            asset(4, AssetCondition::Nuevo, "20/05/2024"),
        ];
        let stats = DashboardStats::compute(&assets, today());
        let numeros = stats.recent.iter().map(|a| a.numero).collect::<Vec<_>>();
        assert_eq!(numeros, vec![4, 3, 1]);
    }

    #[test]
    fn test_recent_is_capped() {
        let assets = (1..=12)
            .map(|n| asset(n, AssetCondition::Usado, "2024-05-20"))
            .collect::<Vec<_>>();
        let stats = DashboardStats::compute(&assets, today());
        assert_eq!(stats.recent.len(), 10);
        assert_eq!(stats.recent[0].numero, 1);
    }

    #[test]
    fn test_per_day_buckets() {
        let assets = vec![
            asset(1, AssetCondition::Nuevo, "2024-05-20"),
            asset(2, AssetCondition::Nuevo, "2024-05-20T08:00:00Z"),
            asset(3, AssetCondition::Nuevo, "2024-05-06"),
            asset(4, AssetCondition::Nuevo, "2024-05-05"),
        ];
        let stats = DashboardStats::compute(&assets, today());
        assert_eq!(stats.per_day.len(), 15);
        assert_eq!(stats.per_day[0].date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        assert_eq!(stats.per_day[0].label, "06 may");
        assert_eq!(stats.per_day[0].count, 1);
        assert_eq!(stats.per_day[14].count, 2);
        assert_eq!(stats.per_day.iter().map(|d| d.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_filter_options() {
        let mut a = asset(1, AssetCondition::Nuevo, "");
        a.group = "Sonido".into();
        a.zone = "Bodega".into();
        let mut b = asset(2, AssetCondition::Nuevo, "");
        b.group = "Luces".into();
        b.zone = "Bodega".into();
        let c = asset(3, AssetCondition::Nuevo, "");

        let options = FilterOptions::from_assets(&[a, b, c]);
        assert_eq!(options.groups, vec!["Luces", "Sonido"]);
        assert_eq!(options.zones, vec!["Bodega"]);
        assert_eq!(options.conditions, vec!["Nuevo", "Usado", "Dañado"]);
    }
}
