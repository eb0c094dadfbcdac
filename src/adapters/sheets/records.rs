//! Row codecs between sheet rows and domain records.

use crate::domain::{
    activity::{ActivityAction, ActivityLog},
    asset::{Asset, AssetCondition, DeletedAsset, NewAsset},
    user::{Role, User},
};

/// Columns A..M of `Activos`.
pub const ASSET_COLUMNS: usize = 13;

/// Trimmed cell `index` of `row`; cells past the end of a short row are empty.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|value| value.trim()).unwrap_or("")
}

/// Parses a displayed number such as `1200`, `$1,200.50`, `1.200,50` or `12 u`.
/// Anything without a leading number is 0.
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    // Plain and scientific notation, unless the dots group thousands (`1.200`).
    if !is_grouped(trimmed, '.') {
        if let Some(value) = trimmed.parse::<f64>().ok().filter(|value| value.is_finite()) {
            return value;
        }
    }

    let cleaned = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '-' | '.' | ','))
        .collect::<String>();

    let normalized = match (cleaned.rfind('.'), cleaned.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (None, Some(_)) if is_grouped(&cleaned, ',') => cleaned.replace(',', ""),
        (None, Some(_)) => cleaned.replace(',', "."),
        (Some(_), None) if is_grouped(&cleaned, '.') => cleaned.replace('.', ""),
        _ => cleaned,
    };

    leading_number(&normalized).unwrap_or(0.0)
}

/// `1,200,000` style grouping: a leading group of one to three digits without a
/// leading zero, then groups of exactly three digits.
fn is_grouped(text: &str, separator: char) -> bool {
    let mut groups = text.split(separator);
    let first = groups.next().unwrap_or("").trim_start_matches('-');
    if first.is_empty() || first.len() > 3 || first.starts_with('0') {
        return false;
    }
    groups.all(|group| group.len() == 3)
}

fn leading_number(text: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in text.char_indices() {
        match c {
            '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => break,
        }
        end = i + c.len_utf8();
    }
    text[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Whole, non-negative count. Fractions are truncated.
pub fn parse_count(text: &str) -> u32 {
    let value = parse_number(text);
    if value <= 0.0 {
        0
    } else {
        value.trunc().min(f64::from(u32::MAX)) as u32
    }
}

fn format_number(value: f64) -> String {
    value.to_string()
}

/// Key column and code both present.
pub fn is_live_asset_row(row: &[String]) -> bool {
    !cell(row, 0).is_empty() && !cell(row, 1).is_empty()
}

/// A soft-deleted row: key column kept, every data column blank.
pub fn is_vacant_asset_row(row: &[String]) -> bool {
    !cell(row, 0).is_empty() && (1..ASSET_COLUMNS).all(|index| cell(row, index).is_empty())
}

pub fn asset_from_row(row: &[String]) -> Asset {
    Asset {
        numero: parse_count(cell(row, 0)),
        code: cell(row, 1).to_owned(),
        name: cell(row, 2).to_owned(),
        brand: cell(row, 3).to_owned(),
        quantity: parse_count(cell(row, 4)),
        condition: AssetCondition::from_cell(cell(row, 5)),
        owner: cell(row, 6).to_owned(),
        entry_date: cell(row, 7).to_owned(),
        group: cell(row, 8).to_owned(),
        zone: cell(row, 9).to_owned(),
        notes: cell(row, 10).to_owned(),
        value: parse_number(cell(row, 11)),
        image_url: cell(row, 12).to_owned(),
    }
}

/// Columns B..M.
pub fn asset_data_cells(asset: &NewAsset) -> Vec<String> {
    vec![
        asset.code.clone(),
        asset.name.clone(),
        asset.brand.clone(),
        asset.quantity.to_string(),
        asset.condition.to_string(),
        asset.owner.clone(),
        asset.entry_date.clone(),
        asset.group.clone(),
        asset.zone.clone(),
        asset.notes.clone(),
        format_number(asset.value),
        asset.image_url.clone(),
    ]
}

/// Columns A..M.
pub fn asset_to_row(asset: &Asset) -> Vec<String> {
    let mut row = Vec::with_capacity(ASSET_COLUMNS);
    row.push(asset.numero.to_string());
    row.extend(asset_data_cells(&asset.details()));
    row
}

/// B..M of a soft-deleted row.
pub fn blank_asset_data() -> Vec<String> {
    vec![String::new(); ASSET_COLUMNS - 1]
}

/// `position` is the 0-based index of the row in the `Usuarios` table.
pub fn user_from_row(position: usize, row: &[String]) -> User {
    User {
        id: position as u32 + 1,
        email: cell(row, 0).to_owned(),
        pin: cell(row, 1).to_owned(),
        name: cell(row, 2).to_owned(),
        role: Role::from_code(cell(row, 3)),
        active: true,
    }
}

pub fn user_to_row(user: &User) -> Vec<String> {
    vec![
        user.email.clone(),
        user.pin.clone(),
        user.name.clone(),
        user.role.code().to_owned(),
    ]
}

pub fn activity_from_row(row: &[String]) -> ActivityLog {
    ActivityLog {
        numero: parse_count(cell(row, 0)),
        date: cell(row, 1).to_owned(),
        time: cell(row, 2).to_owned(),
        user: cell(row, 3).to_owned(),
        action: ActivityAction::from(cell(row, 4)),
        detail: cell(row, 5).to_owned(),
    }
}

pub fn activity_to_row(entry: &ActivityLog) -> Vec<String> {
    vec![
        entry.numero.to_string(),
        entry.date.clone(),
        entry.time.clone(),
        entry.user.clone(),
        entry.action.as_str().to_owned(),
        entry.detail.clone(),
    ]
}

pub fn deleted_from_row(row: &[String]) -> DeletedAsset {
    DeletedAsset {
        asset: asset_from_row(row),
        deleted_at: cell(row, ASSET_COLUMNS).to_owned(),
    }
}

pub fn deleted_to_row(deleted: &DeletedAsset) -> Vec<String> {
    let mut row = asset_to_row(&deleted.asset);
    row.push(deleted.deleted_at.clone());
    row
}
