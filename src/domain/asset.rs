use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Physical condition of an asset, as written in the `Estado` column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum AssetCondition {
    Nuevo,
    #[default]
    Usado,
    #[strum(serialize = "Dañado")]
    #[serde(rename = "Dañado")]
    Danado,
}

impl AssetCondition {
    /// Lenient parse of a cell value. Blank or unknown values fall back to `Usado`.
    pub fn from_cell(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "nuevo" => AssetCondition::Nuevo,
            "dañado" | "danado" => AssetCondition::Danado,
            _ => AssetCondition::Usado,
        }
    }
}

/// An inventory asset (an "Activo"). `numero` is the key column of its sheet row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub numero: u32,
    pub code: String,
    pub name: String,
    pub brand: String,
    pub quantity: u32,
    pub condition: AssetCondition,
    pub owner: String,
    pub entry_date: String,
    pub group: String,
    pub zone: String,
    pub notes: String,
    pub value: f64,
    pub image_url: String,
}

impl Asset {
    pub fn total_value(&self) -> f64 {
        self.value * f64::from(self.quantity)
    }

    pub fn details(&self) -> NewAsset {
        NewAsset {
            code: self.code.clone(),
            name: self.name.clone(),
            brand: self.brand.clone(),
            quantity: self.quantity,
            condition: self.condition,
            owner: self.owner.clone(),
            entry_date: self.entry_date.clone(),
            group: self.group.clone(),
            zone: self.zone.clone(),
            notes: self.notes.clone(),
            value: self.value,
            image_url: self.image_url.clone(),
        }
    }
}

/// Asset fields before a row (and therefore a `numero`) has been assigned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewAsset {
    pub code: String,
    pub name: String,
    pub brand: String,
    pub quantity: u32,
    pub condition: AssetCondition,
    pub owner: String,
    pub entry_date: String,
    pub group: String,
    pub zone: String,
    pub notes: String,
    pub value: f64,
    pub image_url: String,
}

impl NewAsset {
    pub fn with_numero(self, numero: u32) -> Asset {
        Asset {
            numero,
            code: self.code,
            name: self.name,
            brand: self.brand,
            quantity: self.quantity,
            condition: self.condition,
            owner: self.owner,
            entry_date: self.entry_date,
            group: self.group,
            zone: self.zone,
            notes: self.notes,
            value: self.value,
            image_url: self.image_url,
        }
    }
}

/// An asset moved to the `Historial` sheet when it was deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedAsset {
    #[serde(flatten)]
    pub asset: Asset,
    pub deleted_at: String,
}
