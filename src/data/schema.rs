use bevy::asset::Asset;
use bevy::reflect::TypePath;
use serde_derive::Deserialize;
use thiserror::Error;

use crate::kitchen::components::{ItemKind, StationKind};

/// 布局里的一项摆放
#[derive(Debug, Deserialize, Clone)]
pub struct LayoutEntry {
    pub name: String,
    pub kind: EntryKind,
    /// 地面坐标 (x, z)
    pub at: (f32, f32),
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub enum EntryKind {
    Station(StationKind),
    Item(ItemKind),
    /// 只能交互、没有槽位的摆设
    Prop,
}

#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct KitchenLayout {
    #[serde(default)]
    pub player_start: (f32, f32),
    pub entries: Vec<LayoutEntry>,
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("layout has no entries")]
    Empty,
    #[error("entry #{index} has a blank name")]
    BlankName { index: usize },
    #[error("entry #{index} ({name}) has a non-finite position")]
    BadPosition { index: usize, name: String },
    #[error("entry #{index} ({name}) overlaps entry #{first} at {at:?}")]
    Overlap {
        index: usize,
        first: usize,
        name: String,
        at: (f32, f32),
    },
}

impl KitchenLayout {
    /// 空布局、无名条目、两个对象摆在同一格都算坏数据
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.entries.is_empty() {
            return Err(LayoutError::Empty);
        }
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(LayoutError::BlankName { index });
            }
            let (x, z) = entry.at;
            if !x.is_finite() || !z.is_finite() {
                return Err(LayoutError::BadPosition {
                    index,
                    name: entry.name.clone(),
                });
            }
            if let Some(first) = self.entries[..index].iter().position(|e| e.at == entry.at) {
                return Err(LayoutError::Overlap {
                    index,
                    first,
                    name: entry.name.clone(),
                    at: entry.at,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::ron;

    fn layout(text: &str) -> KitchenLayout {
        ron::de::from_str(text).unwrap()
    }

    #[test]
    fn bundled_layout_parses() {
        let text = include_str!("../../assets/data/kitchen.ron");
        let layout: KitchenLayout = ron::de::from_str(text).unwrap();
        assert!(!layout.entries.is_empty());
        assert!(layout.entries.iter().any(|e| matches!(
            e.kind,
            EntryKind::Station(StationKind::CuttingBoard)
        )));
        assert!(layout.entries.iter().any(|e| matches!(
            e.kind,
            EntryKind::Station(StationKind::Crate(ItemKind::Tomato))
        )));
    }

    #[test]
    fn bundled_layout_is_valid() {
        let text = include_str!("../../assets/data/kitchen.ron");
        assert_eq!(layout(text).validate(), Ok(()));
    }

    #[test]
    fn empty_and_blank_layouts_are_rejected() {
        assert_eq!(layout("(entries: [])").validate(), Err(LayoutError::Empty));
        assert_eq!(
            layout(r#"(entries: [(name: "  ", kind: Prop, at: (0.0, 0.0))])"#).validate(),
            Err(LayoutError::BlankName { index: 0 })
        );
    }

    #[test]
    fn stacked_entries_are_rejected() {
        let stacked = layout(
            r#"(entries: [
                (name: "Plate", kind: Item(Plate), at: (1.0, 0.5)),
                (name: "Board", kind: Station(CuttingBoard), at: (2.0, 0.5)),
                (name: "Plate", kind: Item(Plate), at: (1.0, 0.5)),
            ])"#,
        );
        assert_eq!(
            stacked.validate(),
            Err(LayoutError::Overlap {
                index: 2,
                first: 0,
                name: "Plate".into(),
                at: (1.0, 0.5),
            })
        );
    }
}
