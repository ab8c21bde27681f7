use bevy::asset::{io::Reader, ron, AssetLoader, LoadContext};
use bevy::log::debug;
use std::future::Future;
use thiserror::Error;

use super::schema::{KitchenLayout, LayoutError};

/// `.ron` 厨房布局；解析后立即校验，坏布局按加载失败处理
#[derive(Default)]
pub struct RonLayoutLoader;

#[derive(Debug, Error)]
pub enum RonLayoutLoaderError {
    #[error("Could not load asset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Could not interpret bytes as UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("Invalid kitchen layout: {0}")]
    Invalid(#[from] LayoutError),
}

/// 字节 → 校验过的布局
pub fn parse_layout(bytes: &[u8]) -> Result<KitchenLayout, RonLayoutLoaderError> {
    let text = std::str::from_utf8(bytes)?;
    let layout: KitchenLayout = ron::de::from_str(text)?;
    layout.validate()?;
    Ok(layout)
}

impl AssetLoader for RonLayoutLoader {
    type Asset = KitchenLayout;
    type Settings = ();
    type Error = RonLayoutLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl Future<Output = Result<Self::Asset, Self::Error>> + Send {
        let path = load_context.path().display().to_string();
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            let layout = parse_layout(&bytes)?;
            debug!("{path}: {} entries", layout.entries.len());
            Ok(layout)
        }
    }

    fn extensions(&self) -> &[&str] {
        &["ron"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_layout_loads() {
        let layout = parse_layout(include_bytes!("../../assets/data/kitchen.ron")).unwrap();
        assert_eq!(layout.entries.len(), 10);
        assert_eq!(layout.player_start, (0.0, 1.5));
    }

    #[test]
    fn bad_bytes_map_to_their_error() {
        assert!(matches!(
            parse_layout(&[0xff, 0xfe]),
            Err(RonLayoutLoaderError::Utf8(_))
        ));
        assert!(matches!(
            parse_layout(b"(entries: [("),
            Err(RonLayoutLoaderError::Ron(_))
        ));
        assert!(matches!(
            parse_layout(b"(entries: [])"),
            Err(RonLayoutLoaderError::Invalid(LayoutError::Empty))
        ));
    }
}
