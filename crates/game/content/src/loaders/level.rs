//! Level data loader.
//!
//! A campaign file is a RON struct with a single `levels` list; each entry
//! deserializes straight into [`LevelSpec`].

use std::path::Path;

use echoes_core::{Campaign, LevelSpec};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Campaign data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CampaignRon {
    levels: Vec<LevelSpec>,
}

/// Loader for level campaigns from RON files.
pub struct LevelLoader;

impl LevelLoader {
    /// Load a campaign from a RON file.
    pub fn load(path: &Path) -> LoadResult<Campaign> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a campaign from RON text.
    ///
    /// Fails on malformed RON, an empty level list, or a level that allows
    /// zero loops.
    pub fn parse(content: &str) -> LoadResult<Campaign> {
        let data: CampaignRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse campaign RON: {}", e))?;

        Campaign::new(data.levels).map_err(|e| anyhow::anyhow!("Invalid campaign: {}", e))
    }

    /// Serialize levels in the same layout [`parse`](Self::parse) reads.
    pub fn to_ron(levels: &[LevelSpec]) -> LoadResult<String> {
        let data = CampaignRon {
            levels: levels.to_vec(),
        };
        ron::ser::to_string_pretty(&data, ron::ser::PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to serialize campaign RON: {}", e))
    }
}
