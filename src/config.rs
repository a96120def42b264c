use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

use crate::error::VoicingError;
use crate::guitar::fret::MAX_FRET;
use crate::voicing::score::{ScoreWeights, SourceBias};

/// 搜索时允许的最大跨度上限
const SPAN_CEILING: i32 = 12;

/// Options for the backtracking search.
///
/// 字段用有符号整数，非法值在 `normalized` 里被纠正而不是报错
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// 搜索的最高品格（包含）
    pub max_fret: i32,
    /// 按弦的最大跨度，空弦不计入
    pub max_span: i32,
    pub max_results: i32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            max_fret: 12,
            max_span: 5,
            max_results: 30,
        }
    }
}

impl GenerateOptions {
    pub fn normalized(&self) -> Self {
        let defaults = Self::default();
        GenerateOptions {
            max_fret: clamp_fret(self.max_fret, defaults.max_fret),
            max_span: if self.max_span < 0 {
                warn!("max_span {} 无效，使用默认值 {}", self.max_span, defaults.max_span);
                defaults.max_span
            } else {
                self.max_span.min(SPAN_CEILING)
            },
            max_results: positive_or(self.max_results, defaults.max_results, "max_results"),
        }
    }
}

/// Options for picking the final shortlist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickOptions {
    pub limit: i32,
    /// 生成 CAGED 把位时的最高品格
    pub max_fret: i32,
}

impl Default for PickOptions {
    fn default() -> Self {
        PickOptions {
            limit: 10,
            max_fret: 15,
        }
    }
}

impl PickOptions {
    pub fn normalized(&self) -> Self {
        let defaults = Self::default();
        PickOptions {
            limit: positive_or(self.limit, defaults.limit, "limit"),
            max_fret: clamp_fret(self.max_fret, defaults.max_fret),
        }
    }
}

/// 全部可调参数，可以从 JSON 文件读入
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoicingConfig {
    pub generate: GenerateOptions,
    pub pick: PickOptions,
    pub weights: ScoreWeights,
    pub bias: SourceBias,
}

impl VoicingConfig {
    /// 从 JSON 文件读取配置，缺省的字段用默认值
    pub fn load_from_json(json_file_path: &str) -> Result<Self, VoicingError> {
        let file = File::open(json_file_path)?;
        let reader = BufReader::new(file);
        let config: VoicingConfig = serde_json::from_reader(reader)?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, VoicingError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn clamp_fret(value: i32, default: i32) -> i32 {
    if value <= 0 {
        warn!("max_fret {} 无效，使用默认值 {}", value, default);
        default
    } else {
        value.min(MAX_FRET as i32)
    }
}

fn positive_or(value: i32, default: i32, name: &str) -> i32 {
    if value <= 0 {
        warn!("{} {} 无效，使用默认值 {}", name, value, default);
        default
    } else {
        value
    }
}
