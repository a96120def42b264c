// main.rs
use clap::Parser;

use fret_chord_rust::guitar::music_note::midi_note_name;
use fret_chord_rust::voicing::chord_type::detect_chord_type;
use fret_chord_rust::voicing::search::generate_with;
use fret_chord_rust::*;

#[derive(Debug, Parser)]
#[command(name = "fret_chord")]
#[command(about = "列出吉他和弦的常用按法")]
struct Cli {
    /// 根音，例如 `C`、`F#`、`Bb`
    #[arg(long)]
    key: String,

    /// 和弦性质，例如 `major`、`m7`、`sus4`
    #[arg(long, default_value = "major")]
    quality: String,

    /// 最多挑选几个按法
    #[arg(long)]
    limit: Option<i32>,

    /// 搜索的最高品格
    #[arg(long)]
    max_fret: Option<i32>,

    /// 按弦的最大跨度
    #[arg(long)]
    max_span: Option<i32>,

    /// 搜索保留的结果数
    #[arg(long)]
    max_results: Option<i32>,

    /// 输出搜索的原始结果，不做挑选
    #[arg(long)]
    raw: bool,

    /// 以 JSON 输出
    #[arg(long)]
    json: bool,

    /// JSON 配置文件
    #[arg(long)]
    config: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => VoicingConfig::load_from_json(path)?,
        None => VoicingConfig::default(),
    };
    if let Some(limit) = cli.limit {
        config.pick.limit = limit;
    }
    if let Some(max_fret) = cli.max_fret {
        config.generate.max_fret = max_fret;
    }
    if let Some(max_span) = cli.max_span {
        config.generate.max_span = max_span;
    }
    if let Some(max_results) = cli.max_results {
        config.generate.max_results = max_results;
    }

    // 引擎对未知和弦只返回空列表，命令行需要明确报错
    let root = PitchClass::parse(&cli.key)?;
    let quality: ChordQuality = cli.quality.parse()?;

    let voicings = if cli.raw {
        generate_with(
            &StandardChordResolver,
            &cli.key,
            &cli.quality,
            &config.generate,
            &config.weights,
        )
    } else {
        find_voicings(&cli.key, &cli.quality, &config)
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&voicings)?);
        return Ok(());
    }

    println!("{}{}: {} 个按法", root.canonical_name(), quality, voicings.len());
    for position in &voicings {
        print_position(position);
    }
    Ok(())
}

fn print_position(position: &ChordPosition) {
    let fingers: String = position.fingers().iter().map(|f| f.to_string()).collect();
    let barres = if position.barres().is_empty() {
        "-".to_string()
    } else {
        position
            .barres()
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(",")
    };
    let labels = detect_chord_type(position).labels().join(" ");
    let notes = position
        .midi_notes()
        .iter()
        .map(|&midi| midi_note_name(midi))
        .collect::<Vec<_>>()
        .join(" ");

    println!(
        "{}  fingers {}  base {}  barres {}  {}  [{}]",
        position.frets(), fingers, position.base_fret(), barres, labels, notes
    );
}
