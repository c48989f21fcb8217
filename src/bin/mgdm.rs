use std::time::Duration;

use clap::{Args, Parser};
use mangadex_rest::{AggregateQuery, ClientConfig, GetChapters, MangadexClient};

#[derive(Debug, Parser)]
#[command(
    name = "mgdm",
    version,
    author,
    about = "CLI tool to list the chapters of a manga on mangadex"
)]
struct Arguments {
    #[arg(help = "manga id or url")]
    manga: String,
    #[arg(short, long, default_value_t= String::from("en"), help="translation language" )]
    language: String,
    #[arg(short, long, help = "translation group")]
    groups: Vec<String>,
    #[arg(short, long, group = "range")]
    chapters: Vec<f32>,
    #[arg(short, long, group = "range")]
    volumes: Vec<f32>,
    #[command(flatten)]
    chapter_range: ChapterRange,
    #[arg(long, env = "MANGADEX_API_URL", default_value = mangadex_rest::DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long, default_value_t = 5, help = "request timeout in seconds")]
    timeout: u64,
}

#[derive(Debug, Clone, Args)]
#[group(id = "chapter_range", multiple = true, conflicts_with = "range")]
struct ChapterRange {
    #[arg(long)]
    min_chapter: Option<f32>,
    #[arg(long)]
    max_chapter: Option<f32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Arguments::parse();

    let mut query = if args.manga.contains("mangadex.org") {
        AggregateQuery::from_url(args.manga.as_str())?
    } else {
        AggregateQuery::new(&args.manga)
    };

    query = query.language(&args.language);
    for group in &args.groups {
        query = query.group(group);
    }

    let config = ClientConfig::builder()
        .base_url(args.base_url.clone())
        .timeout(Duration::from_secs(args.timeout))
        .build()?;
    let client = MangadexClient::with_config(config)?;

    let manga = client.get_manga(query.id()).await?;
    println!("{}", manga.display_title());

    let manga_volumes = client.manga_aggregate(&query).await?;

    let chapters = if !args.volumes.is_empty() {
        manga_volumes
            .iter()
            .filter(|x| args.volumes.contains(&x.volume().unwrap_or(f32::INFINITY)))
            .collect::<Vec<_>>()
            .get_chapters()
    } else if !args.chapters.is_empty() {
        (&manga_volumes)
            .get_chapters()
            .into_iter()
            .filter(|c| {
                args.chapters
                    .contains(&c.chapter().unwrap_or(f32::INFINITY))
            })
            .collect()
    } else {
        let min_chap = args.chapter_range.min_chapter.unwrap_or(f32::NEG_INFINITY);
        let max_chap = args.chapter_range.max_chapter.unwrap_or(f32::INFINITY);
        (&manga_volumes)
            .get_chapters()
            .into_iter()
            .filter(|c| {
                let c = c.chapter().unwrap_or(-1.0);
                c >= min_chap && c <= max_chap
            })
            .collect()
    };

    for chapter in chapters {
        match chapter.chapter() {
            Some(c) => println!("{c:>8} {}", chapter.id()),
            None => println!("{:>8} {}", "none", chapter.id()),
        }
    }

    Ok(())
}
