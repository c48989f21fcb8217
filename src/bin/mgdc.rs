use std::time::Duration;

use clap::Parser;
use mangadex_rest::{chapter_id_from_url, ClientConfig, ImageQuality, MangadexClient};

#[derive(Debug, Parser)]
#[command(
    name = "mgdc",
    version,
    author,
    about = "CLI tool to list the page links of a mangadex chapter"
)]
struct Arguments {
    #[arg(help = "Chapter id or url")]
    chapter: String,
    #[arg(short, long, help = "link to compressed images")]
    data_saver: bool,
    #[arg(long, env = "MANGADEX_API_URL", default_value = mangadex_rest::DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long, default_value_t = 5, help = "request timeout in seconds")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Arguments::parse();
    let id = if args.chapter.contains("mangadex.org") {
        chapter_id_from_url(args.chapter.as_str())?
    } else {
        args.chapter.clone()
    };

    let config = ClientConfig::builder()
        .base_url(args.base_url)
        .timeout(Duration::from_secs(args.timeout))
        .build()?;
    let client = MangadexClient::with_config(config)?;

    let chapter = client.get_chapter(&id).await?;
    let quality = if args.data_saver {
        ImageQuality::DataSaver
    } else {
        ImageQuality::Data
    };
    for url in client.fetch_chapter_images_with(&chapter, quality).await? {
        println!("{url}");
    }
    Ok(())
}
