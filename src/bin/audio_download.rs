use tokio::io::{self, BufReader};

use ytgrab::{Config, YtDlp, cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();
    pretty_env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    log::info!("Using {}", config.ytdlp_path.display());

    let resolver = YtDlp::from_config(&config);
    cli::run_audio(&resolver, &mut BufReader::new(io::stdin()), &mut io::stdout()).await
}
